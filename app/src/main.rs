/*
 * // Copyright (c) Radzivon Bartoshyk 10/2026. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */

use image::{DynamicImage, ImageReader};
use libdeen::{deen_filter_image, DeenParams, DivisionMode, ThreadingPolicy};
use std::time::Instant;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .unwrap_or_else(|| "../assets/noisy_luma.png".to_string());
    let output = args.next().unwrap_or_else(|| "denoised.png".to_string());
    let radius = args.next().and_then(|v| v.parse().ok()).unwrap_or(2);
    let threshold = args.next().and_then(|v| v.parse().ok()).unwrap_or(12);

    let img = ImageReader::open(&input)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .decode()
        .unwrap();

    // Color inputs are reduced to their luma plane.
    let img = match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageLuma16(_) => img,
        DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgba16(_) => {
            DynamicImage::ImageLuma16(img.to_luma16())
        }
        _ => DynamicImage::ImageLuma8(img.to_luma8()),
    };

    for division in [
        DivisionMode::Exact,
        DivisionMode::FixedPoint,
        DivisionMode::Reciprocal,
    ] {
        let params = DeenParams::new(radius, threshold).with_division(division);
        let start = Instant::now();
        match deen_filter_image(&img, params, ThreadingPolicy::Adaptive) {
            Ok(_) => println!("{:?} division: {:?}", division, start.elapsed()),
            Err(err) => println!("{:?} division: {}", division, err),
        }
    }

    let params = DeenParams::new(radius, threshold);
    let denoised = deen_filter_image(&img, params, ThreadingPolicy::Adaptive).unwrap();
    denoised.save(&output).unwrap();
    println!("Saved {}", output);
}
