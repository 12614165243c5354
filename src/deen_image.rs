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
use crate::{
    deen_filter, deen_filter_u16, DeenError, DeenImage, DeenImageMut, DeenParams, ThreadingPolicy,
};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

/// Performs threshold bounded denoising on the image
///
/// Only single plane images are supported, 16 bit images are treated as full 16 bit depth.
///
/// # Arguments
///
/// * `image`: Dynamic image provided by image crate.
/// * `params`: See [DeenParams] for more info.
/// * `threading_policy` - Threads usage policy.
///
pub fn deen_filter_image(
    image: &DynamicImage,
    params: DeenParams,
    threading_policy: ThreadingPolicy,
) -> Result<DynamicImage, DeenError> {
    match image {
        DynamicImage::ImageLuma8(gray) => {
            let gray_image = DeenImage::borrow(gray.as_raw(), gray.width(), gray.height());
            let mut new_image = DeenImageMut::alloc(gray.width(), gray.height());

            deen_filter(&gray_image, &mut new_image, params, threading_policy)?;

            let new_gray_image = GrayImage::from_raw(
                gray.width(),
                gray.height(),
                new_image.data.borrow().to_vec(),
            )
            .ok_or(DeenError::UnsupportedImageLayout)?;
            Ok(DynamicImage::ImageLuma8(new_gray_image))
        }
        DynamicImage::ImageLuma16(gray) => {
            let gray_image = DeenImage::borrow(gray.as_raw(), gray.width(), gray.height());
            let mut new_image = DeenImageMut::alloc(gray.width(), gray.height());

            deen_filter_u16(&gray_image, &mut new_image, 16, params, threading_policy)?;

            let new_gray_image = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(
                gray.width(),
                gray.height(),
                new_image.data.borrow().to_vec(),
            )
            .ok_or(DeenError::UnsupportedImageLayout)?;
            Ok(DynamicImage::ImageLuma16(new_gray_image))
        }
        _ => Err(DeenError::UnsupportedImageLayout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_luma_images_are_filtered() {
        let gray = GrayImage::from_fn(17, 9, |x, _| Luma([if x == 8 { 130 } else { 120 }]));
        let filtered = deen_filter_image(
            &DynamicImage::ImageLuma8(gray),
            DeenParams::new(1, 20),
            ThreadingPolicy::Single,
        )
        .unwrap();
        let filtered = filtered.as_luma8().unwrap();
        assert_eq!(filtered.dimensions(), (17, 9));
        // Interior stripe, window 2*130 + 3*130 + 6*120 over 11.
        assert_eq!(filtered.get_pixel(8, 4).0[0], 125);
        assert_eq!(filtered.get_pixel(0, 0).0[0], 120);

        let gray16 = ImageBuffer::<Luma<u16>, Vec<u16>>::from_pixel(5, 5, Luma([4000]));
        let filtered = deen_filter_image(
            &DynamicImage::ImageLuma16(gray16),
            DeenParams::default(),
            ThreadingPolicy::Single,
        )
        .unwrap();
        assert!(filtered.as_luma16().unwrap().pixels().all(|p| p.0[0] == 4000));
    }

    #[test]
    fn test_color_images_are_rejected() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        assert_eq!(
            deen_filter_image(&rgb, DeenParams::default(), ThreadingPolicy::Single).err(),
            Some(DeenError::UnsupportedImageLayout)
        );
    }
}
