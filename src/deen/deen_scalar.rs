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
use crate::deen::border::{horizontal_window, vertical_window};
use crate::deen::deen_handler::DeenPass;
use crate::deen::reciprocal::Divider;
use crate::DeenSample;
use num_traits::AsPrimitive;

/// Reference row kernel, works for any bit depth up to 16.
///
/// Every neighbor of the clipped window, the center included, is admitted while
/// `threshold > |center - neighbor|`; accumulation starts from a doubly counted center.
pub(crate) fn deen_row_scalar<T: DeenSample, D: Divider>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    y: usize,
    pass: &DeenPass,
) {
    let (top, bottom) = vertical_window(y, pass.height, pass.radius);
    let center_row = &src[y * src_stride..];
    let max_value: u32 = T::ONES.as_();
    let threshold = pass.threshold;

    for x in pass.first_column..pass.last_column {
        let center: u32 = center_row[x].as_();

        let mut sum = center * 2;
        let mut counter = 2u32;

        let (left, right) = horizontal_window(x, pass.width, pass.radius);
        let window_start = (x as isize + left) as usize;
        let window_end = (x as isize + right) as usize;

        for yy in top..=bottom {
            let row_start = (y as isize + yy) as usize * src_stride;
            let window = &src[row_start + window_start..=row_start + window_end];
            for &neighbor in window {
                let neighbor: u32 = neighbor.as_();
                if threshold > center.abs_diff(neighbor) {
                    counter += 1;
                    sum += neighbor;
                }
            }
        }

        dst[x] = T::from_u32(D::divide(sum, counter, pass.table).min(max_value));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::deen::reciprocal::{ExactDivider, ReciprocalTable};

    pub(crate) fn reference_plane<T: DeenSample>(
        src: &[T],
        width: usize,
        height: usize,
        radius: usize,
        threshold: u32,
    ) -> Vec<T> {
        let table = ReciprocalTable::new();
        let pass = DeenPass {
            width,
            height,
            first_column: 0,
            last_column: width,
            threshold,
            radius,
            table: &table,
        };
        let mut dst = vec![T::default(); width * height];
        for (y, dst_row) in dst.chunks_exact_mut(width).enumerate() {
            deen_row_scalar::<T, ExactDivider>(src, width, dst_row, y, &pass);
        }
        dst
    }

    #[test]
    fn test_uniform_plane_is_identity() {
        for radius in 1..=7 {
            for threshold in [2u32, 10, 255] {
                let src = vec![77u8; 23 * 11];
                let dst = reference_plane(&src, 23, 11, radius, threshold);
                assert!(
                    dst.iter().all(|&v| v == 77),
                    "uniform plane changed for radius {radius} threshold {threshold}"
                );
            }
            let src = vec![40000u16; 19 * 9];
            let dst = reference_plane(&src, 19, 9, radius, 2570);
            assert!(dst.iter().all(|&v| v == 40000));
        }
    }

    #[test]
    fn test_edge_windows_are_truncated() {
        #[rustfmt::skip]
        let src: [u8; 9] = [
            10, 20, 30,
            40, 50, 60,
            70, 80, 90,
        ];
        let dst = reference_plane(&src, 3, 3, 1, 255);
        // Corner: {10, 20, 40, 50} + 2 * 10 over 6 -> 23.33
        assert_eq!(dst[0], 23);
        // Top edge: {10, 20, 30, 40, 50, 60} + 2 * 20 over 8 -> 31.25
        assert_eq!(dst[1], 31);
        // Center: whole plane + 2 * 50 over 11 -> 50
        assert_eq!(dst[4], 50);
        // Bottom right corner: {50, 60, 80, 90} + 2 * 90 over 6 -> 76.67
        assert_eq!(dst[8], 77);

        let dst = reference_plane(&src, 3, 3, 1, 15);
        // Corner admits only 10 and 20: (20 + 10 + 20) / 4 = 12.5, rounds up
        assert_eq!(dst[0], 13);
    }

    #[test]
    fn test_smallest_threshold_patch() {
        #[rustfmt::skip]
        let src: [u8; 9] = [
            50, 51, 51,
            49, 50, 52,
            60, 51, 53,
        ];
        let dst = reference_plane(&src, 3, 3, 1, 2);
        // Center 50 admits 50, 51, 51, 49, 50, 51 (differences below 2):
        // sum = 100 + 302 = 402, counter = 2 + 6 = 8 -> 50.25
        assert_eq!(dst[4], 50);
        // x = 2, y = 0, center 51 admits 51, 51, 50, 52:
        // sum = 102 + 204 = 306, counter = 6 -> 51
        assert_eq!(dst[2], 51);
        // x = 0, y = 2, center 60 admits only itself.
        assert_eq!(dst[6], 60);
        // x = 2, y = 2, center 53 admits 52, 53:
        // sum = 106 + 105 = 211, counter = 4 -> 52.75
        assert_eq!(dst[8], 53);
    }

    #[test]
    fn test_outlier_is_kept_apart() {
        let mut src = vec![100u8; 25];
        src[12] = 200;
        let dst = reference_plane(&src, 5, 5, 1, 50);
        // Every neighbor of the outlier differs by 100, only the center is admitted.
        assert_eq!(dst[12], 200);
        for (i, &v) in dst.iter().enumerate() {
            if i != 12 {
                assert_eq!(v, 100, "pixel {i} was touched by the outlier");
            }
        }
        // Threshold above the difference blends the outlier:
        // (2 * 200 + 200 + 8 * 100) / 11 = 127.27
        let dst = reference_plane(&src, 5, 5, 1, 150);
        assert_eq!(dst[12], 127);
        // Its direct neighbor sees (2 * 100 + 100 * 8 + 200) / 11 = 109.09
        assert_eq!(dst[7], 109);
    }

    #[test]
    fn test_mirror_symmetry() {
        let width = 17;
        let height = 13;
        let src: Vec<u8> = (0..width * height)
            .map(|i| ((i * 37 + (i / width) * 11) % 256) as u8)
            .collect();
        let dst = reference_plane(&src, width, height, 2, 60);

        let mirrored: Vec<u8> = src
            .chunks_exact(width)
            .flat_map(|row| row.iter().rev().copied())
            .collect();
        let dst_mirrored = reference_plane(&mirrored, width, height, 2, 60);
        for (y, (a, b)) in dst
            .chunks_exact(width)
            .zip(dst_mirrored.chunks_exact(width))
            .enumerate()
        {
            for x in 0..width {
                assert_eq!(a[x], b[width - 1 - x], "horizontal mirror at {x}, {y}");
            }
        }

        let flipped: Vec<u8> = src.chunks_exact(width).rev().flatten().copied().collect();
        let dst_flipped = reference_plane(&flipped, width, height, 2, 60);
        for y in 0..height {
            assert_eq!(
                &dst[y * width..(y + 1) * width],
                &dst_flipped[(height - 1 - y) * width..(height - y) * width],
                "vertical mirror at row {y}"
            );
        }
    }

    #[test]
    fn test_output_stays_in_range() {
        let width = 31;
        let height = 7;
        let src: Vec<u16> = (0..width * height)
            .map(|i| if i % 3 == 0 { 1023 } else { (i * 97 % 1024) as u16 })
            .collect();
        let dst = reference_plane(&src, width, height, 7, 1023);
        assert!(dst.iter().all(|&v| v <= 1023));
    }
}
