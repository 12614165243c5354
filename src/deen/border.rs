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
use crate::DeenSample;

/// Span of one gathered window row and of a border mask.
///
/// Fits the widest vector group (32 lanes) plus `2 * 7` samples of context.
pub(crate) const WINDOW_SPAN: usize = 64;

/// Rows of the widest window.
pub(crate) const WINDOW_ROWS: usize = 15;

/// Vertical part of the window for row `y`, offsets `top..=bottom` relative to `y`.
///
/// The window is clipped to the plane, there is no edge replication.
#[inline(always)]
pub(crate) fn vertical_window(y: usize, height: usize, radius: usize) -> (isize, isize) {
    let top = -(y.min(radius) as isize);
    let bottom = radius.min(height - 1 - y) as isize;
    (top, bottom)
}

/// Horizontal part of the window for column `x`, offsets `left..=right` relative to `x`.
#[inline(always)]
pub(crate) fn horizontal_window(x: usize, width: usize, radius: usize) -> (isize, isize) {
    let left = -(x.min(radius) as isize);
    let right = radius.min(width - 1 - x) as isize;
    (left, right)
}

/// Splits column range of a row into edge and interior groups of `step` lanes.
///
/// Groups in `fast_start..fast_end` have the whole horizontal window
/// of every lane inside `0..width` and are always full.
/// Groups outside it go through the masked edge path, the trailing one may be partial.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ColumnSplit {
    pub(crate) first: usize,
    pub(crate) fast_start: usize,
    pub(crate) fast_end: usize,
    pub(crate) last: usize,
    pub(crate) step: usize,
}

impl ColumnSplit {
    pub(crate) fn new(
        first: usize,
        last: usize,
        width: usize,
        radius: usize,
        step: usize,
    ) -> ColumnSplit {
        let lead = radius.saturating_sub(first).div_ceil(step) * step;
        let fast_start = (first + lead).min(last);
        let fast_limit = width.saturating_sub(radius).min(last);
        let fast_end = if fast_limit > fast_start {
            fast_start + (fast_limit - fast_start) / step * step
        } else {
            fast_start
        };
        ColumnSplit {
            first,
            fast_start,
            fast_end,
            last,
            step,
        }
    }

    /// Edge groups as `(x, lanes)` on both sides of the interior.
    pub(crate) fn edge_groups(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let left = (self.first..self.fast_start)
            .step_by(self.step)
            .map(|x| (x, self.step.min(self.fast_start - x)));
        let right = (self.fast_end..self.last)
            .step_by(self.step)
            .map(|x| (x, self.step.min(self.last - x)));
        left.chain(right)
    }

    /// Interior group starts.
    pub(crate) fn fast_groups(&self) -> impl Iterator<Item = usize> {
        (self.fast_start..self.fast_end).step_by(self.step)
    }
}

/// Lane mask for a group starting at column `x`.
///
/// Entry `i` is all ones when column `x + i - radius` lies inside `0..width`.
/// A neighbor at horizontal offset `xx` for lane `l` reads entry `radius + xx + l`.
#[inline]
pub(crate) fn border_mask<T: DeenSample>(
    x: usize,
    width: usize,
    radius: usize,
) -> [T; WINDOW_SPAN] {
    let mut mask = [T::default(); WINDOW_SPAN];
    let diff_l = x as isize;
    let diff_r = width as isize - x as isize;
    for (i, dst) in mask.iter_mut().enumerate() {
        let offset = i as isize - radius as isize;
        if offset >= -diff_l && offset < diff_r {
            *dst = T::ONES;
        }
    }
    mask
}

/// Copies clipped window rows around group `x..x + lanes` into `scratch`.
///
/// Row `k` of `scratch` holds source row `y + top + k`, entry `j` holds column
/// `x + j - radius`; columns outside of the plane stay zero and must be masked out.
#[inline]
pub(crate) fn gather_window<T: DeenSample>(
    src: &[T],
    src_stride: usize,
    width: usize,
    y: usize,
    (top, bottom): (isize, isize),
    x: usize,
    lanes: usize,
    radius: usize,
    scratch: &mut [T; WINDOW_SPAN * WINDOW_ROWS],
) {
    let col_start = x.saturating_sub(radius);
    let col_end = (x + lanes + radius).min(width);
    let dst_offset = col_start + radius - x;
    for (k, yy) in (top..=bottom).enumerate() {
        let row_y = (y as isize + yy) as usize;
        let src_row = &src[row_y * src_stride..];
        let dst_row = &mut scratch[k * WINDOW_SPAN..(k + 1) * WINDOW_SPAN];
        dst_row.fill(T::default());
        dst_row[dst_offset..dst_offset + (col_end - col_start)]
            .copy_from_slice(&src_row[col_start..col_end]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_covers_every_column_once() {
        for width in 1..80usize {
            for radius in 1..=7usize {
                for step in [8usize, 16, 32] {
                    let split = ColumnSplit::new(0, width, width, radius, step);
                    let mut seen = vec![0u32; width];
                    for (x, lanes) in split.edge_groups() {
                        assert!(lanes >= 1 && lanes <= step);
                        for v in seen.iter_mut().skip(x).take(lanes) {
                            *v += 1;
                        }
                    }
                    for x in split.fast_groups() {
                        assert!(x >= radius, "fast group {x} too close to left edge");
                        assert!(
                            x + step + radius <= width,
                            "fast group {x} too close to right edge, width {width}"
                        );
                        for v in seen.iter_mut().skip(x).take(step) {
                            *v += 1;
                        }
                    }
                    assert!(
                        seen.iter().all(|&v| v == 1),
                        "width {width}, radius {radius}, step {step}: {seen:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_split_respects_column_range() {
        let split = ColumnSplit::new(5, 70, 100, 3, 16);
        let mut seen = vec![0u32; 100];
        for (x, lanes) in split.edge_groups() {
            for v in seen.iter_mut().skip(x).take(lanes) {
                *v += 1;
            }
        }
        for x in split.fast_groups() {
            for v in seen.iter_mut().skip(x).take(16) {
                *v += 1;
            }
        }
        assert!(seen[..5].iter().all(|&v| v == 0));
        assert!(seen[5..70].iter().all(|&v| v == 1));
        assert!(seen[70..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_border_mask() {
        // Group at the very left edge of a wide plane.
        let mask = border_mask::<u8>(0, 100, 2);
        assert_eq!(mask[0], 0);
        assert_eq!(mask[1], 0);
        assert_eq!(mask[2], 255);
        assert_eq!(mask[40], 255);
        // Group near the right edge, columns >= 20 are outside.
        let mask = border_mask::<u16>(16, 20, 3);
        assert_eq!(mask[0], u16::MAX);
        assert_eq!(mask[3 + 3], u16::MAX);
        assert_eq!(mask[3 + 4], 0);
        assert_eq!(mask[63], 0);
    }

    #[test]
    fn test_vertical_window_is_clipped() {
        assert_eq!(vertical_window(0, 10, 3), (0, 3));
        assert_eq!(vertical_window(1, 10, 3), (-1, 3));
        assert_eq!(vertical_window(9, 10, 3), (-3, 0));
        assert_eq!(vertical_window(0, 1, 7), (0, 0));
        assert_eq!(horizontal_window(2, 3, 1), (-1, 0));
    }

    #[test]
    fn test_gather_window_zero_fills_outside() {
        let width = 5;
        let height = 3;
        let src: Vec<u8> = (1..=(width * height) as u8).collect();
        let mut scratch = [0u8; WINDOW_SPAN * WINDOW_ROWS];
        let window = vertical_window(0, height, 2);
        gather_window(&src, width, width, 0, window, 0, 5, 2, &mut scratch);
        // Row 0, columns -2..7 -> 0, 0, 1..=5, 0, 0
        assert_eq!(&scratch[..9], &[0, 0, 1, 2, 3, 4, 5, 0, 0]);
        // Row 2 is the last gathered one.
        assert_eq!(
            &scratch[2 * WINDOW_SPAN..2 * WINDOW_SPAN + 9],
            &[0, 0, 11, 12, 13, 14, 15, 0, 0]
        );
    }
}
