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
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Requested column range that does not fit into the plane
pub struct ColumnRangeError {
    pub start: usize,
    pub end: usize,
    pub width: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeenError {
    ZeroBaseSize,
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
    ImagesMustMatch,
    RadiusOutOfRange(u32),
    ThresholdOutOfRange(u32),
    UnsupportedBitDepth(u32),
    FixedPointRequires8Bit(u32),
    ColumnRangeOutOfBounds(ColumnRangeError),
    UnsupportedImageLayout,
}

impl Error for DeenError {}

impl std::fmt::Display for DeenError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DeenError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            DeenError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            DeenError::ZeroBaseSize => f.write_str("Image size must not be zero"),
            DeenError::ImagesMustMatch => {
                f.write_str("Source and destination images must match in their dimensions")
            }
            DeenError::RadiusOutOfRange(radius) => f.write_fmt(format_args!(
                "radius must be between 1 and 7 (inclusive), but it is {radius}"
            )),
            DeenError::ThresholdOutOfRange(threshold) => f.write_fmt(format_args!(
                "threshold must be between 2 and 255 (inclusive), but it is {threshold}"
            )),
            DeenError::UnsupportedBitDepth(bit_depth) => f.write_fmt(format_args!(
                "only 8..16 bit integer planes are supported, but bit depth is {bit_depth}"
            )),
            DeenError::FixedPointRequires8Bit(bit_depth) => f.write_fmt(format_args!(
                "Fixed point division is available only for 8 bit planes, but bit depth is {bit_depth}"
            )),
            DeenError::ColumnRangeOutOfBounds(range) => f.write_fmt(format_args!(
                "Column range {}..{} must be non empty and fit into width {}",
                range.start, range.end, range.width
            )),
            DeenError::UnsupportedImageLayout => {
                f.write_str("Only single plane Luma8 and Luma16 images are supported")
            }
        }
    }
}

pub(crate) fn check_slice_size<T>(
    arr: &[T],
    stride: usize,
    width: usize,
    height: usize,
) -> Result<(), DeenError> {
    if width == 0 || height == 0 {
        return Err(DeenError::ZeroBaseSize);
    }
    if stride < width {
        return Err(DeenError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: width,
            received: stride,
        }));
    }
    if arr.len() < stride * (height - 1) + width {
        return Err(DeenError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: stride * (height - 1) + width,
            received: arr.len(),
        }));
    }
    Ok(())
}
