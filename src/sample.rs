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
use num_traits::AsPrimitive;
use std::fmt::Debug;

/// Unsigned integer sample stored in a plane.
pub trait DeenSample:
    Copy + Default + Debug + Send + Sync + PartialEq + AsPrimitive<u32> + 'static
{
    /// Widest bit depth the storage can carry.
    const MAX_BIT_DEPTH: u32;
    /// Narrowest bit depth accepted for the storage.
    const MIN_BIT_DEPTH: u32;
    /// All bits set, used as an "in bounds" lane in border masks.
    const ONES: Self;

    /// Narrows a value already known to fit the storage.
    fn from_u32(value: u32) -> Self;
}

impl DeenSample for u8 {
    const MAX_BIT_DEPTH: u32 = 8;
    const MIN_BIT_DEPTH: u32 = 8;
    const ONES: Self = u8::MAX;

    #[inline(always)]
    fn from_u32(value: u32) -> Self {
        value as u8
    }
}

impl DeenSample for u16 {
    const MAX_BIT_DEPTH: u32 = 16;
    const MIN_BIT_DEPTH: u32 = 8;
    const ONES: Self = u16::MAX;

    #[inline(always)]
    fn from_u32(value: u32) -> Self {
        value as u16
    }
}
