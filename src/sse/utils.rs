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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Reciprocal estimate refined with one Newton-Raphson iteration: `r + r - r * r * a`.
#[inline(always)]
pub(crate) unsafe fn _mm_rcp_nr_ps(a: __m128) -> __m128 {
    let r = _mm_rcp_ps(a);
    _mm_sub_ps(_mm_add_ps(r, r), _mm_mul_ps(_mm_mul_ps(r, a), r))
}

/// Rounded `sum / counter` for 32 bit lanes through the refined reciprocal.
#[inline(always)]
pub(crate) unsafe fn _mm_div_rcp_epi32(sum: __m128i, counter: __m128i, bias: __m128) -> __m128i {
    let recip = _mm_rcp_nr_ps(_mm_cvtepi32_ps(counter));
    let quotient = _mm_mul_ps(_mm_cvtepi32_ps(sum), recip);
    _mm_cvttps_epi32(_mm_add_ps(quotient, bias))
}

/// All ones in lanes where `|a - b| <= threshold`, zeroes elsewhere.
#[inline(always)]
pub(crate) unsafe fn _mm_admit_epu8(a: __m128i, b: __m128i, threshold: __m128i) -> __m128i {
    let abs_diff = _mm_or_si128(_mm_subs_epu8(a, b), _mm_subs_epu8(b, a));
    _mm_cmpeq_epi8(_mm_subs_epu8(abs_diff, threshold), _mm_setzero_si128())
}

/// All ones in lanes where `|a - b| <= threshold`, zeroes elsewhere.
#[inline(always)]
pub(crate) unsafe fn _mm_admit_epu16(a: __m128i, b: __m128i, threshold: __m128i) -> __m128i {
    let abs_diff = _mm_or_si128(_mm_subs_epu16(a, b), _mm_subs_epu16(b, a));
    _mm_cmpeq_epi16(_mm_subs_epu16(abs_diff, threshold), _mm_setzero_si128())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rcp_nr_precision() {
        if !std::arch::is_x86_feature_detected!("sse4.1") {
            return;
        }
        for counter in 2..=227 {
            let mut lanes = [0f32; 4];
            unsafe {
                let r = _mm_rcp_nr_ps(_mm_set1_ps(counter as f32));
                _mm_storeu_ps(lanes.as_mut_ptr(), r);
            }
            let expected = 1f32 / counter as f32;
            let rel = ((lanes[0] - expected) / expected).abs();
            assert!(rel < 1e-6, "counter {counter}: relative error {rel}");
        }
    }

    #[test]
    fn test_admit_is_less_or_equal() {
        let mut lanes = [0u8; 16];
        unsafe {
            let a = _mm_set1_epi8(100);
            let b = _mm_setr_epi8(
                90, 91, 95, 99, 100, 101, 105, 109, 110, 111, 0, 127, -1, 50, 100, 109,
            );
            let mask = _mm_admit_epu8(a, b, _mm_set1_epi8(9));
            _mm_storeu_si128(lanes.as_mut_ptr() as *mut _, mask);
        }
        assert_eq!(
            lanes,
            [0, 255, 255, 255, 255, 255, 255, 255, 0, 0, 0, 0, 0, 0, 255, 255]
        );
    }
}
