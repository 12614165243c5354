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
pub(crate) unsafe fn _mm256_rcp_nr_ps(a: __m256) -> __m256 {
    let r = _mm256_rcp_ps(a);
    _mm256_sub_ps(_mm256_add_ps(r, r), _mm256_mul_ps(_mm256_mul_ps(r, a), r))
}

/// Rounded `sum / counter` for 32 bit lanes through the refined reciprocal.
#[inline(always)]
pub(crate) unsafe fn _mm256_div_rcp_epi32(
    sum: __m256i,
    counter: __m256i,
    bias: __m256,
) -> __m256i {
    let recip = _mm256_rcp_nr_ps(_mm256_cvtepi32_ps(counter));
    let quotient = _mm256_mul_ps(_mm256_cvtepi32_ps(sum), recip);
    _mm256_cvttps_epi32(_mm256_add_ps(quotient, bias))
}

/// All ones in lanes where `|a - b| <= threshold`, zeroes elsewhere.
#[inline(always)]
pub(crate) unsafe fn _mm256_admit_epu8(a: __m256i, b: __m256i, threshold: __m256i) -> __m256i {
    let abs_diff = _mm256_or_si256(_mm256_subs_epu8(a, b), _mm256_subs_epu8(b, a));
    _mm256_cmpeq_epi8(_mm256_subs_epu8(abs_diff, threshold), _mm256_setzero_si256())
}

/// All ones in lanes where `|a - b| <= threshold`, zeroes elsewhere.
#[inline(always)]
pub(crate) unsafe fn _mm256_admit_epu16(a: __m256i, b: __m256i, threshold: __m256i) -> __m256i {
    let abs_diff = _mm256_or_si256(_mm256_subs_epu16(a, b), _mm256_subs_epu16(b, a));
    _mm256_cmpeq_epi16(_mm256_subs_epu16(abs_diff, threshold), _mm256_setzero_si256())
}
