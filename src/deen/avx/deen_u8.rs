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
use crate::deen::border::{
    border_mask, gather_window, vertical_window, ColumnSplit, WINDOW_ROWS, WINDOW_SPAN,
};
use crate::deen::deen_handler::DeenPass;
use crate::deen::reciprocal::{ReciprocalTable, RECIPROCAL_ROUNDING_BIAS};
use crate::avx::{_mm256_admit_epu8, _mm256_div_rcp_epi32};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const STEP: usize = 32;

pub(crate) fn deen_row_avx_u8<const FIXED_POINT: bool>(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    y: usize,
    pass: &DeenPass,
) {
    unsafe {
        deen_row_avx_u8_impl::<FIXED_POINT>(src, src_stride, dst, y, pass);
    }
}

#[inline(always)]
unsafe fn _mm256_magic_epu16(counter: __m256i, table: &ReciprocalTable) -> __m256i {
    let mut counters = [0u16; 16];
    _mm256_storeu_si256(counters.as_mut_ptr() as *mut _, counter);
    let mut magic = [0u16; 16];
    for (dst, &c) in magic.iter_mut().zip(counters.iter()) {
        *dst = *table.magic.get_unchecked(c as usize);
    }
    _mm256_loadu_si256(magic.as_ptr() as *const _)
}

/// Filters 32 lanes, `window` points to the top left neighbor of the first lane.
///
/// Sums stay in 16 bits, `227 * 255` still fits.
#[inline(always)]
unsafe fn deen_group_u8<const EDGE: bool, const FIXED_POINT: bool>(
    window: *const u8,
    window_stride: usize,
    center: __m256i,
    rows: usize,
    radius: usize,
    v_threshold: __m256i,
    border: &[u8],
    table: &ReciprocalTable,
) -> __m256i {
    let zeros = _mm256_setzero_si256();
    let diameter = radius * 2 + 1;

    let mut sum_lo = _mm256_slli_epi16::<1>(_mm256_unpacklo_epi8(center, zeros));
    let mut sum_hi = _mm256_slli_epi16::<1>(_mm256_unpackhi_epi8(center, zeros));
    let mut counter = _mm256_set1_epi8(2);

    for k in 0..rows {
        let row = window.add(k * window_stride);
        for j in 0..diameter {
            let neighbor = _mm256_loadu_si256(row.add(j) as *const _);
            let mut mask = _mm256_admit_epu8(center, neighbor, v_threshold);
            if EDGE {
                let inside = _mm256_loadu_si256(border.as_ptr().add(j) as *const _);
                mask = _mm256_and_si256(mask, inside);
            }
            let admitted = _mm256_and_si256(neighbor, mask);
            sum_lo = _mm256_add_epi16(sum_lo, _mm256_unpacklo_epi8(admitted, zeros));
            sum_hi = _mm256_add_epi16(sum_hi, _mm256_unpackhi_epi8(admitted, zeros));
            counter = _mm256_sub_epi8(counter, mask);
        }
    }

    let counter_lo = _mm256_unpacklo_epi8(counter, zeros);
    let counter_hi = _mm256_unpackhi_epi8(counter, zeros);

    if FIXED_POINT {
        let magic_lo = _mm256_magic_epu16(counter_lo, table);
        let magic_hi = _mm256_magic_epu16(counter_hi, table);
        let q_lo = _mm256_mulhi_epu16(
            _mm256_add_epi16(sum_lo, _mm256_srli_epi16::<1>(counter_lo)),
            magic_lo,
        );
        let q_hi = _mm256_mulhi_epu16(
            _mm256_add_epi16(sum_hi, _mm256_srli_epi16::<1>(counter_hi)),
            magic_hi,
        );
        _mm256_packus_epi16(q_lo, q_hi)
    } else {
        let bias = _mm256_set1_ps(RECIPROCAL_ROUNDING_BIAS);
        let q0 = _mm256_div_rcp_epi32(
            _mm256_unpacklo_epi16(sum_lo, zeros),
            _mm256_unpacklo_epi16(counter_lo, zeros),
            bias,
        );
        let q1 = _mm256_div_rcp_epi32(
            _mm256_unpackhi_epi16(sum_lo, zeros),
            _mm256_unpackhi_epi16(counter_lo, zeros),
            bias,
        );
        let q2 = _mm256_div_rcp_epi32(
            _mm256_unpacklo_epi16(sum_hi, zeros),
            _mm256_unpacklo_epi16(counter_hi, zeros),
            bias,
        );
        let q3 = _mm256_div_rcp_epi32(
            _mm256_unpackhi_epi16(sum_hi, zeros),
            _mm256_unpackhi_epi16(counter_hi, zeros),
            bias,
        );
        _mm256_packus_epi16(_mm256_packs_epi32(q0, q1), _mm256_packs_epi32(q2, q3))
    }
}

#[target_feature(enable = "avx2")]
unsafe fn deen_row_avx_u8_impl<const FIXED_POINT: bool>(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    y: usize,
    pass: &DeenPass,
) {
    let radius = pass.radius;
    let (top, bottom) = vertical_window(y, pass.height, radius);
    let rows = (bottom - top + 1) as usize;
    let v_threshold = _mm256_set1_epi8((pass.threshold - 1) as u8 as i8);

    let split = ColumnSplit::new(
        pass.first_column,
        pass.last_column,
        pass.width,
        radius,
        STEP,
    );

    let center_start = y * src_stride;
    let window_start = (y as isize + top) as usize * src_stride;

    for x in split.fast_groups() {
        let center =
            _mm256_loadu_si256(src.get_unchecked(center_start + x..).as_ptr() as *const _);
        let window = src.get_unchecked(window_start + x - radius..).as_ptr();
        let r = deen_group_u8::<false, FIXED_POINT>(
            window,
            src_stride,
            center,
            rows,
            radius,
            v_threshold,
            &[],
            pass.table,
        );
        _mm256_storeu_si256(dst.get_unchecked_mut(x..).as_mut_ptr() as *mut _, r);
    }

    let mut scratch = [0u8; WINDOW_SPAN * WINDOW_ROWS];
    let mut store = [0u8; STEP];
    let center_offset = (-top) as usize * WINDOW_SPAN + radius;

    for (x, lanes) in split.edge_groups() {
        gather_window(
            src,
            src_stride,
            pass.width,
            y,
            (top, bottom),
            x,
            lanes,
            radius,
            &mut scratch,
        );
        let border = border_mask::<u8>(x, pass.width, radius);
        let center =
            _mm256_loadu_si256(scratch.get_unchecked(center_offset..).as_ptr() as *const _);
        let r = deen_group_u8::<true, FIXED_POINT>(
            scratch.as_ptr(),
            WINDOW_SPAN,
            center,
            rows,
            radius,
            v_threshold,
            &border,
            pass.table,
        );
        _mm256_storeu_si256(store.as_mut_ptr() as *mut _, r);
        dst[x..x + lanes].copy_from_slice(&store[..lanes]);
    }
}
