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

/// Count of table slots, the largest counter is 227 for a 15x15 window
/// with a doubly counted center, and it must be a valid index.
pub(crate) const MAX_PIXEL_COUNT: usize = 227 + 1;

/// Fixed point reciprocals `round(65536 / counter)` for every reachable counter.
///
/// Built once per filter configuration and read only afterwards.
#[derive(Clone)]
pub(crate) struct ReciprocalTable {
    pub(crate) magic: [u16; MAX_PIXEL_COUNT],
}

impl ReciprocalTable {
    pub(crate) fn new() -> ReciprocalTable {
        let mut magic = [0u16; MAX_PIXEL_COUNT];
        for (counter, dst) in magic.iter_mut().enumerate().skip(2) {
            *dst = (65536f64 / counter as f64 + 0.5) as u16;
        }
        ReciprocalTable { magic }
    }
}

impl Default for ReciprocalTable {
    fn default() -> Self {
        ReciprocalTable::new()
    }
}

/// Resolves window accumulator into an output sample.
pub(crate) trait Divider {
    fn divide(sum: u32, counter: u32, table: &ReciprocalTable) -> u32;
}

/// `round(sum / counter)` with integer arithmetic.
pub(crate) struct ExactDivider {}

/// `(sum + counter / 2) * magic[counter] >> 16`.
///
/// `sum + counter / 2` must fit into 16 bits, which holds for 8 bit samples.
pub(crate) struct FixedPointDivider {}

/// Single precision reciprocal with a biased truncation.
pub(crate) struct ReciprocalDivider {}

impl Divider for ExactDivider {
    #[inline(always)]
    fn divide(sum: u32, counter: u32, _: &ReciprocalTable) -> u32 {
        (sum * 2 + counter) / (counter * 2)
    }
}

impl Divider for FixedPointDivider {
    #[inline(always)]
    fn divide(sum: u32, counter: u32, table: &ReciprocalTable) -> u32 {
        let magic = unsafe { *table.magic.get_unchecked(counter as usize) } as u64;
        (((sum + (counter >> 1)) as u64 * magic) >> 16) as u32
    }
}

/// Bias applied before truncation, slightly above one half so that
/// an underestimated reciprocal still rounds halves up.
pub(crate) const RECIPROCAL_ROUNDING_BIAS: f32 = 0.501f32;

impl Divider for ReciprocalDivider {
    #[inline(always)]
    fn divide(sum: u32, counter: u32, _: &ReciprocalTable) -> u32 {
        let recip = 1f32 / counter as f32;
        (sum as f32 * recip + RECIPROCAL_ROUNDING_BIAS) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        let table = ReciprocalTable::new();
        assert_eq!(table.magic[2], 32768);
        assert_eq!(table.magic[3], 21845);
        assert_eq!(table.magic[10], 6554);
        assert_eq!(table.magic[227], 289);
    }

    #[test]
    fn test_dividers_agree_within_one() {
        let table = ReciprocalTable::new();
        for counter in 2..MAX_PIXEL_COUNT as u32 {
            let max_sum = counter * 255;
            for sum in (0..=max_sum).step_by(7) {
                let exact = ExactDivider::divide(sum, counter, &table);
                let fixed = FixedPointDivider::divide(sum, counter, &table);
                let recip = ReciprocalDivider::divide(sum, counter, &table);
                assert!(
                    exact.abs_diff(fixed) <= 1,
                    "Fixed point diverged for sum {sum} counter {counter}: {exact} vs {fixed}"
                );
                assert!(
                    exact.abs_diff(recip) <= 1,
                    "Reciprocal diverged for sum {sum} counter {counter}: {exact} vs {recip}"
                );
                assert!(fixed <= 255 && recip <= 255);
            }
        }
    }

    #[test]
    fn test_exact_rounds_halves_up() {
        let table = ReciprocalTable::new();
        // 1200 / 10 = 120, 1205 / 10 = 120.5
        assert_eq!(ExactDivider::divide(1200, 10, &table), 120);
        assert_eq!(ExactDivider::divide(1205, 10, &table), 121);
        assert_eq!(ExactDivider::divide(1204, 10, &table), 120);
    }
}
