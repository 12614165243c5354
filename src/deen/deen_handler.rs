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
use crate::deen::deen_scalar::deen_row_scalar;
use crate::deen::params::{DivisionMode, InstructionSet};
use crate::deen::reciprocal::{
    ExactDivider, FixedPointDivider, ReciprocalDivider, ReciprocalTable,
};

/// Everything a row kernel needs besides the planes themselves.
#[derive(Copy, Clone)]
pub(crate) struct DeenPass<'a> {
    pub(crate) width: usize,
    pub(crate) height: usize,
    /// Columns `first_column..last_column` of each row are written.
    pub(crate) first_column: usize,
    pub(crate) last_column: usize,
    /// Threshold already rescaled to the bit depth of the plane.
    pub(crate) threshold: u32,
    pub(crate) radius: usize,
    pub(crate) table: &'a ReciprocalTable,
}

/// Filters row `y` of `src` into `dst`, which is that row of the destination.
pub(crate) type DeenRowHandler<T> =
    fn(src: &[T], src_stride: usize, dst: &mut [T], y: usize, pass: &DeenPass);

/// Resolves the row kernel once per filter configuration.
pub(crate) trait DeenRowDispatch: Sized {
    fn row_handler(
        division: DivisionMode,
        isa_limit: InstructionSet,
    ) -> (DeenRowHandler<Self>, InstructionSet);
}

fn scalar_handler<T: crate::DeenSample>(division: DivisionMode) -> DeenRowHandler<T> {
    match division {
        DivisionMode::Exact => deen_row_scalar::<T, ExactDivider>,
        DivisionMode::FixedPoint => deen_row_scalar::<T, FixedPointDivider>,
        DivisionMode::Reciprocal => deen_row_scalar::<T, ReciprocalDivider>,
    }
}

impl DeenRowDispatch for u8 {
    #[allow(unused_variables)]
    fn row_handler(
        division: DivisionMode,
        isa_limit: InstructionSet,
    ) -> (DeenRowHandler<u8>, InstructionSet) {
        if division == DivisionMode::Exact {
            return (scalar_handler(division), InstructionSet::Scalar);
        }
        let fixed_point = division == DivisionMode::FixedPoint;
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        {
            if isa_limit >= InstructionSet::Avx2 && std::arch::is_x86_feature_detected!("avx2") {
                use crate::deen::avx::deen_row_avx_u8;
                let handler: DeenRowHandler<u8> = if fixed_point {
                    deen_row_avx_u8::<true>
                } else {
                    deen_row_avx_u8::<false>
                };
                return (handler, InstructionSet::Avx2);
            }
        }
        #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
        {
            if isa_limit >= InstructionSet::Sse41 && std::arch::is_x86_feature_detected!("sse4.1")
            {
                use crate::deen::sse::deen_row_sse_u8;
                let handler: DeenRowHandler<u8> = if fixed_point {
                    deen_row_sse_u8::<true>
                } else {
                    deen_row_sse_u8::<false>
                };
                return (handler, InstructionSet::Sse41);
            }
        }
        (scalar_handler(division), InstructionSet::Scalar)
    }
}

impl DeenRowDispatch for u16 {
    #[allow(unused_variables)]
    fn row_handler(
        division: DivisionMode,
        isa_limit: InstructionSet,
    ) -> (DeenRowHandler<u16>, InstructionSet) {
        // Vector 16 bit kernels divide through the reciprocal only.
        if division != DivisionMode::Reciprocal {
            return (scalar_handler(division), InstructionSet::Scalar);
        }
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        {
            if isa_limit >= InstructionSet::Avx2 && std::arch::is_x86_feature_detected!("avx2") {
                use crate::deen::avx::deen_row_avx_u16;
                return (deen_row_avx_u16, InstructionSet::Avx2);
            }
        }
        #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
        {
            if isa_limit >= InstructionSet::Sse41 && std::arch::is_x86_feature_detected!("sse4.1")
            {
                use crate::deen::sse::deen_row_sse_u16;
                return (deen_row_sse_u16, InstructionSet::Sse41);
            }
        }
        (scalar_handler(division), InstructionSet::Scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_is_always_scalar() {
        let (_, isa) = u8::row_handler(DivisionMode::Exact, InstructionSet::Avx2);
        assert_eq!(isa, InstructionSet::Scalar);
        let (_, isa) = u16::row_handler(DivisionMode::Exact, InstructionSet::Avx2);
        assert_eq!(isa, InstructionSet::Scalar);
    }

    #[test]
    fn test_isa_limit_is_respected() {
        for division in [DivisionMode::FixedPoint, DivisionMode::Reciprocal] {
            let (_, isa) = u8::row_handler(division, InstructionSet::Scalar);
            assert_eq!(isa, InstructionSet::Scalar);
            let (_, isa) = u8::row_handler(division, InstructionSet::Sse41);
            assert!(isa <= InstructionSet::Sse41);
        }
        let (_, isa) = u16::row_handler(DivisionMode::Reciprocal, InstructionSet::Sse41);
        assert!(isa <= InstructionSet::Sse41);
    }
}
