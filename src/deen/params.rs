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
use crate::DeenError;

/// Smallest accepted window radius.
pub const MIN_RADIUS: u32 = 1;
/// Largest accepted window radius, a 15x15 window.
pub const MAX_RADIUS: u32 = 7;
/// Smallest accepted user facing threshold.
pub const MIN_THRESHOLD: u32 = 2;
/// Largest accepted user facing threshold.
pub const MAX_THRESHOLD: u32 = 255;

/// How the window mean `sum / counter` is resolved to an output sample.
///
/// All modes agree with [DivisionMode::Exact] within one unit per sample.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum DivisionMode {
    /// Integer division `(sum * 2 + counter) / (counter * 2)`.
    ///
    /// Always runs the portable kernel, this is the reference result.
    Exact,
    /// Multiply-high against a table of `round(65536 / counter)`.
    ///
    /// Available only for 8 bit planes.
    FixedPoint,
    /// Hardware reciprocal estimate refined with one Newton-Raphson step.
    #[default]
    Reciprocal,
}

/// Upper bound for the instruction set used by the filter.
///
/// The best kernel not above the bound that the CPU supports is selected.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum InstructionSet {
    /// Portable scalar kernel.
    Scalar,
    /// 128 bit SSE4.1 kernels.
    Sse41,
    /// 256 bit AVX2 kernels.
    #[default]
    Avx2,
}

/// Threshold bounded denoiser parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeenParams {
    /// Window radius, the window is `2 * radius + 1` samples wide, in 1..=7.
    pub radius: u32,
    /// Neighbor admission threshold on the 8 bit scale, in 2..=255.
    /// Neighbors are averaged only while `|center - neighbor| < threshold`.
    pub threshold: u32,
    /// See [DivisionMode] for more info.
    pub division: DivisionMode,
    /// See [InstructionSet] for more info.
    pub isa_limit: InstructionSet,
}

impl Default for DeenParams {
    fn default() -> Self {
        DeenParams {
            radius: 1,
            threshold: 10,
            division: DivisionMode::default(),
            isa_limit: InstructionSet::default(),
        }
    }
}

impl DeenParams {
    pub fn new(radius: u32, threshold: u32) -> DeenParams {
        DeenParams {
            radius,
            threshold,
            ..Default::default()
        }
    }

    pub fn with_division(self, division: DivisionMode) -> DeenParams {
        DeenParams { division, ..self }
    }

    pub fn with_isa_limit(self, isa_limit: InstructionSet) -> DeenParams {
        DeenParams { isa_limit, ..self }
    }

    pub fn validate(&self) -> Result<(), DeenError> {
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&self.radius) {
            return Err(DeenError::RadiusOutOfRange(self.radius));
        }
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&self.threshold) {
            return Err(DeenError::ThresholdOutOfRange(self.threshold));
        }
        Ok(())
    }

    /// Rescales 8 bit threshold to the given bit depth.
    #[inline]
    pub fn scaled_threshold(&self, bit_depth: u32) -> u32 {
        let pixel_max = (1u32 << bit_depth) - 1;
        self.threshold * pixel_max / 255
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_rejects_out_of_range() {
        assert_eq!(DeenParams::new(1, 10).validate(), Ok(()));
        assert_eq!(DeenParams::new(7, 255).validate(), Ok(()));
        assert_eq!(
            DeenParams::new(0, 10).validate(),
            Err(DeenError::RadiusOutOfRange(0))
        );
        assert_eq!(
            DeenParams::new(8, 10).validate(),
            Err(DeenError::RadiusOutOfRange(8))
        );
        assert_eq!(
            DeenParams::new(3, 1).validate(),
            Err(DeenError::ThresholdOutOfRange(1))
        );
        assert_eq!(
            DeenParams::new(3, 256).validate(),
            Err(DeenError::ThresholdOutOfRange(256))
        );
    }

    #[test]
    fn test_threshold_scaling() {
        let params = DeenParams::new(1, 10);
        assert_eq!(params.scaled_threshold(8), 10);
        assert_eq!(params.scaled_threshold(10), 40);
        assert_eq!(params.scaled_threshold(16), 2570);
        assert_eq!(DeenParams::new(1, 255).scaled_threshold(16), 65535);
        assert_eq!(DeenParams::new(1, 2).scaled_threshold(12), 32);
    }
}
