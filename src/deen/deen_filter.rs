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
use crate::deen::deen_handler::{DeenPass, DeenRowDispatch, DeenRowHandler};
use crate::deen::params::{DeenParams, DivisionMode, InstructionSet};
use crate::deen::reciprocal::ReciprocalTable;
use crate::util::ColumnRangeError;
use crate::{DeenError, DeenImage, DeenImageMut, DeenSample, ThreadingPolicy};
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::prelude::ParallelSliceMut;
use std::ops::Range;

/// Resolved threshold bounded denoiser.
///
/// Parameters are validated, the threshold is rescaled to the bit depth and the
/// row kernel is selected once, then the filter may run over any number of planes.
#[derive(Clone)]
pub struct DeenFilter<T> {
    handler: DeenRowHandler<T>,
    instruction_set: InstructionSet,
    params: DeenParams,
    bit_depth: u32,
    threshold: u32,
    table: ReciprocalTable,
}

fn resolve_filter<T: DeenSample + DeenRowDispatch>(
    params: DeenParams,
    bit_depth: u32,
) -> Result<DeenFilter<T>, DeenError> {
    params.validate()?;
    if !(T::MIN_BIT_DEPTH..=T::MAX_BIT_DEPTH).contains(&bit_depth) {
        return Err(DeenError::UnsupportedBitDepth(bit_depth));
    }
    if params.division == DivisionMode::FixedPoint && bit_depth > 8 {
        return Err(DeenError::FixedPointRequires8Bit(bit_depth));
    }
    let threshold = params.scaled_threshold(bit_depth);
    let (handler, instruction_set) = T::row_handler(params.division, params.isa_limit);
    log::debug!(
        "deen: {} bit planes, radius {}, threshold {} (scaled {}), {:?} division on {:?}",
        bit_depth,
        params.radius,
        params.threshold,
        threshold,
        params.division,
        instruction_set
    );
    Ok(DeenFilter {
        handler,
        instruction_set,
        params,
        bit_depth,
        threshold,
        table: ReciprocalTable::new(),
    })
}

impl DeenFilter<u8> {
    /// Creates a filter for 8 bit planes.
    pub fn new(params: DeenParams) -> Result<DeenFilter<u8>, DeenError> {
        resolve_filter::<u8>(params, 8)
    }
}

impl DeenFilter<u16> {
    /// Creates a filter for planes of `bit_depth` bits stored in `u16`, `bit_depth` in 8..=16.
    ///
    /// [DivisionMode::FixedPoint] is accepted only with 8 bit depth.
    pub fn with_bit_depth(
        params: DeenParams,
        bit_depth: u32,
    ) -> Result<DeenFilter<u16>, DeenError> {
        resolve_filter::<u16>(params, bit_depth)
    }
}

impl<T: DeenSample> DeenFilter<T> {
    /// Instruction set of the selected row kernel.
    pub fn instruction_set(&self) -> InstructionSet {
        self.instruction_set
    }

    pub fn radius(&self) -> u32 {
        self.params.radius
    }

    /// Threshold rescaled to the bit depth of the plane.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    pub fn params(&self) -> DeenParams {
        self.params
    }

    /// Filters the whole plane.
    ///
    /// # Arguments
    ///
    /// * `src`: Source plane, see [DeenImage] for more info
    /// * `dst`: Destination plane, see [DeenImageMut] for more info,
    ///   owned storage is resized to the source geometry
    /// * `threading_policy`: Threading policy according to [ThreadingPolicy]
    pub fn execute(
        &self,
        src: &DeenImage<T>,
        dst: &mut DeenImageMut<T>,
        threading_policy: ThreadingPolicy,
    ) -> Result<(), DeenError> {
        src.check_layout()?;
        let width = src.width as usize;
        self.execute_columns(src, dst, 0..width, threading_policy)
    }

    /// Filters only `columns` of every row, other destination columns are left untouched.
    ///
    /// Windows still read neighbors outside of `columns`, so adjacent tiles
    /// produce the same result as a single call over the whole plane.
    pub fn execute_columns(
        &self,
        src: &DeenImage<T>,
        dst: &mut DeenImageMut<T>,
        columns: Range<usize>,
        threading_policy: ThreadingPolicy,
    ) -> Result<(), DeenError> {
        src.check_layout()?;
        dst.check_layout(Some(src))?;
        src.size_matches_mut(dst)?;

        let width = src.width as usize;
        let height = src.height as usize;
        if columns.start >= columns.end || columns.end > width {
            return Err(DeenError::ColumnRangeOutOfBounds(ColumnRangeError {
                start: columns.start,
                end: columns.end,
                width,
            }));
        }

        let pass = DeenPass {
            width,
            height,
            first_column: columns.start,
            last_column: columns.end,
            threshold: self.threshold,
            radius: self.params.radius as usize,
            table: &self.table,
        };

        let src_stride = src.row_stride() as usize;
        let dst_stride = dst.row_stride() as usize;
        let src_data = src.data.as_ref();
        let handler = self.handler;

        let thread_count = threading_policy.thread_count(src.width, src.height, self.params.radius);
        log::trace!(
            "deen: {}x{} columns {}..{} on {} thread(s)",
            width,
            height,
            columns.start,
            columns.end,
            thread_count
        );

        let pool = if thread_count == 1 {
            None
        } else {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(thread_count)
                .build()
            {
                Ok(pool) => Some(pool),
                Err(err) => {
                    log::warn!("deen: can't build thread pool, running single threaded: {err}");
                    None
                }
            }
        };

        let dst_data = dst.data.borrow_mut();

        if let Some(pool) = &pool {
            pool.install(|| {
                dst_data
                    .par_chunks_mut(dst_stride)
                    .take(height)
                    .enumerate()
                    .for_each(|(y, dst_row)| {
                        handler(src_data, src_stride, dst_row, y, &pass);
                    });
            });
        } else {
            dst_data
                .chunks_mut(dst_stride)
                .take(height)
                .enumerate()
                .for_each(|(y, dst_row)| {
                    handler(src_data, src_stride, dst_row, y, &pass);
                });
        }

        Ok(())
    }
}

/// Threshold bounded denoiser on an 8 bit plane.
///
/// Every sample is replaced with the rounded mean of its `(2 * radius + 1)^2` window,
/// where a neighbor is admitted only while `|center - neighbor| < threshold`
/// and the center is counted twice. Windows are clipped at the plane borders.
///
/// # Arguments
///
/// * `src`: Source plane, see [DeenImage] for more info
/// * `dst`: Destination plane, see [DeenImageMut] for more info
/// * `params`: See [DeenParams] for more info
/// * `threading_policy`: Threading policy according to [ThreadingPolicy]
pub fn deen_filter(
    src: &DeenImage<u8>,
    dst: &mut DeenImageMut<u8>,
    params: DeenParams,
    threading_policy: ThreadingPolicy,
) -> Result<(), DeenError> {
    DeenFilter::<u8>::new(params)?.execute(src, dst, threading_policy)
}

/// Threshold bounded denoiser on a high bit depth plane.
///
/// # Arguments
///
/// * `src`: Source plane, see [DeenImage] for more info
/// * `dst`: Destination plane, see [DeenImageMut] for more info
/// * `bit_depth`: Bit depth of the samples, in 8..=16
/// * `params`: See [DeenParams] for more info, the threshold is rescaled to `bit_depth`
/// * `threading_policy`: Threading policy according to [ThreadingPolicy]
pub fn deen_filter_u16(
    src: &DeenImage<u16>,
    dst: &mut DeenImageMut<u16>,
    bit_depth: u32,
    params: DeenParams,
    threading_policy: ThreadingPolicy,
) -> Result<(), DeenError> {
    DeenFilter::<u16>::with_bit_depth(params, bit_depth)?.execute(src, dst, threading_policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deen::deen_scalar::tests::reference_plane;
    use num_traits::AsPrimitive;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::num::NonZeroUsize;

    const WIDTHS: [usize; 12] = [1, 2, 3, 7, 15, 16, 17, 31, 33, 47, 64, 75];
    const HEIGHTS: [usize; 4] = [1, 2, 5, 9];

    fn random_plane<T: DeenSample>(
        rng: &mut StdRng,
        len: usize,
        low: u32,
        high: u32,
    ) -> Vec<T> {
        (0..len)
            .map(|_| T::from_u32(rng.random_range(low..=high)))
            .collect()
    }

    fn assert_within_one<T: DeenSample>(
        expected: &[T],
        received: &[T],
        width: usize,
        context: &str,
    ) {
        for (i, (&e, &r)) in expected.iter().zip(received.iter()).enumerate() {
            let e: u32 = e.as_();
            let r: u32 = r.as_();
            assert!(
                e.abs_diff(r) <= 1,
                "{context}: x {}, y {}, expected {e}, received {r}",
                i % width,
                i / width
            );
        }
    }

    fn check_against_reference<T: DeenSample>(
        filter: &DeenFilter<T>,
        rng: &mut StdRng,
        max_value: u32,
    ) {
        for &width in WIDTHS.iter() {
            for &height in HEIGHTS.iter() {
                // Narrow band keeps many neighbors around the threshold.
                let band = max_value / 4;
                let src = if (width + height) % 2 == 0 {
                    random_plane::<T>(rng, width * height, 0, max_value)
                } else {
                    random_plane::<T>(rng, width * height, band, band * 2)
                };
                let expected = reference_plane(
                    &src,
                    width,
                    height,
                    filter.radius() as usize,
                    filter.threshold(),
                );
                let src_image = DeenImage::borrow(&src, width as u32, height as u32);
                let mut dst_image = DeenImageMut::default();
                filter
                    .execute(&src_image, &mut dst_image, ThreadingPolicy::Single)
                    .unwrap();
                assert_within_one(
                    &expected,
                    dst_image.data.borrow(),
                    width,
                    &format!(
                        "{:?} {:?} {}x{} radius {} threshold {}",
                        filter.instruction_set(),
                        filter.params().division,
                        width,
                        height,
                        filter.radius(),
                        filter.threshold()
                    ),
                );
            }
        }
    }

    #[test]
    fn test_u8_kernels_match_reference() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for isa in [
            InstructionSet::Scalar,
            InstructionSet::Sse41,
            InstructionSet::Avx2,
        ] {
            for division in [DivisionMode::FixedPoint, DivisionMode::Reciprocal] {
                for radius in 1..=7 {
                    for threshold in [2, 10, 60, 255] {
                        let params = DeenParams::new(radius, threshold)
                            .with_division(division)
                            .with_isa_limit(isa);
                        let filter = DeenFilter::<u8>::new(params).unwrap();
                        assert!(filter.instruction_set() <= isa);
                        check_against_reference(&filter, &mut rng, 255);
                    }
                }
            }
        }
    }

    #[test]
    fn test_u16_kernels_match_reference() {
        let mut rng = StdRng::seed_from_u64(0xdee);
        for isa in [
            InstructionSet::Scalar,
            InstructionSet::Sse41,
            InstructionSet::Avx2,
        ] {
            for bit_depth in [10, 12, 16] {
                for radius in [1, 3, 7] {
                    for threshold in [2, 20, 255] {
                        let params = DeenParams::new(radius, threshold).with_isa_limit(isa);
                        let filter = DeenFilter::<u16>::with_bit_depth(params, bit_depth).unwrap();
                        check_against_reference(&filter, &mut rng, (1 << bit_depth) - 1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_exact_division_equals_reference() {
        let mut rng = StdRng::seed_from_u64(7);
        let (width, height) = (41, 13);
        let src = random_plane::<u8>(&mut rng, width * height, 0, 255);
        for radius in 1..=7 {
            let params = DeenParams::new(radius, 40).with_division(DivisionMode::Exact);
            let filter = DeenFilter::<u8>::new(params).unwrap();
            assert_eq!(filter.instruction_set(), InstructionSet::Scalar);
            let mut dst = DeenImageMut::default();
            filter
                .execute(
                    &DeenImage::borrow(&src, width as u32, height as u32),
                    &mut dst,
                    ThreadingPolicy::Single,
                )
                .unwrap();
            let expected = reference_plane(&src, width, height, radius as usize, 40);
            assert_eq!(dst.data.borrow(), expected.as_slice(), "radius {radius}");
        }
    }

    #[test]
    fn test_single_outlier_is_kept() {
        let mut src = vec![100u8; 25];
        src[12] = 200;
        for isa in [
            InstructionSet::Scalar,
            InstructionSet::Sse41,
            InstructionSet::Avx2,
        ] {
            for division in [
                DivisionMode::Exact,
                DivisionMode::FixedPoint,
                DivisionMode::Reciprocal,
            ] {
                let params = DeenParams::new(1, 50)
                    .with_division(division)
                    .with_isa_limit(isa);
                let mut dst = DeenImageMut::default();
                deen_filter(
                    &DeenImage::borrow(&src, 5, 5),
                    &mut dst,
                    params,
                    ThreadingPolicy::Single,
                )
                .unwrap();
                // Every neighbor of the outlier differs by 100, so only its doubled self remains.
                assert_eq!(dst.data.borrow(), src.as_slice(), "{isa:?} {division:?}");
            }
        }
    }

    #[test]
    fn test_strided_planes() {
        let mut rng = StdRng::seed_from_u64(11);
        let (width, height, src_stride, dst_stride) = (37usize, 10usize, 45usize, 40usize);
        let src = random_plane::<u16>(&mut rng, src_stride * height, 0, 1023);
        let packed: Vec<u16> = src
            .chunks(src_stride)
            .flat_map(|row| row[..width].iter().copied())
            .collect();
        let threshold = DeenParams::new(2, 30).scaled_threshold(10);
        let expected = reference_plane(&packed, width, height, 2, threshold);

        let mut dst = vec![u16::MAX; dst_stride * height];
        let src_image =
            DeenImage::borrow_with_stride(&src, width as u32, height as u32, src_stride as u32);
        let mut dst_image = DeenImageMut::borrow_with_stride(
            &mut dst,
            width as u32,
            height as u32,
            dst_stride as u32,
        );
        deen_filter_u16(
            &src_image,
            &mut dst_image,
            10,
            DeenParams::new(2, 30),
            ThreadingPolicy::Single,
        )
        .unwrap();

        for (y, row) in dst.chunks(dst_stride).enumerate() {
            assert_within_one(
                &expected[y * width..(y + 1) * width],
                &row[..width],
                width,
                "strided",
            );
            assert!(row[width..].iter().all(|&v| v == u16::MAX), "padding written at row {y}");
        }
    }

    #[test]
    fn test_multithreaded_equals_single() {
        let mut rng = StdRng::seed_from_u64(3);
        let (width, height) = (300usize, 211usize);
        let src = random_plane::<u8>(&mut rng, width * height, 0, 255);
        let src_image = DeenImage::borrow(&src, width as u32, height as u32);
        let filter = DeenFilter::<u8>::new(DeenParams::new(4, 25)).unwrap();

        let mut single = DeenImageMut::default();
        filter
            .execute(&src_image, &mut single, ThreadingPolicy::Single)
            .unwrap();
        for policy in [
            ThreadingPolicy::Adaptive,
            ThreadingPolicy::Fixed(NonZeroUsize::new(4).unwrap()),
        ] {
            let mut threaded = DeenImageMut::default();
            filter.execute(&src_image, &mut threaded, policy).unwrap();
            assert_eq!(single.data.borrow(), threaded.data.borrow(), "{policy:?}");
        }
    }

    #[test]
    fn test_column_tiles_equal_whole_plane() {
        let mut rng = StdRng::seed_from_u64(5);
        let (width, height) = (90usize, 17usize);
        let src = random_plane::<u8>(&mut rng, width * height, 0, 255);
        let src_image = DeenImage::borrow(&src, width as u32, height as u32);
        let filter = DeenFilter::<u8>::new(DeenParams::new(3, 30)).unwrap();

        let mut whole = DeenImageMut::default();
        filter
            .execute(&src_image, &mut whole, ThreadingPolicy::Single)
            .unwrap();

        let mut tiled = DeenImageMut::alloc(width as u32, height as u32);
        for columns in [0..13, 13..50, 50..51, 51..90] {
            filter
                .execute_columns(&src_image, &mut tiled, columns, ThreadingPolicy::Single)
                .unwrap();
        }
        assert_eq!(whole.data.borrow(), tiled.data.borrow());

        let mut partial = DeenImageMut::alloc(width as u32, height as u32);
        filter
            .execute_columns(&src_image, &mut partial, 20..40, ThreadingPolicy::Single)
            .unwrap();
        for (y, (row, expected)) in partial
            .data
            .borrow()
            .chunks(width)
            .zip(whole.data.borrow().chunks(width))
            .enumerate()
        {
            assert!(row[..20].iter().all(|&v| v == 0), "row {y} left of range");
            assert_eq!(&row[20..40], &expected[20..40], "row {y}");
            assert!(row[40..].iter().all(|&v| v == 0), "row {y} right of range");
        }
    }

    #[test]
    fn test_configuration_errors() {
        assert_eq!(
            DeenFilter::<u8>::new(DeenParams::new(0, 10)).err(),
            Some(DeenError::RadiusOutOfRange(0))
        );
        assert_eq!(
            DeenFilter::<u8>::new(DeenParams::new(2, 300)).err(),
            Some(DeenError::ThresholdOutOfRange(300))
        );
        assert_eq!(
            DeenFilter::<u16>::with_bit_depth(DeenParams::new(2, 10), 17).err(),
            Some(DeenError::UnsupportedBitDepth(17))
        );
        assert_eq!(
            DeenFilter::<u16>::with_bit_depth(DeenParams::new(2, 10), 7).err(),
            Some(DeenError::UnsupportedBitDepth(7))
        );
        let fixed = DeenParams::new(2, 10).with_division(DivisionMode::FixedPoint);
        assert_eq!(
            DeenFilter::<u16>::with_bit_depth(fixed, 10).err(),
            Some(DeenError::FixedPointRequires8Bit(10))
        );
        assert!(DeenFilter::<u16>::with_bit_depth(fixed, 8).is_ok());
        let filter = DeenFilter::<u16>::with_bit_depth(DeenParams::new(2, 10), 16).unwrap();
        assert_eq!(filter.threshold(), 2570);
        assert_eq!(filter.bit_depth(), 16);
    }

    #[test]
    fn test_execution_errors() {
        let filter = DeenFilter::<u8>::new(DeenParams::default()).unwrap();
        let src = vec![0u8; 16 * 4];
        let src_image = DeenImage::borrow(&src, 16, 4);

        let mut small = vec![0u8; 16 * 3];
        let mut small_image = DeenImageMut::borrow(&mut small, 16, 3);
        assert_eq!(
            filter.execute(&src_image, &mut small_image, ThreadingPolicy::Single),
            Err(DeenError::ImagesMustMatch)
        );

        let mut dst = DeenImageMut::default();
        assert_eq!(
            filter.execute_columns(&src_image, &mut dst, 4..17, ThreadingPolicy::Single),
            Err(DeenError::ColumnRangeOutOfBounds(ColumnRangeError {
                start: 4,
                end: 17,
                width: 16
            }))
        );
        assert_eq!(
            filter.execute_columns(&src_image, &mut dst, 4..4, ThreadingPolicy::Single),
            Err(DeenError::ColumnRangeOutOfBounds(ColumnRangeError {
                start: 4,
                end: 4,
                width: 16
            }))
        );

        let empty: Vec<u8> = vec![];
        let mut dst = DeenImageMut::default();
        assert_eq!(
            filter.execute(&DeenImage::borrow(&empty, 0, 0), &mut dst, ThreadingPolicy::Single),
            Err(DeenError::ZeroBaseSize)
        );
    }
}
