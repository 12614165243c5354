#![no_main]

use arbitrary::Arbitrary;
use libdeen::{DeenFilter, DeenImage, DeenImageMut, DeenParams, DivisionMode, ThreadingPolicy};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct DeenInput {
    width: u8,
    height: u8,
    radius: u8,
    threshold: u8,
    samples: Vec<u8>,
}

fuzz_target!(|data: DeenInput| {
    let width = data.width as usize;
    let height = data.height as usize;
    if width == 0 || height == 0 || data.samples.is_empty() {
        return;
    }
    let radius = (data.radius % 7) as u32 + 1;
    let threshold = (data.threshold as u32).max(2);

    let src = data
        .samples
        .iter()
        .copied()
        .cycle()
        .take(width * height)
        .collect::<Vec<u8>>();
    let src_image = DeenImage::borrow(&src, width as u32, height as u32);

    let exact = DeenParams::new(radius, threshold).with_division(DivisionMode::Exact);
    let mut reference = DeenImageMut::default();
    DeenFilter::<u8>::new(exact)
        .unwrap()
        .execute(&src_image, &mut reference, ThreadingPolicy::Single)
        .unwrap();

    for division in [DivisionMode::FixedPoint, DivisionMode::Reciprocal] {
        let params = DeenParams::new(radius, threshold).with_division(division);
        let filter = DeenFilter::<u8>::new(params).unwrap();
        let mut dst = DeenImageMut::default();
        filter
            .execute(&src_image, &mut dst, ThreadingPolicy::Single)
            .unwrap();
        for (i, (&e, &r)) in reference
            .data
            .borrow()
            .iter()
            .zip(dst.data.borrow().iter())
            .enumerate()
        {
            assert!(
                e.abs_diff(r) <= 1,
                "{:?} {:?} at x {}, y {}: expected {}, received {}",
                filter.instruction_set(),
                division,
                i % width,
                i / width,
                e,
                r
            );
        }
    }
});
