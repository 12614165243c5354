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
    bit_depth: u8,
    samples: Vec<u16>,
}

fuzz_target!(|data: DeenInput| {
    let width = data.width as usize;
    let height = data.height as usize;
    if width == 0 || height == 0 || data.samples.is_empty() {
        return;
    }
    let radius = (data.radius % 7) as u32 + 1;
    let threshold = (data.threshold as u32).max(2);
    let bit_depth = (data.bit_depth % 9) as u32 + 8;
    let max_value = ((1u32 << bit_depth) - 1) as u16;

    let src = data
        .samples
        .iter()
        .map(|&v| v.min(max_value))
        .cycle()
        .take(width * height)
        .collect::<Vec<u16>>();
    let src_image = DeenImage::borrow(&src, width as u32, height as u32);

    let exact = DeenParams::new(radius, threshold).with_division(DivisionMode::Exact);
    let mut reference = DeenImageMut::default();
    DeenFilter::<u16>::with_bit_depth(exact, bit_depth)
        .unwrap()
        .execute(&src_image, &mut reference, ThreadingPolicy::Single)
        .unwrap();

    let filter =
        DeenFilter::<u16>::with_bit_depth(DeenParams::new(radius, threshold), bit_depth).unwrap();
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
            e.abs_diff(r) <= 1 && r <= max_value,
            "{:?} {} bit at x {}, y {}: expected {}, received {}",
            filter.instruction_set(),
            bit_depth,
            i % width,
            i / width,
            e,
            r
        );
    }
});
