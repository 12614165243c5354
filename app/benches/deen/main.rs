use criterion::{criterion_group, criterion_main, Criterion};
use libdeen::{
    DeenFilter, DeenImage, DeenImageMut, DeenParams, DivisionMode, InstructionSet,
    ThreadingPolicy,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn noisy_plane(max_value: u32) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..WIDTH * HEIGHT)
        .map(|i| {
            let base = (i % WIDTH) * max_value / WIDTH;
            let noise = rng.random_range(0..=max_value / 16);
            (base + noise).min(max_value)
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let plane8 = noisy_plane(255)
        .iter()
        .map(|&v| v as u8)
        .collect::<Vec<u8>>();
    let plane16 = noisy_plane(1023)
        .iter()
        .map(|&v| v as u16)
        .collect::<Vec<u16>>();
    let src8 = DeenImage::borrow(&plane8, WIDTH, HEIGHT);
    let src16 = DeenImage::borrow(&plane16, WIDTH, HEIGHT);

    for isa in [
        InstructionSet::Scalar,
        InstructionSet::Sse41,
        InstructionSet::Avx2,
    ] {
        for division in [DivisionMode::FixedPoint, DivisionMode::Reciprocal] {
            let params = DeenParams::new(3, 12)
                .with_division(division)
                .with_isa_limit(isa);
            let filter = DeenFilter::<u8>::new(params).unwrap();
            c.bench_function(
                &format!(
                    "libdeen: Plane u8 r3 {:?} (limit {:?}) {:?}",
                    filter.instruction_set(),
                    isa,
                    division
                ),
                |b| {
                    let mut dst = DeenImageMut::alloc(WIDTH, HEIGHT);
                    b.iter(|| {
                        filter
                            .execute(&src8, &mut dst, ThreadingPolicy::Single)
                            .unwrap();
                    })
                },
            );
        }

        let params = DeenParams::new(3, 12).with_isa_limit(isa);
        let filter = DeenFilter::<u16>::with_bit_depth(params, 10).unwrap();
        c.bench_function(
            &format!(
                "libdeen: Plane u16 r3 {:?} (limit {:?})",
                filter.instruction_set(),
                isa
            ),
            |b| {
                let mut dst = DeenImageMut::alloc(WIDTH, HEIGHT);
                b.iter(|| {
                    filter
                        .execute(&src16, &mut dst, ThreadingPolicy::Single)
                        .unwrap();
                })
            },
        );
    }

    let filter = DeenFilter::<u8>::new(DeenParams::new(7, 20)).unwrap();
    c.bench_function("libdeen: Plane u8 r7 adaptive threading", |b| {
        let mut dst = DeenImageMut::alloc(WIDTH, HEIGHT);
        b.iter(|| {
            filter
                .execute(&src8, &mut dst, ThreadingPolicy::Adaptive)
                .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
