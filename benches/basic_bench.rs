use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use smol_bitset::{DynamicBitVector, FixedBitSet};
use std::hint::black_box;

fn alternating(len: usize) -> DynamicBitVector {
    (0..len).map(|i| i % 3 == 0).collect()
}

fn bench_single_bit(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_bit");

    group.bench_function("fixed_set", |b| {
        let mut bits: FixedBitSet!(512) = FixedBitSet::new();
        let mut i = 0;
        b.iter(|| {
            let _ = bits.set(i % 512, black_box(true));
            i += 7;
        });
    });

    group.bench_function("dynamic_set", |b| {
        let mut bits = DynamicBitVector::with_len(512).unwrap();
        let mut i = 0;
        b.iter(|| {
            let _ = bits.set(i % 512, black_box(true));
            i += 7;
        });
    });

    group.bench_function("dynamic_get", |b| {
        let bits = alternating(512);
        let mut i = 0;
        b.iter(|| {
            black_box(bits.get(i % 512));
            i += 7;
        });
    });

    group.finish();
}

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    for size in [64usize, 1024, 16384] {
        group.bench_with_input(BenchmarkId::new("grow", size), &size, |b, &size| {
            b.iter(|| {
                let mut bits = DynamicBitVector::new();
                for i in 0..size {
                    let _ = bits.push(i % 2 == 0);
                }
                black_box(bits);
            });
        });

        group.bench_with_input(BenchmarkId::new("reserved", size), &size, |b, &size| {
            b.iter(|| {
                let mut bits = DynamicBitVector::new();
                let _ = bits.reserve(size.div_ceil(8));
                for i in 0..size {
                    let _ = bits.push(i % 2 == 0);
                }
                black_box(bits);
            });
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for size in [100usize, 1000, 10000] {
        let bits = alternating(size);

        group.bench_with_input(BenchmarkId::new("count", size), &bits, |b, bits| {
            b.iter(|| black_box(bits.count()));
        });

        group.bench_with_input(BenchmarkId::new("ones", size), &bits, |b, bits| {
            b.iter(|| black_box(bits.ones().sum::<usize>()));
        });

        group.bench_with_input(BenchmarkId::new("iter", size), &bits, |b, bits| {
            b.iter(|| black_box(bits.iter().filter(|&bit| bit).count()));
        });
    }

    group.finish();
}

fn bench_shift(c: &mut Criterion) {
    let mut group = c.benchmark_group("shift");

    for k in [1usize, 8, 13] {
        let bits = alternating(4096);

        group.bench_with_input(BenchmarkId::new("down", k), &k, |b, &k| {
            b.iter(|| {
                let mut bits = bits.clone();
                bits >>= black_box(k);
                black_box(bits);
            });
        });

        group.bench_with_input(BenchmarkId::new("up", k), &k, |b, &k| {
            b.iter(|| {
                let mut bits = bits.clone();
                bits <<= black_box(k);
                black_box(bits);
            });
        });
    }

    group.finish();
}

fn bench_bitwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitwise");

    let a = alternating(4096);
    let b_bits: DynamicBitVector = (0..4096).map(|i| i % 5 == 0).collect();

    group.bench_function("and", |b| b.iter(|| black_box(&a & &b_bits)));
    group.bench_function("or", |b| b.iter(|| black_box(&a | &b_bits)));
    group.bench_function("xor", |b| b.iter(|| black_box(&a ^ &b_bits)));
    group.bench_function("not", |b| b.iter(|| black_box(!&a)));

    let x: FixedBitSet!(128) = FixedBitSet::from(0x5555_5555_5555_5555_5555_5555_5555_5555u128);
    let y: FixedBitSet!(128) = FixedBitSet::from(0x0f0f_0f0f_0f0f_0f0f_0f0f_0f0f_0f0f_0f0fu128);
    group.bench_function("fixed_and", |b| b.iter(|| black_box(black_box(x) & y)));

    group.finish();
}

criterion_group!(
    benches,
    bench_single_bit,
    bench_push,
    bench_queries,
    bench_shift,
    bench_bitwise,
);

criterion_main!(benches);
