use guomi::hash::sm3::{Sm3, sm3};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_sm3(c: &mut Criterion) {
    c.bench_function("sm3 64 bytes", |b| b.iter(|| sm3(black_box(&[0u8; 64]))));

    let mut group = c.benchmark_group("sm3 streaming");
    for size in [1024usize, 16 * 1024] {
        let data = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut hasher = Sm3::new();
                hasher.update(black_box(data));
                hasher.finalize()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sm3);
criterion_main!(benches);
