use guomi::encryption::sm4::Sm4;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_sm4(c: &mut Criterion) {
    let key = [0x01u8; 16];

    c.bench_function("sm4 key schedule", |b| {
        b.iter(|| Sm4::new(black_box(&key)))
    });

    let cipher = Sm4::new(&key).unwrap();

    c.bench_function("sm4 encrypt block", |b| {
        let mut block = [0u8; 16];
        b.iter(|| cipher.encrypt_block(black_box(&mut block)))
    });

    c.bench_function("sm4 decrypt block", |b| {
        let mut block = [0u8; 16];
        b.iter(|| cipher.decrypt_block(black_box(&mut block)))
    });
}

criterion_group!(benches, bench_sm4);
criterion_main!(benches);
