use guomi::signatures::sm2::{curve, generate_key, sign, verify};

use criterion::{Criterion, criterion_group, criterion_main};
use rand_core::OsRng;
use std::hint::black_box;

const ID: &[u8] = b"1234567812345678";
const MSG: &[u8] = b"message digest";

pub fn bench_sm2(c: &mut Criterion) {
    let key = generate_key(curve(), &mut OsRng).unwrap();
    let sig = sign(&mut OsRng, &key, ID, MSG).unwrap();

    c.bench_function("sm2 keygen", |b| {
        b.iter(|| generate_key(curve(), &mut OsRng).unwrap())
    });

    c.bench_function("sm2 sign", |b| {
        b.iter(|| sign(&mut OsRng, &key, ID, black_box(MSG)).unwrap())
    });

    c.bench_function("sm2 verify", |b| {
        b.iter(|| verify(key.public_key(), ID, black_box(MSG), sig.as_ref()))
    });
}

criterion_group!(benches, bench_sm2);
criterion_main!(benches);
