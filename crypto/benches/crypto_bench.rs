use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nis_types::NetworkId;

fn ed25519_sign_bench(c: &mut Criterion) {
    let kp = nis_crypto::keypair_from_seed(&[7u8; 32]);
    let msg = [42u8; 128];

    c.bench_function("ed25519_sign_128B", |b| {
        b.iter(|| nis_crypto::sign_message(black_box(&msg), &kp.private))
    });
}

fn ed25519_verify_bench(c: &mut Criterion) {
    let kp = nis_crypto::keypair_from_seed(&[7u8; 32]);
    let msg = [42u8; 128];
    let sig = nis_crypto::sign_message(&msg, &kp.private);

    c.bench_function("ed25519_verify_128B", |b| {
        b.iter(|| nis_crypto::verify_signature(black_box(&msg), &sig, &kp.public))
    });
}

fn blake2b_256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("blake2b_256_256B", |b| {
        b.iter(|| nis_crypto::blake2b_256(black_box(&data)))
    });
}

fn derive_address_bench(c: &mut Criterion) {
    let kp = nis_crypto::keypair_from_seed(&[7u8; 32]);

    c.bench_function("derive_address", |b| {
        b.iter(|| nis_crypto::derive_address(NetworkId::Test, black_box(&kp.public)))
    });
}

criterion_group!(
    benches,
    ed25519_sign_bench,
    ed25519_verify_bench,
    blake2b_256_bench,
    derive_address_bench,
);
criterion_main!(benches);
