use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use glyphcrypt::{condense, decondense, encrypt, CharsetRegistry, CryptRequest, COMMON_REPLACERS};

fn bench_charset_encode(c: &mut Criterion) {
    let registry = CharsetRegistry::with_defaults();
    let charset = registry.get("eb").unwrap().clone();
    let mut group = c.benchmark_group("charset_encode");

    for size in [64usize, 256, 1024] {
        let hex: String = "0123456789abcdef".chars().cycle().take(size).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("{size}"), |b| {
            b.iter(|| charset.encode(black_box(&hex)).unwrap());
        });
    }
    group.finish();
}

fn bench_condense(c: &mut Criterion) {
    let bits: String = "0110100111000011".chars().cycle().take(8192).collect();
    let condensed = condense(&bits, &COMMON_REPLACERS);

    c.bench_function("condense_8k_bits", |b| {
        b.iter(|| condense(black_box(&bits), &COMMON_REPLACERS));
    });
    c.bench_function("decondense_8k_bits", |b| {
        b.iter(|| decondense(black_box(&condensed), &COMMON_REPLACERS));
    });
}

fn bench_encrypt(c: &mut Criterion) {
    let registry = CharsetRegistry::with_defaults();
    let request = CryptRequest::new("benchmark message", "testkey", "1234567890123456");

    // Dominated by the deliberately slow key derivation.
    c.bench_function("encrypt_default", |b| {
        b.iter(|| encrypt(black_box(&request), &registry).unwrap());
    });
}

criterion_group!(benches, bench_charset_encode, bench_condense, bench_encrypt);
criterion_main!(benches);
