use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fortuna::primitives::{HashAlgorithm, KEY_SIZE};
use fortuna::{Aes256Ctr, Fortuna, Generator, GeneratorConfig, MemorySeedStore, Seed};

fn bench_generate_block(c: &mut Criterion) {
    let mut generator = Generator::new(
        &Seed::from_bytes([0x42; KEY_SIZE]),
        HashAlgorithm::Sha256,
        Aes256Ctr,
        GeneratorConfig::default(),
    );

    c.bench_function("generate_block", |b| {
        b.iter(|| black_box(generator.generate_block().unwrap()))
    });
}

fn bench_random_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_bytes");
    let mut rng =
        Fortuna::open(MemorySeedStore::with_seed(Seed::from_bytes([0x42; KEY_SIZE]))).unwrap();

    for size in [16usize, 1024, 64 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(rng.random_bytes(size).unwrap()))
        });
    }
    group.finish();
}

fn bench_reseed(c: &mut Criterion) {
    let mut rng =
        Fortuna::open(MemorySeedStore::with_seed(Seed::from_bytes([0x42; KEY_SIZE]))).unwrap();

    c.bench_function("add_entropy_and_reseed", |b| {
        b.iter(|| {
            for source in 0..32u32 {
                rng.add_entropy(&source.to_le_bytes(), source);
            }
            rng.reseed().unwrap();
        })
    });
}

criterion_group!(benches, bench_generate_block, bench_random_bytes, bench_reseed);
criterion_main!(benches);
