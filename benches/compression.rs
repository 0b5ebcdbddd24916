use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lexpack_rs::{tokenize, Codec, DelimiterClass, Dictionary};

/// Generate prose that the bundled dictionary mostly covers
fn generate_prose(size: usize) -> String {
    let sentences = [
        "The old man said it was cold. ",
        "\"Come here,\" she said to the dog.\n",
        "Did you see the sky? ",
        "It was not the time to move!\n\n",
        "YES, the world is big; ",
        "one day we will go there...\t",
    ];

    let mut result = String::new();
    let mut i = 0;
    while result.len() < size {
        result.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    result
}

/// Generate words the dictionary never matches, so every field is a literal
fn generate_literals(size: usize) -> String {
    let chars = "bcdfghjklmnpqrstvwxz";
    let mut result = String::new();
    let mut seed = 12345u64;

    while result.len() < size {
        // Simple LCG random
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        let len = 3 + (seed % 6) as usize;
        for _ in 0..len {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            let idx = (seed % chars.len() as u64) as usize;
            result.push_str(&chars[idx..idx + 1]);
        }
        result.push(' ');
    }
    result
}

fn bench_compress(c: &mut Criterion) {
    let dictionary = Dictionary::builtin();
    let codec = Codec::new(&dictionary);
    let sizes = [1_000, 10_000, 100_000];
    let mut group = c.benchmark_group("compress");

    for size in sizes.iter() {
        let prose = generate_prose(*size);
        let literals = generate_literals(*size);
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::new("prose", size), &prose, |b, data| {
            b.iter(|| black_box(codec.compress(black_box(data)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("literals", size), &literals, |b, data| {
            b.iter(|| black_box(codec.compress(black_box(data)).unwrap()));
        });
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let dictionary = Dictionary::builtin();
    let codec = Codec::new(&dictionary);
    let sizes = [1_000, 10_000, 100_000];
    let mut group = c.benchmark_group("decompress");

    for size in sizes.iter() {
        // Pre-compressed inputs
        let prose = codec.compress(&generate_prose(*size)).unwrap();
        let literals = codec.compress(&generate_literals(*size)).unwrap();
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::new("prose", size), &prose, |b, data| {
            b.iter(|| black_box(codec.decompress(black_box(data)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("literals", size), &literals, |b, data| {
            b.iter(|| black_box(codec.decompress(black_box(data)).unwrap()));
        });
    }

    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 100_000];
    let mut group = c.benchmark_group("tokenize");

    for size in sizes.iter() {
        let data = generate_prose(*size);

        group.bench_with_input(BenchmarkId::new("all", size), &data, |b, data| {
            b.iter(|| {
                let count = tokenize(black_box(data), DelimiterClass::ALL).len();
                black_box(count)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_tokenize);
criterion_main!(benches);
