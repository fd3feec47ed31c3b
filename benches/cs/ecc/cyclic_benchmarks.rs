use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cyclic_hamming::cs::ecc::cyclic::{flip_bit, CyclicCode, DecodeStrategy};
use cyclic_hamming::cs::ecc::gf2;
use cyclic_hamming::cs::ecc::ErrorCorrection;

fn bench_encode(c: &mut Criterion) {
    let code = CyclicCode::hamming_7_4().unwrap();
    let words: Vec<_> = (0..16u32).map(|value| gf2::from_value(value, 4)).collect();

    c.bench_function("cyclic_encode_all_words", |b| {
        b.iter(|| {
            for word in &words {
                black_box(code.encode(black_box(word)).unwrap());
            }
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    let code = CyclicCode::hamming_7_4().unwrap();
    let codeword = code.encode(&gf2::parse_bits("1011").unwrap()).unwrap();
    let received: Vec<_> = (0..7).map(|p| flip_bit(&codeword, p).unwrap()).collect();

    let mut group = c.benchmark_group("cyclic_decode_single_errors");
    for strategy in DecodeStrategy::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy),
            &strategy,
            |b, &strategy| {
                b.iter(|| {
                    for word in &received {
                        black_box(code.decode_with(black_box(word), strategy).unwrap());
                    }
                })
            },
        );
    }
    group.finish();
}

fn bench_byte_stream(c: &mut Criterion) {
    let code = CyclicCode::hamming_7_4().unwrap();
    let data: Vec<u8> = (0..1024).map(|i| (i * 31 % 251) as u8).collect();
    let encoded = ErrorCorrection::encode(&code, &data).unwrap();

    c.bench_function("cyclic_encode_1k_bytes", |b| {
        b.iter(|| ErrorCorrection::encode(&code, black_box(&data)).unwrap())
    });
    c.bench_function("cyclic_decode_1k_bytes", |b| {
        b.iter(|| ErrorCorrection::decode(&code, black_box(&encoded)).unwrap())
    });
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function("cyclic_code_construction", |b| {
        b.iter(|| CyclicCode::hamming_7_4().unwrap())
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_byte_stream,
    bench_construction
);
criterion_main!(benches);
