use bsmp_client::constants::MAX_MESSAGE;
use bsmp_client::frame;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_codec");
    let payload = vec![0xAB_u8; 512];
    let mut buf = [0u8; MAX_MESSAGE];

    group.bench_function("encode_512", |b| {
        b.iter(|| frame::encode(black_box(0x10), black_box(&payload), &mut buf).unwrap())
    });

    let n = frame::encode(0x10, &payload, &mut buf).unwrap();
    group.bench_function("decode_512", |b| {
        b.iter(|| frame::decode(black_box(&buf), black_box(n)).unwrap())
    });

    group.bench_function("encode_decode_empty", |b| {
        b.iter(|| {
            let n = frame::encode(black_box(0xE0), black_box(&[]), &mut buf).unwrap();
            frame::decode(black_box(&buf), n).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
