use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hexframe::{consts::MAX_SINGLE_FRAME_PAYLOAD, ColorMatch, Decoder};

fn payloads() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("4 KiB", (0..4096u32).map(|i| (i * 31) as u8).collect()),
        ("256 KiB", (0..256 * 1024u32).map(|i| (i * 31) as u8).collect()),
        (
            "full frame",
            (0..MAX_SINGLE_FRAME_PAYLOAD as u32)
                .map(|i| (i * 31) as u8)
                .collect(),
        ),
    ]
}

fn encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for (name, payload) in payloads() {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", name), &payload, |b, input| {
            b.iter(|| hexframe::encode(input))
        });
    }

    group.finish();
}

fn decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for (name, payload) in payloads() {
        let frame = hexframe::encode_single(&payload).unwrap();

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("exact", name), &frame, |b, frame| {
            b.iter(|| hexframe::decode(frame).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("nearest", name), &frame, |b, frame| {
            let decoder = Decoder::new().with_color_match(ColorMatch::Nearest);
            b.iter(|| decoder.decode(frame).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, encode, decode);
criterion_main!(benches);
