use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use studyblob_benchmark::{build_blob, make_volumes};
use studyblob_core::decode;

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for elements in [1_024usize, 256 * 1_024] {
        let volumes = make_volumes(4, elements);
        group.throughput(Throughput::Bytes((4 * elements * 4) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(elements), &volumes, |b, v| {
            b.iter(|| black_box(build_blob(v).expect("build")))
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for elements in [1_024usize, 256 * 1_024] {
        let blob = build_blob(&make_volumes(4, elements)).expect("build");
        group.throughput(Throughput::Bytes(blob.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(elements), &blob, |b, blob| {
            b.iter(|| {
                let study = decode(black_box(blob)).expect("decode");
                black_box(study.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_decode);
criterion_main!(benches);
