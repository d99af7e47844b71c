//! Criterion benchmarks for digitalis-dtw: exact, banded, and FastDTW.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use digitalis_dtw::{banded_distance, exact_distance, BeatSeries, FastDtw, PointSeries};

fn make_beat(n: usize, offset: f64) -> BeatSeries {
    let values: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin() + offset).collect();
    BeatSeries::new(values).unwrap()
}

fn make_points(n: usize, offset: f64) -> PointSeries {
    make_beat(n, offset).to_points()
}

fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_distance");
    for &len in &[64usize, 256, 1024] {
        let a = make_beat(len, 0.0);
        let b = make_beat(len, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(len), &(a, b), |bencher, (a, b)| {
            bencher.iter(|| exact_distance(a.as_view(), b.as_view()));
        });
    }
    group.finish();
}

fn bench_banded(c: &mut Criterion) {
    let mut group = c.benchmark_group("banded_distance");
    for &width in &[2usize, 10] {
        let a = make_points(256, 0.0);
        let b = make_points(256, 1.0);
        group.bench_with_input(
            BenchmarkId::new("len256", format!("w{width}")),
            &(a, b),
            |bencher, (a, b)| {
                bencher.iter(|| banded_distance(a, b, Some(width)).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_fastdtw(c: &mut Criterion) {
    let mut group = c.benchmark_group("fastdtw_distance");
    for &len in &[64usize, 256, 1024] {
        let a = make_points(len, 0.0);
        let b = make_points(len, 1.0);
        let fast = FastDtw::new(2);
        group.bench_with_input(BenchmarkId::from_parameter(len), &(a, b), |bencher, (a, b)| {
            bencher.iter(|| fast.distance(a, b).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_exact, bench_banded, bench_fastdtw);
criterion_main!(benches);
