use criterion::{criterion_group, criterion_main, Criterion};
use downhill::{analyze, classify};
use terrain::geo::geometry::Coord;

fn rolling_descent(n: u32) -> (Vec<f64>, Vec<Coord<f64>>) {
    let elevations = (0..n)
        .map(|i| {
            let i = f64::from(i);
            2000.0 - 0.5 * i + 8.0 * (i / 25.0).sin()
        })
        .collect();
    let coords = (0..n)
        .map(|i| Coord {
            x: 7.0,
            y: 46.0 + f64::from(i) * 0.000_135,
        })
        .collect();
    (elevations, coords)
}

fn route_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("Route Scoring");
    let (elevations, coords) = rolling_descent(10_000);

    group.bench_with_input("analyze", &elevations, |b, e| b.iter(|| analyze(e)));
    group.bench_with_input("classify", &(elevations, coords), |b, (e, c)| {
        b.iter(|| classify(e, c))
    });
}

criterion_group!(benches, route_scoring);
criterion_main!(benches);
