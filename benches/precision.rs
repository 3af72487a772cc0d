// Cost of each method as the requested number of decimals grows.

use criterion::{Criterion, BenchmarkId, criterion_group, criterion_main};
use rootfinder::RootFinder;

mod common;

fn bench_precision(c: &mut Criterion) {
    let mut group = c.benchmark_group("precision");
    for precision in [2, 4, 6, 8, 10, 12] {
        let mut s = 0.;
        for p in common::problems() {
            let rf = RootFinder::new(precision, 200, p.f).derivative(p.df);
            // Sanity check outside of the timed loop.
            s += rf.bisection(p.a, p.b).map_or(0., |sol| sol.root);
            group.bench_function(
                BenchmarkId::new(format!("bisection/{}", p.name), precision),
                |b| b.iter(|| rf.bisection(p.a, p.b)));
            group.bench_function(
                BenchmarkId::new(format!("newton_raphson/{}", p.name),
                                 precision),
                |b| b.iter(|| rf.newton_raphson(p.x0)));
            group.bench_function(
                BenchmarkId::new(format!("secant/{}", p.name), precision),
                |b| b.iter(|| rf.secant(&[p.a, p.b])));
        }
        println!("precision {}: sum of roots {}", precision, s);
    }
}

criterion_group!(benches, bench_precision);
criterion_main!(benches);
