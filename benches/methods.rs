use criterion::{Criterion, BenchmarkId, criterion_group, criterion_main};
use rootfinder::RootFinder;

mod common;

fn bench_methods(c: &mut Criterion) {
    let precision = 10;
    let epsilon = 1e-10;

    let mut group = c.benchmark_group("methods");
    for p in common::problems() {
        let rf = RootFinder::new(precision, 100, p.f);
        let rf_df = RootFinder::new(precision, 100, p.f).derivative(p.df);
        group.bench_function(
            BenchmarkId::new("bisection", p.name),
            |b| b.iter(|| rf.bisection(p.a, p.b)));
        group.bench_function(
            BenchmarkId::new("newton_raphson", p.name),
            |b| b.iter(|| rf_df.newton_raphson(p.x0)));
        group.bench_function(
            BenchmarkId::new("newton_raphson (finite diff.)", p.name),
            |b| b.iter(|| rf.newton_raphson(p.x0)));
        group.bench_function(
            BenchmarkId::new("secant", p.name),
            |b| b.iter(|| rf.secant(&[p.a, p.b])));
        group.bench_function(
            BenchmarkId::new("roots::newton_raphson", p.name),
            |b| b.iter(|| {
                let mut tol = common::Tol { epsilon, maxiter: 100 };
                roots::find_root_newton_raphson(p.x0, p.f, p.df, &mut tol)
            }));
        group.bench_function(
            BenchmarkId::new("roots::secant", p.name),
            |b| b.iter(|| {
                let mut tol = common::Tol { epsilon, maxiter: 100 };
                roots::find_root_secant(p.a, p.b, p.f, &mut tol)
            }));
        group.bench_function(
            BenchmarkId::new("roots::brent", p.name),
            |b| b.iter(|| {
                let mut tol = common::Tol { epsilon, maxiter: 100 };
                roots::find_root_brent(p.a, p.b, p.f, &mut tol)
            }));
    }
}

criterion_group!(benches, bench_methods);
criterion_main!(benches);
