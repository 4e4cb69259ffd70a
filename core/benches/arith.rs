use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cownum_core::prelude::*;

criterion_group!(arith, integer_benchmark, rational_benchmark, ieee_benchmark);
criterion_main!(arith);

fn integer_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer");
    for &n in &[100_u32, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("factorial", n), &n, |b, &n| {
            b.iter(|| Integer::factorial(n))
        });
        let x = Integer::factorial(n);
        let y = Integer::fibonacci(n);
        group.bench_with_input(BenchmarkId::new("mul", n), &n, |b, _| b.iter(|| &x * &y));
        group.bench_with_input(BenchmarkId::new("div_rem_floor", n), &n, |b, _| {
            b.iter(|| x.div_rem_floor(&y).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("to_string", n), &n, |b, _| {
            b.iter(|| x.to_string())
        });
    }
    group.finish();
}

fn rational_benchmark(c: &mut Criterion) {
    c.bench_function("rational/harmonic_100", |b| {
        b.iter(|| {
            (1..=100)
                .map(|k| Rational::new(1, k).unwrap())
                .sum::<Rational>()
        })
    });
}

fn ieee_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ieee");
    for &prec in &[53_u32, 256, 4096] {
        group.bench_with_input(BenchmarkId::new("pi", prec), &prec, |b, &prec| {
            b.iter(|| IeeeFloat::pi(prec, Round::Nearest))
        });
        let (x, _) = IeeeFloat::from_i64(2, prec, Round::Nearest);
        group.bench_with_input(BenchmarkId::new("sqrt", prec), &prec, |b, _| {
            b.iter(|| x.sqrt_round(Round::Nearest).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("exp", prec), &prec, |b, _| {
            b.iter(|| x.exp(Round::Nearest))
        });
    }
    group.finish();
}
