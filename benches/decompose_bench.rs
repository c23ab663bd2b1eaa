use criterion::{criterion_group, criterion_main, Criterion, black_box};
use requant::{decompose, decompose_with, Rounding};

fn make_multipliers(n: usize) -> Vec<f64> {
    let mut seed = 0x1234_5678_9abc_def0u64;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        // exponents in [-12, 6)
        let e = ((seed >> 40) as f64 / (1u64 << 24) as f64) * 18.0 - 12.0;
        out.push(10f64.powf(e));
    }
    out
}

fn bench_decompose(c: &mut Criterion) {
    let ms = make_multipliers(1024);
    c.bench_function("decompose_1024_mixed", |b| {
        b.iter(|| {
            for &m in &ms {
                black_box(decompose(black_box(m)).ok());
            }
        })
    });
    c.bench_function("decompose_ties_even_1024_mixed", |b| {
        b.iter(|| {
            for &m in &ms {
                black_box(decompose_with(black_box(m), Rounding::HalfToEven).ok());
            }
        })
    });
}

criterion_group!(benches, bench_decompose);
criterion_main!(benches);
