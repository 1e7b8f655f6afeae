use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stepscope_kmp::{prefix, search, Pattern};

/// Deterministic text over a small alphabet so fallbacks actually happen.
#[inline]
fn det_text(n: usize, seed: u64) -> Vec<char> {
    let mut a = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    (0..n)
        .map(|_| {
            a = a.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            ['a', 'b', 'c'][((a >> 33) % 3) as usize]
        })
        .collect()
}

fn bench_kmp(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmp_traced");
    for &n in &[64usize, 1024] {
        group.throughput(Throughput::Elements(n as u64));

        let pat = det_text(n / 8, 7);
        group.bench_function(BenchmarkId::new("prefix_build", n / 8), |b| {
            b.iter(|| black_box(prefix::build_chars(black_box(&pat))));
        });

        let text = det_text(n, 2024);
        let compiled = Pattern::from_chars(det_text(4, 11));
        group.bench_function(BenchmarkId::new("search_compiled", n), |b| {
            b.iter(|| black_box(search::search_compiled(black_box(&text), &compiled)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kmp);
criterion_main!(benches);
