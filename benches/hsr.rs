use std::hint::black_box;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use hsr_indicator::HsrIndicator;
use hsr_indicator::ReferenceBox;
use hsr_indicator::indicator::moments;
use ndarray::Array2;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::Uniform;

/// Points on the linear front `sum(a) = 1`, perturbed inside the unit box.
fn linear_front(n: usize, d: usize, seed: u64) -> Array2<f64> {
  let mut rng = StdRng::seed_from_u64(seed);
  let unif = Uniform::new(0.0, 1.0);
  let mut a = Array2::from_shape_fn((n, d), |_| rng.sample(unif));
  for mut row in a.rows_mut() {
    let s = row.sum();
    row.mapv_inplace(|v| 0.95 * v / s);
  }
  a
}

fn bench_moments(c: &mut Criterion) {
  let mut group = c.benchmark_group("moments");

  for &n in &[16, 64, 256, 1024] {
    let a = linear_front(n, 3, 1);
    let rb = ReferenceBox::unit(3);
    group.bench_with_input(BenchmarkId::new("d3", n), &n, |b, _| {
      b.iter(|| black_box(moments(a.view(), &rb)))
    });
  }

  group.finish();
}

fn bench_indicator(c: &mut Criterion) {
  let mut group = c.benchmark_group("hsr");
  let engine = HsrIndicator::default();

  for &n in &[10, 50, 200] {
    let a = linear_front(n, 2, 2);
    let rb = ReferenceBox::unit(2);
    group.bench_with_input(BenchmarkId::new("d2", n), &n, |b, _| {
      b.iter(|| black_box(engine.compute(a.view(), &rb, true)))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_moments, bench_indicator);
criterion_main!(benches);
