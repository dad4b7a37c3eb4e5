use criterion::{Criterion, criterion_group, criterion_main};
use polyagamma::{Method, PolyaGamma};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Draws per timed iteration
const NS: [usize; 1] = [10000];
const HS: [f64; 4] = [0.5, 1.0, 5.0, 10.0];
const ZS: [f64; 4] = [0.0, 0.5, 1.0, 2.0];

fn bench_polya_gamma(cr: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for method in [Method::Hybrid, Method::Gamma] {
        let mut pg = PolyaGamma::new(1.0).unwrap().with_method(method);
        for &h in &HS {
            pg.set_shape(h).unwrap();
            for &n in &NS {
                for &z in &ZS {
                    let bench_name = format!("draw_{method}_n{n}_h{h:.1}_z{z:.1}");
                    cr.bench_function(&bench_name, |bench| {
                        bench.iter(|| {
                            for _ in 0..n {
                                pg.draw(&mut rng, z).unwrap();
                            }
                        });
                    });
                }
            }
        }
    }
}

#[cfg(feature = "rayon")]
fn bench_polya_gamma_par(cr: &mut Criterion) {
    let mut pg = PolyaGamma::new(1.0).unwrap();

    for &h in &HS {
        pg.set_shape(h).unwrap();
        for &n in &NS {
            for &z in &ZS {
                let bench_name = format!("draw_par_n{n}_h{h:.1}_z{z:.1}");
                let tilts = vec![z; n];
                cr.bench_function(&bench_name, |bench| {
                    bench.iter(|| pg.draw_vec_par(&tilts).unwrap());
                });
            }
        }
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .sample_size(10);
    targets = bench_polya_gamma
);

// Only include parallel benchmarks if rayon feature is enabled
#[cfg(feature = "rayon")]
criterion_group!(
    name = parallel_benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .sample_size(10);
    targets = bench_polya_gamma_par
);

#[cfg(not(feature = "rayon"))]
criterion_main!(benches);

#[cfg(feature = "rayon")]
criterion_main!(benches, parallel_benches);
