//! Benchmarks du calcul complet (bornes → couleurs → vues)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use subzone::{Dashboard, FeatureStore, Mode, Selection, Series, SubzoneFeature, DEFAULT_YEARS};

fn synthetic_store(size: usize) -> FeatureStore {
    let features = (0..size)
        .map(|i| {
            let mut f = SubzoneFeature::new(format!("SUBZONE {}", i));
            f.capacity = (i % 200) as i64;
            f.population = DEFAULT_YEARS
                .iter()
                .map(|&y| (y, ((i * 7 + y as usize) % 300) as f64))
                .collect::<Series>();
            f.net_supply = DEFAULT_YEARS
                .iter()
                .map(|&y| (y, ((i * 13 + y as usize) % 400) as f64 - 200.0))
                .collect::<Series>();
            f
        })
        .collect();
    FeatureStore::from_features(features)
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");

    for size in [332usize, 5_000] {
        let store = synthetic_store(size);
        for mode in [Mode::DemandMismatch, Mode::Population] {
            let selection = Selection::new(mode, 2026).with_subzone("SUBZONE 1");
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), size),
                &selection,
                |b, selection| {
                    b.iter(|| {
                        let dashboard = Dashboard::compute(black_box(&store), selection);
                        black_box(dashboard.table())
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_dashboard);
criterion_main!(benches);
