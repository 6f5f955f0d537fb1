use canonical::{normalize, normalize_uncached, to_identifier, NormalizeMode};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const KEYS: &[&str] = &[
    "Data e horário de início das aplicações",
    "Nome do produtor (completo)",
    "Fotos: Clima - anemômetro e termo-higrômetro",
    "Hectares pulverizados",
    "RPM / Tipo de gota",
];

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("uncached_strict", |b| {
        b.iter(|| {
            for key in KEYS {
                black_box(normalize_uncached(black_box(key), NormalizeMode::Strict));
            }
        })
    });

    group.bench_function("cached_strict", |b| {
        b.iter(|| {
            for key in KEYS {
                black_box(normalize(black_box(key), NormalizeMode::Strict));
            }
        })
    });

    group.bench_function("identifier", |b| {
        b.iter(|| {
            for key in KEYS {
                black_box(to_identifier(black_box(key)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
