//! Thread safety of the shared name cache and map simplification.

use std::sync::Arc;
use std::thread;

use canonical::{cache_len, normalize, normalize_uncached, to_identifier, NormalizeMode};
use dronereport::{page_properties, simplify_map};
use serde_json::Value;

const PAGE: &str = include_str!("fixtures/drone_page.json");

const SHARED_KEYS: &[&str] = &[
    "Nome da Fazenda",
    "NOME  DA   FAZENDA",
    "Área Útil (ha)",
    "Hectares Pulverizados",
    "Papel Hidrossensível (foto)",
    "Velocidade do Vento (km/h)",
    "Data e horário de início",
];

#[test]
fn concurrent_normalize_shared_keys() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                let mut out = Vec::new();
                for _ in 0..50 {
                    for key in SHARED_KEYS {
                        out.push((
                            *key,
                            normalize(key, NormalizeMode::Strict),
                            normalize(key, NormalizeMode::Flexible),
                            to_identifier(key),
                        ));
                    }
                }
                out
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        for (key, strict, flexible, ident) in handle.join().unwrap() {
            assert_eq!(
                strict,
                normalize_uncached(key, NormalizeMode::Strict),
                "thread {i} strict {key:?}"
            );
            assert_eq!(
                flexible,
                normalize_uncached(key, NormalizeMode::Flexible),
                "thread {i} flexible {key:?}"
            );
            assert_eq!(ident, to_identifier(key), "thread {i} identifier {key:?}");
        }
    }
}

#[test]
fn concurrent_normalize_distinct_keys_stays_bounded() {
    let handles: Vec<_> = (0..8)
        .map(|t| {
            thread::spawn(move || {
                for n in 0..600 {
                    let key = format!("Coluna Extra {t}-{n} (ç)");
                    assert_eq!(
                        normalize(&key, NormalizeMode::Strict),
                        normalize_uncached(&key, NormalizeMode::Strict),
                    );
                    assert_eq!(
                        normalize(&key, NormalizeMode::Flexible),
                        normalize_uncached(&key, NormalizeMode::Flexible),
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(cache_len() <= 2048, "cache grew to {}", cache_len());
}

#[test]
fn concurrent_simplify_map_matches_single_threaded() {
    let page: Value = serde_json::from_str(PAGE).expect("fixture parses");
    let page = Arc::new(page);
    let expected = simplify_map(page_properties(&page).expect("fixture has properties"));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let page = Arc::clone(&page);
            thread::spawn(move || {
                let properties = page_properties(&page).expect("fixture has properties");
                simplify_map(properties)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), expected, "thread {i} produced a different map");
    }
    assert!(cache_len() <= 2048);
}
