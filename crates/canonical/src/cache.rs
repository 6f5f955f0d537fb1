//! Process-wide memo cache for normalized names.
//!
//! Bounded LRU so a long-running server fed with arbitrary keys cannot grow
//! without limit. Poisoning is ignored: entries are pure values, a panic in
//! another thread cannot leave one half-written.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use once_cell::sync::Lazy;

use crate::mode::NormalizeMode;

const CAPACITY: NonZeroUsize = match NonZeroUsize::new(2048) {
    Some(n) => n,
    None => panic!("cache capacity must be non-zero"),
};

static NAME_CACHE: Lazy<Mutex<LruCache<(NormalizeMode, String), String>>> =
    Lazy::new(|| Mutex::new(LruCache::new(CAPACITY)));

pub(crate) fn get_or_insert_with<F>(raw: &str, mode: NormalizeMode, compute: F) -> String
where
    F: FnOnce() -> String,
{
    let key = (mode, raw.to_owned());
    {
        let mut guard = NAME_CACHE
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(hit) = guard.get(&key) {
            return hit.clone();
        }
    }

    // Computed outside the lock; a racing thread may compute the same value,
    // which is harmless for a pure function.
    let value = compute();
    let mut guard = NAME_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.put(key, value.clone());
    value
}

/// Number of entries currently held by the normalization cache.
pub fn cache_len() -> usize {
    NAME_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .len()
}
