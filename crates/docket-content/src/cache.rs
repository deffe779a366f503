//! Memoization keyed by serialized arguments.
//!
//! Guide content is baked into each deployment, so a computed page never
//! goes stale: entries live as long as the cache and are never evicted.
//! The keyspace is the set of pages, which is bounded.
//!
//! Concurrent misses on the same key are coalesced. The first caller runs
//! the computation and the rest wait for its result, so a page is read at
//! most once even when many requests for it arrive together. A failed
//! computation stores nothing, and the next caller tries again.
//!
//! The cache is an ordinary value owned by whoever builds the loader, so
//! tests can use a fresh instance each.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use docket_core::{Error, Result};
use serde::Serialize;
use tokio::sync::OnceCell;

type Slot<V> = Arc<OnceCell<Arc<V>>>;

/// A single-flight memo cache.
///
/// # Example
///
/// ```
/// use docket_content::MemoCache;
///
/// # tokio_test::block_on(async {
/// let cache: MemoCache<String> = MemoCache::new();
/// let first = cache
///     .get_or_try_init(&["auth"], || async { Ok("computed".to_string()) })
///     .await
///     .unwrap();
/// let second = cache
///     .get_or_try_init(&["auth"], || async { Ok("recomputed".to_string()) })
///     .await
///     .unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// # });
/// ```
pub struct MemoCache<V> {
    slots: Mutex<HashMap<String, Slot<V>>>,
}

impl<V> Default for MemoCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for MemoCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("entries", &self.len())
            .finish()
    }
}

impl<V> MemoCache<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// The stable key for `args`: its JSON serialization.
    pub fn key_for<A: Serialize + ?Sized>(args: &A) -> Result<String> {
        serde_json::to_string(args).map_err(|e| Error::serialization(format!("cache key: {e}")))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot<V>>> {
        // Slots are only ever inserted or removed whole, so a poisoned map is still consistent.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, key: &str) -> Slot<V> {
        let mut slots = self.lock();
        Arc::clone(
            slots
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new())),
        )
    }

    /// Return the stored value for `args`, computing it with `init` on a miss.
    ///
    /// # Errors
    ///
    /// Returns the error from `init`, or a serialization error if `args`
    /// cannot be turned into a key.
    pub async fn get_or_try_init<A, F, Fut>(&self, args: &A, init: F) -> Result<Arc<V>>
    where
        A: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let key = Self::key_for(args)?;
        let slot = self.slot(&key);

        if let Some(value) = slot.get() {
            log::debug!("cache hit for {key}");
            return Ok(Arc::clone(value));
        }

        let miss = key.as_str();
        let result = slot
            .get_or_try_init(move || async move {
                log::debug!("cache miss for {miss}");
                init().await.map(Arc::new)
            })
            .await
            .map(Arc::clone);

        match result {
            Ok(value) => {
                // A failed caller may have dropped this slot while we waited on it.
                self.lock().entry(key).or_insert_with(|| Arc::clone(&slot));
                Ok(value)
            }
            Err(e) => {
                self.discard_empty(&key, &slot);
                Err(e)
            }
        }
    }

    /// Remove `slot` from the map if it is still the one stored for `key`
    /// and holds no value.
    fn discard_empty(&self, key: &str, slot: &Slot<V>) {
        let mut slots = self.lock();
        let stale = slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && !current.initialized());
        if stale {
            slots.remove(key);
        }
    }

    /// The stored value for `args`, if any.
    pub fn get<A: Serialize + ?Sized>(&self, args: &A) -> Result<Option<Arc<V>>> {
        let key = Self::key_for(args)?;
        Ok(self.lock().get(&key).and_then(|slot| slot.get().cloned()))
    }

    /// Store `value` for `args`, replacing any previous value.
    pub fn insert<A: Serialize + ?Sized>(&self, args: &A, value: V) -> Result<Arc<V>> {
        let key = Self::key_for(args)?;
        let value = Arc::new(value);
        let slot = Arc::new(OnceCell::new_with(Some(Arc::clone(&value))));
        self.lock().insert(key, slot);
        Ok(value)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored value.
    pub fn clear(&self) {
        self.lock().clear();
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_computes_once_per_key() {
        let cache: MemoCache<usize> = MemoCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_try_init(&["database", "overview"], || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .unwrap();
            assert_eq!(*value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_hits_are_reference_equal() {
        let cache: MemoCache<String> = MemoCache::new();
        let a = cache
            .get_or_try_init("k", || async { Ok("v".to_string()) })
            .await
            .unwrap();
        let b = cache
            .get_or_try_init("k", || async { Ok("other".to_string()) })
            .await
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*b, "v");
    }

    #[tokio::test]
    async fn test_distinct_keys() {
        let cache: MemoCache<String> = MemoCache::new();
        let a = cache
            .get_or_try_init(&["auth"], || async { Ok("auth".to_string()) })
            .await
            .unwrap();
        let b = cache
            .get_or_try_init(&["storage"], || async { Ok("storage".to_string()) })
            .await
            .unwrap();
        assert_eq!(*a, "auth");
        assert_eq!(*b, "storage");
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache: MemoCache<u32> = MemoCache::new();

        let err = cache
            .get_or_try_init("k", || async { Err(Error::invalid_frontmatter("missing `title`")) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFrontmatter(_)));
        assert!(cache.is_empty());
        assert!(cache.get("k").unwrap().is_none());

        let value = cache
            .get_or_try_init("k", || async { Ok(1) })
            .await
            .unwrap();
        assert_eq!(*value, 1);
    }

    #[tokio::test]
    async fn test_failed_lookups_leave_no_slots() {
        let cache: MemoCache<u32> = MemoCache::new();

        for i in 0..1000 {
            let page = format!("missing-{i}");
            let result = cache
                .get_or_try_init(&["database", page.as_str()], || async {
                    Err(Error::not_found("no such guide"))
                })
                .await;
            assert!(result.is_err());
        }

        assert_eq!(cache.slot_count(), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_failure_then_success_keeps_one_slot() {
        let cache: MemoCache<u32> = MemoCache::new();
        let _ = cache
            .get_or_try_init("k", || async { Err(Error::invalid_data("boom")) })
            .await;
        cache.get_or_try_init("k", || async { Ok(3) }).await.unwrap();

        assert_eq!(cache.slot_count(), 1);
        assert_eq!(*cache.get("k").unwrap().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_misses_are_coalesced() {
        let cache: Arc<MemoCache<usize>> = Arc::new(MemoCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_try_init("slow", || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok(42)
                        })
                        .await
                        .unwrap()
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(*task.await.unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_insert_get_and_clear() {
        let cache: MemoCache<&str> = MemoCache::new();
        assert!(cache.get(&["a"]).unwrap().is_none());

        cache.insert(&["a"], "first").unwrap();
        assert_eq!(*cache.get(&["a"]).unwrap().unwrap(), "first");

        cache.insert(&["a"], "second").unwrap();
        assert_eq!(*cache.get(&["a"]).unwrap().unwrap(), "second");
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_for_is_json() {
        assert_eq!(
            MemoCache::<()>::key_for(&["database", "overview"]).unwrap(),
            r#"["database","overview"]"#
        );
    }
}
