// libs/shared/utils/src/locks.rs
//
// In-process keyed locking. Callers that must run a check-then-act sequence
// for one logical key (a slot, an appointment, a patient/specialty pair)
// hold the key's guard across the whole sequence. Different keys never block
// each other.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::trace;

pub struct KeyedLocks<K> {
    name: &'static str,
    locks: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Wait until no other task holds `key`, then hold it until the guard drops.
    pub async fn lock(&self, key: K) -> KeyedGuard<'_, K> {
        let entry = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(locks.entry(key.clone()).or_default())
        };

        let guard = Arc::clone(&entry).lock_owned().await;
        trace!("{} lock acquired for {:?}", self.name, key);

        KeyedGuard {
            registry: self,
            key,
            entry,
            _guard: guard,
        }
    }

    /// Number of keys currently held or awaited.
    pub fn active_keys(&self) -> usize {
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }
}

pub struct KeyedGuard<'a, K>
where
    K: Eq + Hash + Clone + Debug,
{
    registry: &'a KeyedLocks<K>,
    key: K,
    entry: Arc<AsyncMutex<()>>,
    _guard: OwnedMutexGuard<()>,
}

impl<K> KeyedGuard<'_, K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K> Drop for KeyedGuard<'_, K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn drop(&mut self) {
        let mut locks = self.registry.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // map + self.entry + the owned guard: nobody else is holding or waiting.
        if Arc::strong_count(&self.entry) == 3 {
            locks.remove(&self.key);
        }
        trace!("{} lock released for {:?}", self.registry.name, self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_released_keys_are_forgotten() {
        let locks = KeyedLocks::new("test");
        {
            let guard = locks.lock(1u32).await;
            assert_eq!(*guard.key(), 1);
            assert_eq!(locks.active_keys(), 1);
        }
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new("test"));
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let tasks = (0..16).map(|_| {
            let locks = Arc::clone(&locks);
            let inside = Arc::clone(&inside);
            let max_inside = Arc::clone(&max_inside);
            tokio::spawn(async move {
                let _guard = locks.lock("slot").await;
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_inside.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            })
        });

        for result in futures::future::join_all(tasks).await {
            result.expect("task panicked");
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new("test");
        let _a = locks.lock("a").await;
        let b = tokio::time::timeout(Duration::from_millis(50), locks.lock("b")).await;
        assert!(b.is_ok(), "independent key should be acquired immediately");
    }
}
