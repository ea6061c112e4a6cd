use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::debug;

use crate::config::StoreConfig;
use crate::entry::Entry;

/// Internal shared state for the store
struct StoreInner<V> {
    /// The entry map behind the store's single exclusive lock. Every
    /// operation and both sweep phases serialize on this mutex, which is
    /// what makes the sweep's scan a consistent snapshot.
    data: Mutex<HashMap<String, Entry<V>>>,
    /// Sender to signal shutdown to the sweep task
    shutdown_tx: watch::Sender<bool>,
}

/// Thread-safe in-memory key-value store with sliding TTL expiration.
///
/// Every successful [`get`](Store::get) re-arms the entry's expiry to a full
/// TTL from the moment of access, so only entries that go unread for an
/// entire TTL window expire. Expiration is sweep-driven: a background task
/// spawned at construction wakes on a fixed interval and removes entries
/// past their expiry. `get` itself never treats an entry as expired — a read
/// landing after the expiry but before the sweep resurrects the entry.
///
/// Each store spawns its own sweep task. The task stops when [`shutdown`]
/// (Store::shutdown) is called or when the last handle to the store is
/// dropped, observing the signal at its next sleep boundary.
///
/// Cloning a `Store` creates a new handle to the same underlying data.
///
/// # Example
///
/// ```rust,no_run
/// use slidekv::{Store, StoreConfig};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let config = StoreConfig::default()
///         .with_cleanup_interval(Duration::from_secs(30));
///     let store: Store<String> = Store::with_config(config);
///
///     store.set("session:1", "alice".to_string(), Duration::from_secs(300));
///
///     if let Some(user) = store.get("session:1") {
///         println!("session owner: {user}");
///     }
/// }
/// ```
pub struct Store<V> {
    inner: Arc<StoreInner<V>>,
}

impl<V> Clone for Store<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Store<V>
where
    V: Clone + Send + 'static,
{
    /// Creates a new store with default configuration
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context. The store requires
    /// a runtime to spawn its background sweep task.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a new store with custom configuration
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context. The store requires
    /// a runtime to spawn its background sweep task.
    pub fn with_config(config: StoreConfig) -> Self {
        // Verify that a Tokio runtime is available before proceeding.
        // This gives a clear error message instead of a cryptic panic
        // from tokio::spawn.
        if tokio::runtime::Handle::try_current().is_err() {
            panic!(
                "slidekv::Store requires a Tokio runtime. \
                 Ensure you are calling Store::new() or Store::with_config() \
                 from within a #[tokio::main] or #[tokio::test] context, \
                 or from code running on a Tokio runtime."
            );
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let inner = Arc::new(StoreInner {
            data: Mutex::new(HashMap::new()),
            shutdown_tx,
        });

        // The task holds only a weak handle so that dropping the last Store
        // tears the sweep down rather than keeping the map alive forever.
        let sweep_inner = Arc::downgrade(&inner);
        tokio::spawn(Self::sweep_task(
            sweep_inner,
            config.cleanup_interval,
            shutdown_rx,
        ));

        Self { inner }
    }

    /// Background task that periodically sweeps expired entries
    async fn sweep_task(
        inner: Weak<StoreInner<V>>,
        interval: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        // A zero period would panic the ticker; 1ms is the shortest cycle
        // the task will run at.
        let interval = interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(interval);
        // Skip the first immediate tick - we want to wait for the interval first
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(inner) = inner.upgrade() else {
                        break;
                    };
                    Self::sweep(&inner);
                }
                res = shutdown_rx.changed() => {
                    if res.is_err() || *shutdown_rx.borrow() {
                        // Shutdown signal received, or all handles dropped
                        break;
                    }
                }
            }
        }
    }

    /// Sweep logic shared between the background task and [`purge_expired`]
    /// (Store::purge_expired).
    ///
    /// Two phases, each under its own lock hold: scan the whole map for keys
    /// past their expiry, then delete the collected keys. The split keeps the
    /// O(n) scan and the O(k) deletion from becoming one long hold. A key
    /// refreshed by a `get` between the phases is not lost: the deletion
    /// phase re-checks each candidate's expiry before removing it.
    fn sweep(inner: &StoreInner<V>) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = {
            let data = inner.data.lock();
            data.iter()
                .filter(|(_, entry)| entry.is_expired_at(now))
                .map(|(key, _)| key.clone())
                .collect()
        };

        if expired.is_empty() {
            return 0;
        }

        let mut removed = 0;
        {
            let mut data = inner.data.lock();
            for key in &expired {
                if data.get(key).is_some_and(Entry::is_expired) {
                    data.remove(key);
                    removed += 1;
                }
            }
        }

        if removed > 0 {
            debug!(removed, "sweep removed expired entries");
        }
        removed
    }

    /// Stores a value with the given key and TTL
    ///
    /// If the key already exists, the entry is replaced; the new TTL governs
    /// from here on. No constraint is placed on the TTL: a zero TTL is legal
    /// and makes the entry eligible for removal at the next sweep (unless a
    /// read resurrects it first).
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = Entry::new(value, ttl);
        self.inner.data.lock().insert(key.into(), entry);
    }

    /// Retrieves a value by key, refreshing its expiry
    ///
    /// Returns `None` if the key is absent, with no side effect. If present,
    /// the entry counts as accessed: its expiry is re-armed to a full TTL
    /// from now and a clone of the value is returned. This happens even if
    /// the old expiry has already passed — expiration is the sweep's job,
    /// never `get`'s.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut data = self.inner.data.lock();
        let entry = data.get_mut(key)?;
        entry.refresh();
        Some(entry.value().clone())
    }

    /// Deletes a key from the store
    ///
    /// Returns `true` if the key existed (regardless of expiration), `false`
    /// otherwise. Deleting an absent key is a no-op.
    #[must_use = "returns whether the key existed"]
    pub fn delete(&self, key: &str) -> bool {
        self.inner.data.lock().remove(key).is_some()
    }

    /// Manually triggers a sweep of all expired entries
    ///
    /// Returns the number of entries removed.
    ///
    /// Note: this is also done automatically by the background task.
    pub fn purge_expired(&self) -> usize {
        Self::sweep(&self.inner)
    }

    /// Returns the number of entries in the store
    ///
    /// Entries past their expiry but not yet swept are counted: until the
    /// sweep collects them, they are still readable.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.data.lock().len()
    }

    /// Returns `true` if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.data.lock().is_empty()
    }

    /// Checks if a key is present, without refreshing its expiry
    ///
    /// An entry past its expiry but not yet swept is still present (a `get`
    /// would resurrect it), so this reports raw presence in the map.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.data.lock().contains_key(key)
    }

    /// Returns all keys currently in the store, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.inner.data.lock().keys().cloned().collect()
    }

    /// Removes all entries from the store
    pub fn clear(&self) {
        self.inner.data.lock().clear();
    }

    /// Gracefully shuts down the background sweep task
    ///
    /// This is called automatically when the last store handle is dropped,
    /// but can be called manually if needed. The task observes the signal at
    /// its next sleep boundary. Store operations keep working afterwards;
    /// only the automatic sweeping stops.
    pub fn shutdown(&self) {
        let _ = self.inner.shutdown_tx.send(true);
    }
}

impl<V> Default for Store<V>
where
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for StoreInner<V> {
    fn drop(&mut self) {
        // Signal the sweep task to stop when the last handle is dropped
        let _ = self.shutdown_tx.send(true);
    }
}
