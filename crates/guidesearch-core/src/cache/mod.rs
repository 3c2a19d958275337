//! Time-bounded cached loader
//!
//! Holds one value built by a [`Loader`], rebuilt when older than the TTL or
//! after [`CachedLoader::invalidate`]. Concurrent misses share a single load.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

/// Default time-to-live: 5 minutes
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Builds a fresh value on a cache miss
pub trait Loader<T>: Send + Sync {
    fn load(&self) -> T;
}

impl<T, F> Loader<T> for F
where
    F: Fn() -> T + Send + Sync,
{
    fn load(&self) -> T {
        self()
    }
}

struct Entry<T> {
    value: Arc<T>,
    loaded_at: Instant,
}

/// Cache statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct CacheStats {
    /// Number of times the loader ran
    pub loads: u64,
    /// Number of `get` calls served from the held value
    pub hits: u64,
    /// Age of the held value, if any
    pub age: Option<Duration>,
}

/// Single-value cache with TTL and manual invalidation
pub struct CachedLoader<T, L, C = SystemClock> {
    loader: L,
    clock: C,
    ttl: Duration,
    entry: RwLock<Option<Entry<T>>>,
    rebuild: Mutex<()>,
    loads: AtomicU64,
    hits: AtomicU64,
}

impl<T, L> CachedLoader<T, L, SystemClock>
where
    L: Loader<T>,
{
    pub fn new(loader: L, ttl: Duration) -> Self {
        Self::with_clock(loader, ttl, SystemClock)
    }
}

impl<T, L, C> CachedLoader<T, L, C>
where
    L: Loader<T>,
    C: Clock,
{
    pub fn with_clock(loader: L, ttl: Duration, clock: C) -> Self {
        Self {
            loader,
            clock,
            ttl,
            entry: RwLock::new(None),
            rebuild: Mutex::new(()),
            loads: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the held value, loading a new one if empty or expired
    pub fn get(&self) -> Arc<T> {
        if let Some(value) = self.fresh() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value;
        }

        let _guard = self.rebuild.lock().unwrap_or_else(|e| e.into_inner());

        // Another caller may have finished a load while we waited.
        if let Some(value) = self.fresh() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value;
        }

        let value = Arc::new(self.loader.load());
        self.loads.fetch_add(1, Ordering::Relaxed);

        let mut entry = self.entry.write().unwrap_or_else(|e| e.into_inner());
        *entry = Some(Entry {
            value: Arc::clone(&value),
            loaded_at: self.clock.now(),
        });

        value
    }

    /// Return the held value without loading, even if expired
    pub fn peek(&self) -> Option<Arc<T>> {
        let entry = self.entry.read().unwrap_or_else(|e| e.into_inner());
        entry.as_ref().map(|e| Arc::clone(&e.value))
    }

    /// Drop the held value so the next `get` loads unconditionally
    pub fn invalidate(&self) {
        let mut entry = self.entry.write().unwrap_or_else(|e| e.into_inner());
        *entry = None;
    }

    pub fn stats(&self) -> CacheStats {
        let entry = self.entry.read().unwrap_or_else(|e| e.into_inner());
        CacheStats {
            loads: self.loads.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            age: entry
                .as_ref()
                .map(|e| self.clock.now().saturating_duration_since(e.loaded_at)),
        }
    }

    fn fresh(&self) -> Option<Arc<T>> {
        let entry = self.entry.read().unwrap_or_else(|e| e.into_inner());
        let entry = entry.as_ref()?;
        let age = self.clock.now().saturating_duration_since(entry.loaded_at);
        (age < self.ttl).then(|| Arc::clone(&entry.value))
    }
}
