//! Thread-safe store handle
//!
//! A write mutates a whole leaf-to-root path of summaries, so a reader running
//! alongside it could see some ancestors updated and others not. One
//! read/write lock around the store rules that out: writes are exclusive,
//! reads run in parallel with each other.

use crate::core::aggregation::Aggregation;
use crate::core::store::{Found, Span, Store, StoreStats};
use crate::error::Result;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Cloneable, lock-guarded handle to a [`Store`]
pub struct SharedStore<A: Aggregation, L = ()> {
    inner: Arc<RwLock<Store<A, L>>>,
}

impl<A: Aggregation, L> SharedStore<A, L> {
    pub fn new(store: Store<A, L>) -> Self {
        SharedStore {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn write_entry(&self, position: i64, value: A::Value, log: Option<L>) -> Result<()> {
        self.inner.write().write_entry(position, value, log)
    }

    pub fn read_range(&self, start: i64, end: i64, level: u32) -> Result<Vec<Option<A::Summary>>> {
        self.inner.read().read_range(start, end, level)
    }

    pub fn read_spans(&self, start: i64, end: i64, level: u32) -> Result<Vec<Span<A::Summary>>> {
        self.inner.read().read_spans(start, end, level)
    }

    pub fn find_in_range(&self, start: i64, end: i64, needle: &A::Summary) -> Result<Vec<Found<A::Value, L>>>
    where
        L: Clone,
    {
        self.inner.read().find_in_range(start, end, needle)
    }

    pub fn locate(&self, start: i64, end: i64, level: u32, needle: &A::Summary) -> Result<Vec<Span<A::Summary>>> {
        self.inner.read().locate(start, end, level, needle)
    }

    pub fn stats(&self) -> StoreStats {
        self.inner.read().stats()
    }

    /// Hold the read lock for several queries against one consistent state
    pub fn read(&self) -> RwLockReadGuard<'_, Store<A, L>> {
        self.inner.read()
    }
}

impl<A: Aggregation, L> Clone for SharedStore<A, L> {
    fn clone(&self) -> Self {
        SharedStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Aggregation, L> From<Store<A, L>> for SharedStore<A, L> {
    fn from(store: Store<A, L>) -> Self {
        Self::new(store)
    }
}
