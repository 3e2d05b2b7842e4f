use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::debug;

/// Monotonic stamp attached to an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: AtomicU64,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }
}

/// Holds the result of the most recently issued request only.
///
/// A response whose generation predates the latest issue is dropped, so a
/// slow request for an old filter value cannot overwrite a newer one.
#[derive(Debug)]
pub struct LatestSlot<T> {
    generations: RequestGenerations,
    value: Mutex<Option<T>>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self {
            generations: RequestGenerations::new(),
            value: Mutex::new(None),
        }
    }
}

impl<T: Clone> LatestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Generation {
        self.generations.issue()
    }

    /// Store `value` if `generation` is still the latest; returns whether it was kept
    pub fn accept(&self, generation: Generation, value: T) -> bool {
        let mut slot = self.value.lock();
        if !self.generations.is_latest(generation) {
            debug!("Discarding stale response from generation {:?}", generation);
            return false;
        }
        *slot = Some(value);
        true
    }

    pub fn current(&self) -> Option<T> {
        self.value.lock().clone()
    }

    /// Issue a generation, await the request, and keep the outcome only if
    /// nothing newer was issued meanwhile. Stale errors are discarded too.
    pub async fn load<E, F>(&self, request: F) -> Result<bool, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let generation = self.issue();
        let result = request.await;

        if !self.generations.is_latest(generation) {
            debug!("Discarding stale outcome from generation {:?}", generation);
            return Ok(false);
        }
        Ok(self.accept(generation, result?))
    }
}
