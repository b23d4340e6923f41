//! Counting limiter bounding in-flight fetch operations.

use tokio::sync::{Semaphore, SemaphorePermit};

/// Bounds the number of simultaneously outstanding fetches.
///
/// The permit count equals the expander's work-chunk size; the two are
/// coupled on purpose so "works in flight" and "people in flight" stay
/// proportionate.
pub struct ConcurrencyGate {
    permits: Semaphore,
    capacity: usize,
}

impl ConcurrencyGate {
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Semaphore::new(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Wait for a permit. The permit is released when dropped, success or
    /// failure, so a stalled fetch never permanently reduces capacity.
    pub async fn admit(&self) -> SemaphorePermit<'_> {
        // The semaphore is never closed, so acquire cannot fail.
        self.permits
            .acquire()
            .await
            .expect("gate semaphore closed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn admits_up_to_capacity() {
        let gate = ConcurrencyGate::new(2);
        assert_eq!(gate.capacity(), 2);
        let _one = gate.admit().await;
        let _two = gate.admit().await;
        assert_eq!(gate.available(), 0);
        assert_eq!(gate.capacity(), 2);
    }

    #[tokio::test]
    async fn dropping_a_permit_releases_it() {
        let gate = ConcurrencyGate::new(1);
        let permit = gate.admit().await;
        assert_eq!(gate.available(), 0);
        drop(permit);
        assert_eq!(gate.available(), 1);
    }
}
