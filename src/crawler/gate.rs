//! Concurrency gate shared by every outbound request of a run

use crate::CrawlError;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounded admission control for outbound requests
///
/// One gate is created per run and shared by the classification and fetch
/// phases, so the capacity bounds the total number of requests in flight.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One unit of gate capacity
///
/// The unit returns to the gate when the permit is dropped, whatever the
/// outcome of the request it guarded.
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyGate {
    /// Creates a gate admitting at most `capacity` holders (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits for a free unit and takes it
    pub async fn acquire(&self) -> Result<GatePermit, CrawlError> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| CrawlError::GateClosed)?;

        Ok(GatePermit { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Units not currently held
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
