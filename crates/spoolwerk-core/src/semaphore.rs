// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-printer admission control for native print jobs.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::{Result, SpoolwerkError};

/// Number of native jobs a single printer may have in flight.
pub const DEFAULT_NATIVE_JOB_QUEUE_SIZE: usize = 2;

/// Counting semaphore bounding concurrent native jobs on one device.
///
/// Clones share the same slots, so every copy of a `Printer` enforces the
/// same limit.
#[derive(Clone)]
pub struct NativeJobSemaphore {
    inner: Arc<Semaphore>,
    capacity: usize,
}

impl NativeJobSemaphore {
    /// A capacity of zero would block forever and is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait for a free slot. The slot is returned when the permit drops.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        Arc::clone(&self.inner)
            .acquire_owned()
            .await
            .map_err(|_| SpoolwerkError::AdmissionClosed)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.inner.available_permits()
    }

    /// Whether both handles guard the same device slots.
    pub fn shares_slots_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for NativeJobSemaphore {
    fn default() -> Self {
        Self::new(DEFAULT_NATIVE_JOB_QUEUE_SIZE)
    }
}

impl std::fmt::Debug for NativeJobSemaphore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeJobSemaphore")
            .field("capacity", &self.capacity)
            .field("available", &self.available())
            .finish()
    }
}
