//! Device-managed memory for host-visible counters.
//!
//! Counters live in memory shared between the host and the device's logical
//! threads. Every allocation is charged against the owning [`ManagedMemory`]
//! pool and released when the [`ManagedCounter`] is dropped.

use std::mem::size_of;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::{KernelError, Result};

#[derive(Debug)]
struct PoolState {
    limit: Option<usize>,
    in_use: AtomicUsize,
}

/// Handle to a managed-memory pool. Clones share the same pool.
#[derive(Debug, Clone)]
pub struct ManagedMemory {
    state: Arc<PoolState>,
}

impl ManagedMemory {
    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn with_limit(bytes: usize) -> Self {
        Self::new(Some(bytes))
    }

    fn new(limit: Option<usize>) -> Self {
        Self {
            state: Arc::new(PoolState {
                limit,
                in_use: AtomicUsize::new(0),
            }),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.state.limit
    }

    /// Bytes currently held by live allocations.
    pub fn in_use(&self) -> usize {
        self.state.in_use.load(Ordering::Acquire)
    }

    /// Allocate a zero-initialized 32-bit counter.
    pub fn alloc_counter(&self) -> Result<ManagedCounter> {
        let requested = size_of::<AtomicU32>();
        self.reserve(requested)?;

        let mut cell: Vec<AtomicU32> = Vec::new();
        if cell.try_reserve_exact(1).is_err() {
            self.release(requested);
            return Err(KernelError::Allocation {
                requested,
                in_use: self.in_use(),
                limit: self.limit(),
            });
        }
        cell.push(AtomicU32::new(0));

        Ok(ManagedCounter {
            cell: cell.into_boxed_slice(),
            pool: self.clone(),
        })
    }

    fn reserve(&self, bytes: usize) -> Result<()> {
        let limit = self.state.limit;
        self.state
            .in_use
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                let next = used.checked_add(bytes)?;
                match limit {
                    Some(max) if next > max => None,
                    _ => Some(next),
                }
            })
            .map(|_| ())
            .map_err(|in_use| KernelError::Allocation {
                requested: bytes,
                in_use,
                limit,
            })
    }

    fn release(&self, bytes: usize) {
        self.state.in_use.fetch_sub(bytes, Ordering::AcqRel);
    }
}

/// A 32-bit counter in managed memory.
///
/// Written by logical threads with atomic increments, read by the host after
/// a barrier. The backing memory returns to its pool on drop.
#[derive(Debug)]
pub struct ManagedCounter {
    cell: Box<[AtomicU32]>,
    pool: ManagedMemory,
}

impl ManagedCounter {
    #[inline]
    fn word(&self) -> &AtomicU32 {
        &self.cell[0]
    }

    /// Host-side reset to zero.
    pub fn reset(&self) {
        self.word().store(0, Ordering::Relaxed);
    }

    /// Device-side atomic increment. Wraps at `u32::MAX`.
    #[inline]
    pub fn increment(&self) {
        self.word().fetch_add(1, Ordering::Relaxed);
    }

    /// Host-side read.
    pub fn get(&self) -> u32 {
        self.word().load(Ordering::Relaxed)
    }
}

impl Drop for ManagedCounter {
    fn drop(&mut self) {
        self.pool.release(size_of::<AtomicU32>());
    }
}
