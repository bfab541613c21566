//! Convergence signal: one swap counter per sweep.

use crate::memory::{ManagedCounter, ManagedMemory};
use crate::Result;

/// Swap counts observed in one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Swaps {
    pub even: u32,
    pub odd: u32,
}

impl Swaps {
    /// `true` when neither sweep exchanged anything.
    pub fn converged(&self) -> bool {
        self.even == 0 && self.odd == 0
    }

    pub fn total(&self) -> u64 {
        u64::from(self.even) + u64::from(self.odd)
    }
}

/// The `moved_even` / `moved_odd` counter pair.
///
/// Allocated once per sort call. Both counters are released on drop, and if
/// the second allocation fails the first is released before the error is
/// returned.
#[derive(Debug)]
pub struct ConvergenceSignal {
    moved_even: ManagedCounter,
    moved_odd: ManagedCounter,
}

impl ConvergenceSignal {
    pub fn allocate(memory: &ManagedMemory) -> Result<Self> {
        let moved_even = memory.alloc_counter()?;
        let moved_odd = memory.alloc_counter()?;
        Ok(Self {
            moved_even,
            moved_odd,
        })
    }

    /// Zero both counters. Host side, before a checked generation.
    pub fn reset(&self) {
        self.moved_even.reset();
        self.moved_odd.reset();
    }

    pub fn moved_even(&self) -> &ManagedCounter {
        &self.moved_even
    }

    pub fn moved_odd(&self) -> &ManagedCounter {
        &self.moved_odd
    }

    /// Read both counters. Only meaningful after a barrier.
    pub fn swaps(&self) -> Swaps {
        Swaps {
            even: self.moved_even.get(),
            odd: self.moved_odd.get(),
        }
    }
}
