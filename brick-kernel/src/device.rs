//! The device: kernel launches, fault capture and the device-wide barrier.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::launch::Grid;
use crate::maybe_sync::MaybeSync;
use crate::memory::{ManagedCounter, ManagedMemory};
use crate::threading::dispatch_grid;
use crate::{KernelError, Result};

/// A data-parallel kernel: one body executed for every index of a domain.
pub trait Kernel: MaybeSync {
    /// Name reported in logs and faults.
    fn name(&self) -> &'static str;

    /// Size of the index domain; indices `0..bound()` are executed.
    fn bound(&self) -> usize;

    /// Execute the kernel body for one index.
    ///
    /// # Safety
    /// Within one launch, each index must be executed by exactly one logical
    /// thread, and `index < self.bound()`. [`Device::launch`] upholds both.
    unsafe fn execute(&self, index: usize);
}

#[derive(Debug)]
struct Fault {
    kernel: &'static str,
    message: String,
}

/// Executes kernel launches in issue order.
///
/// [`launch`](Device::launch) returns once every logical thread of the
/// launch has finished, so effects of one launch are visible to the next.
/// A panicking logical thread does not unwind into the caller: the fault is
/// recorded, later launches are skipped, and the fault is reported by the
/// next [`synchronize`](Device::synchronize).
#[derive(Debug)]
pub struct Device {
    memory: ManagedMemory,
    fault: Option<Fault>,
    launches: u64,
}

impl Default for Device {
    fn default() -> Self {
        Self::new()
    }
}

impl Device {
    /// A device with unbounded managed memory.
    pub fn new() -> Self {
        Self::with_memory(ManagedMemory::unlimited())
    }

    /// A device whose managed memory holds at most `bytes` bytes.
    pub fn with_memory_limit(bytes: usize) -> Self {
        Self::with_memory(ManagedMemory::with_limit(bytes))
    }

    fn with_memory(memory: ManagedMemory) -> Self {
        Self {
            memory,
            fault: None,
            launches: 0,
        }
    }

    pub fn memory(&self) -> &ManagedMemory {
        &self.memory
    }

    /// Allocate a zeroed counter in managed memory.
    pub fn alloc_counter(&self) -> Result<ManagedCounter> {
        self.memory.alloc_counter()
    }

    /// Number of launches that actually executed.
    pub fn launches(&self) -> u64 {
        self.launches
    }

    /// Launch `kernel` on `grid`.
    pub fn launch<K: Kernel + ?Sized>(&mut self, grid: Grid, kernel: &K) {
        if let Some(fault) = &self.fault {
            debug!(
                kernel = kernel.name(),
                faulted = fault.kernel,
                "device faulted, launch skipped"
            );
            return;
        }
        let threads = grid.threads();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| dispatch_grid(kernel, threads)));
        self.launches += 1;
        if let Err(payload) = outcome {
            let message = panic_message(payload.as_ref());
            debug!(kernel = kernel.name(), %message, "kernel fault captured");
            self.fault = Some(Fault {
                kernel: kernel.name(),
                message,
            });
        }
    }

    /// Device-wide barrier.
    ///
    /// Every launch issued so far has completed when this returns. If a
    /// launch faulted since the previous barrier, the fault is returned and
    /// cleared, and the device accepts launches again.
    pub fn synchronize(&mut self) -> Result<()> {
        match self.fault.take() {
            Some(Fault { kernel, message }) => Err(KernelError::ExecutionFault { kernel, message }),
            None => Ok(()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
