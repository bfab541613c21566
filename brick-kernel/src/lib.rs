//! Device model and comparison-exchange kernels for odd-even transposition sort.
//!
//! The accelerator is modelled as a [`Device`] that executes a [`Grid`] of
//! lightweight logical threads. Each launch runs one [`Kernel`] over its index
//! domain with a grid-stride loop: thread `t` of a `T`-thread launch handles
//! indices `t, t + T, t + 2T, ...`, so any launch width covers any domain.
//!
//! # Core Types
//!
//! - [`Device`]: launches kernels, captures faults, and provides the
//!   device-wide barrier ([`Device::synchronize`])
//! - [`LaunchConfig`] / [`Grid`]: launch geometry (threads per block, blocks)
//! - [`ManagedMemory`] / [`ManagedCounter`]: device-managed 32-bit counters
//! - [`ConvergenceSignal`]: the per-sweep swap counters read after a barrier
//! - [`Sweep`]: the EvenSweep / OddSweep kernels, plain or checked
//!
//! # Example
//!
//! ```rust
//! use brick_kernel::{Device, LaunchConfig, Sweep};
//!
//! let mut data = vec![4u32, 3, 2, 1];
//! let mut device = Device::new();
//! let grid = LaunchConfig::default().resolve(data.len()).unwrap();
//!
//! device.launch(grid, &Sweep::even(&mut data));
//! device.synchronize().unwrap();
//! assert_eq!(data, vec![3, 4, 1, 2]);
//!
//! device.launch(grid, &Sweep::odd(&mut data));
//! device.synchronize().unwrap();
//! assert_eq!(data, vec![3, 1, 4, 2]);
//! ```
//!
//! # Execution
//!
//! With the `parallel` feature (default) logical threads are scheduled on the
//! rayon pool. Without it they run one after another on the calling thread;
//! results are identical because the index sets of different threads are
//! disjoint.

mod device;
mod launch;
mod maybe_sync;
mod memory;
mod signal;
mod sweep;
mod threading;

pub use device::{Device, Kernel};
pub use launch::{Grid, LaunchConfig, DEFAULT_BLOCK_DIM};
pub use maybe_sync::MaybeSync;
pub use memory::{ManagedCounter, ManagedMemory};
pub use signal::{ConvergenceSignal, Swaps};
pub use sweep::{Parity, Sweep};

pub use brick_traits::SortElement;

/// Errors raised by the device model.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// Managed memory could not satisfy an allocation.
    #[error("managed allocation of {requested} bytes failed ({in_use} bytes in use, limit {limit:?})")]
    Allocation {
        requested: usize,
        in_use: usize,
        limit: Option<usize>,
    },

    /// Launch geometry is unusable (zero threads per block or zero blocks).
    #[error("invalid launch: {0}")]
    InvalidLaunch(&'static str),

    /// A logical thread faulted while executing a kernel.
    #[error("kernel `{kernel}` faulted: {message}")]
    ExecutionFault {
        kernel: &'static str,
        message: String,
    },
}

/// Result type for device operations.
pub type Result<T> = std::result::Result<T, KernelError>;
