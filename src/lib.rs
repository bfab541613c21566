//! Data-parallel odd-even transposition ("brick") sort.
//!
//! An array is sorted in place by alternating two comparison-exchange sweeps
//! over disjoint adjacent pairs: EvenSweep on `(0,1), (2,3), ...` and
//! OddSweep on `(1,2), (3,4), ...`. One (EvenSweep, OddSweep) pass is a
//! *generation*; `len` generations always suffice. Each sweep is a kernel
//! launch on a [`Device`] whose logical threads cover the pairs with a
//! grid-stride loop (see [`brick_kernel`]).
//!
//! # Strategies
//!
//! - [`sort_fixed`]: exactly `len` generations, never checks for convergence
//! - [`sort_early_exit`]: counts swaps and stops after the first generation
//!   without one
//! - [`sort_hybrid`]: unchecked generations for the first `trigger_percent`
//!   of the budget (clamped to [`MAX_TRIGGER_PERCENT`]), then checked ones
//!
//! All three return the number of generations executed, which never exceeds
//! the array length. [`Sorter`] exposes the same strategies on a reusable
//! device and reports how the sort terminated.
//!
//! # Example
//!
//! ```rust
//! use brick_sort::{sort_early_exit, sort_fixed, LaunchConfig};
//!
//! let mut data = vec![5, 3, 8, 1, 9, 2];
//! let generations = sort_early_exit(&mut data, LaunchConfig::default()).unwrap();
//! assert_eq!(data, vec![1, 2, 3, 5, 8, 9]);
//! assert!(generations <= 6);
//!
//! let mut pair = vec![2.0f64, 1.0];
//! assert_eq!(sort_fixed(&mut pair, LaunchConfig::default()).unwrap(), 2);
//! assert_eq!(pair, vec![1.0, 2.0]);
//! ```
//!
//! # Preconditions
//!
//! Arrays shorter than two elements are rejected with
//! [`SortError::TooShort`]. Equal elements are never exchanged.

mod orchestrator;
mod strategy;
mod verify;

pub use orchestrator::{SortReport, Sorter, Termination};
pub use strategy::{clamp_trigger, Strategy, MAX_TRIGGER_PERCENT};
pub use verify::{count_inversions, is_sorted};

pub use brick_kernel::{
    Device, Grid, KernelError, LaunchConfig, ManagedMemory, Swaps, DEFAULT_BLOCK_DIM,
};
pub use brick_traits::SortElement;

// ============================================================================
// Entry points
// ============================================================================

/// Sort with exactly `data.len()` generations. Returns `data.len()`.
pub fn sort_fixed<T: SortElement>(data: &mut [T], launch: LaunchConfig) -> Result<usize> {
    sort_with(data, Strategy::Fixed, launch)
}

/// Sort until a generation makes no swap. Returns the number of generations
/// run, counting the final zero-swap generation, so sorted input returns 1.
pub fn sort_early_exit<T: SortElement>(data: &mut [T], launch: LaunchConfig) -> Result<usize> {
    sort_with(data, Strategy::EarlyExit, launch)
}

/// Sort with unchecked generations for the first `trigger_percent` of the
/// budget and checked ones afterwards. Triggers above
/// [`MAX_TRIGGER_PERCENT`] are clamped; a trigger of 0 is equivalent to
/// [`sort_early_exit`].
pub fn sort_hybrid<T: SortElement>(
    data: &mut [T],
    trigger_percent: u8,
    launch: LaunchConfig,
) -> Result<usize> {
    sort_with(data, Strategy::Hybrid { trigger_percent }, launch)
}

fn sort_with<T: SortElement>(data: &mut [T], strategy: Strategy, launch: LaunchConfig) -> Result<usize> {
    Sorter::new(launch)
        .sort(data, strategy)
        .map(|report| report.generations)
}

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while sorting.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    /// The array has fewer than two elements.
    #[error("array of length {len} is too short to sort (need at least 2)")]
    TooShort { len: usize },

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Result type for sort operations.
pub type Result<T> = std::result::Result<T, SortError>;
