//! EvenSweep / OddSweep comparison-exchange kernels.
//!
//! Pair index `i` maps to slots `(2i, 2i + 1)` in the even sweep and to
//! `(2i + 1, 2i + 2)` in the odd sweep. Within one sweep the pairs are
//! disjoint, so logical threads never touch the same slot. The two sweeps
//! overlap, which is why a barrier is required between them.

use std::marker::PhantomData;

use brick_traits::SortElement;

use crate::device::Kernel;
use crate::memory::ManagedCounter;
use crate::threading::SendPtr;

/// Which matching of adjacent pairs a sweep covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Number of pairs in a sweep over `len` slots.
    ///
    /// Even: `len / 2`. Odd: `(len - 1) / 2`, which is `len / 2 - 1` for even
    /// lengths and `len / 2` for odd ones, so the final slot of an odd-length
    /// array is reached by the odd sweep.
    pub fn pair_bound(self, len: usize) -> usize {
        match self {
            Parity::Even => len / 2,
            Parity::Odd => len.saturating_sub(1) / 2,
        }
    }

    /// Slots compared for pair index `pair`.
    #[inline]
    pub fn slots(self, pair: usize) -> (usize, usize) {
        match self {
            Parity::Even => (2 * pair, 2 * pair + 1),
            Parity::Odd => (2 * pair + 1, 2 * pair + 2),
        }
    }
}

/// One sweep over an array, optionally counting swaps.
///
/// The sweep holds the exclusive borrow of the array for its lifetime, so the
/// array cannot be observed by anyone else while a launch is in flight.
pub struct Sweep<'a, T> {
    data: SendPtr<T>,
    len: usize,
    parity: Parity,
    moved: Option<&'a ManagedCounter>,
    _borrow: PhantomData<&'a mut [T]>,
}

impl<'a, T: SortElement> Sweep<'a, T> {
    pub fn new(data: &'a mut [T], parity: Parity) -> Self {
        Self {
            len: data.len(),
            data: SendPtr(data.as_mut_ptr()),
            parity,
            moved: None,
            _borrow: PhantomData,
        }
    }

    /// Plain EvenSweep.
    pub fn even(data: &'a mut [T]) -> Self {
        Self::new(data, Parity::Even)
    }

    /// Plain OddSweep.
    pub fn odd(data: &'a mut [T]) -> Self {
        Self::new(data, Parity::Odd)
    }

    /// Checked variant: every swap increments `moved`.
    pub fn checked(mut self, moved: &'a ManagedCounter) -> Self {
        self.moved = Some(moved);
        self
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    pub fn is_checked(&self) -> bool {
        self.moved.is_some()
    }
}

impl<T: SortElement> Kernel for Sweep<'_, T> {
    fn name(&self) -> &'static str {
        match (self.parity, self.moved.is_some()) {
            (Parity::Even, false) => "even_sweep",
            (Parity::Even, true) => "even_sweep_checked",
            (Parity::Odd, false) => "odd_sweep",
            (Parity::Odd, true) => "odd_sweep_checked",
        }
    }

    fn bound(&self) -> usize {
        self.parity.pair_bound(self.len)
    }

    unsafe fn execute(&self, index: usize) {
        let (left, right) = self.parity.slots(index);
        debug_assert!(right < self.len);
        let base = self.data.as_ptr();
        // SAFETY: `index < bound()` keeps both slots in range, and pairs of
        // one sweep are disjoint, so no other thread touches these slots.
        let swapped = unsafe { compare_exchange(base.add(left), base.add(right)) };
        if swapped {
            if let Some(moved) = self.moved {
                moved.increment();
            }
        }
    }
}

/// Swap `*left` and `*right` if `*left > *right`. Returns whether a swap
/// happened; equal or unordered values are left alone.
///
/// # Safety
/// Both pointers must be valid and not accessed concurrently.
#[inline]
unsafe fn compare_exchange<T: PartialOrd + Copy>(left: *mut T, right: *mut T) -> bool {
    let (a, b) = unsafe { (*left, *right) };
    if a > b {
        unsafe {
            *left = b;
            *right = a;
        }
        true
    } else {
        false
    }
}
