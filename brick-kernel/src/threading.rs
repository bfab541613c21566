//! Grid-stride dispatch of logical threads.
//!
//! A launch of `threads` logical threads over a kernel domain of `bound`
//! indices gives thread `t` the indices `t, t + threads, t + 2 * threads, ...`.
//! Threads with `t >= bound` have no work and are not scheduled at all.

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::device::Kernel;

/// A raw pointer wrapper that is `Send` + `Sync`.
///
/// # Safety
/// The caller must guarantee that the pointed-to data is valid for the
/// lifetime of any parallel operation and that no data races occur
/// (different logical threads touch disjoint slots).
pub(crate) struct SendPtr<T>(pub(crate) *mut T);

impl<T> Clone for SendPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SendPtr<T> {}

unsafe impl<T> Send for SendPtr<T> {}
unsafe impl<T> Sync for SendPtr<T> {}

impl<T> SendPtr<T> {
    pub(crate) fn as_ptr(self) -> *mut T {
        self.0
    }
}

/// Run `kernel` over its whole domain with `threads` logical threads and
/// return once every thread has finished.
pub(crate) fn dispatch_grid<K: Kernel + ?Sized>(kernel: &K, threads: usize) {
    let bound = kernel.bound();
    if bound == 0 || threads == 0 {
        return;
    }
    let active = threads.min(bound);

    #[cfg(feature = "parallel")]
    (0..active)
        .into_par_iter()
        .for_each(|tid| run_thread(kernel, tid, threads, bound));

    #[cfg(not(feature = "parallel"))]
    for tid in 0..active {
        run_thread(kernel, tid, threads, bound);
    }
}

/// Body of one logical thread: the grid-stride loop.
#[inline]
fn run_thread<K: Kernel + ?Sized>(kernel: &K, tid: usize, stride: usize, bound: usize) {
    for index in (tid..bound).step_by(stride) {
        // SAFETY: `index ≡ tid (mod stride)` and `tid < stride`, so no other
        // logical thread of this launch receives `index`.
        unsafe { kernel.execute(index) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Counts how often each index of its domain is visited.
    struct VisitCounter {
        visits: Vec<AtomicU32>,
    }

    impl VisitCounter {
        fn new(bound: usize) -> Self {
            Self {
                visits: (0..bound).map(|_| AtomicU32::new(0)).collect(),
            }
        }
    }

    impl Kernel for VisitCounter {
        fn name(&self) -> &'static str {
            "visit_counter"
        }

        fn bound(&self) -> usize {
            self.visits.len()
        }

        unsafe fn execute(&self, index: usize) {
            self.visits[index].fetch_add(1, Ordering::Relaxed);
        }
    }

    fn assert_each_visited_once(bound: usize, threads: usize) {
        let kernel = VisitCounter::new(bound);
        dispatch_grid(&kernel, threads);
        for (i, v) in kernel.visits.iter().enumerate() {
            assert_eq!(
                v.load(Ordering::Relaxed),
                1,
                "index {i} (bound={bound}, threads={threads})"
            );
        }
    }

    #[test]
    fn test_fewer_threads_than_indices() {
        assert_each_visited_once(1000, 7);
    }

    #[test]
    fn test_more_threads_than_indices() {
        assert_each_visited_once(10, 256);
    }

    #[test]
    fn test_single_thread() {
        assert_each_visited_once(33, 1);
    }

    #[test]
    fn test_empty_domain() {
        let kernel = VisitCounter::new(0);
        dispatch_grid(&kernel, 64);
        assert!(kernel.visits.is_empty());
    }
}
