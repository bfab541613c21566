//! Feature-gated `Sync` marker for kernels.
//!
//! With the `parallel` feature, kernels are shared by reference across rayon
//! workers and [`MaybeSync`] is [`Sync`]. Without it, every logical thread
//! runs on the launching thread and the bound is blanket-implemented, so a
//! kernel may hold non-thread-safe state.

#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync + ?Sized> MaybeSync for T {}

#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSync for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_counter_is_maybe_sync() {
        fn _check<T: MaybeSync + ?Sized>() {}
        _check::<std::sync::atomic::AtomicU32>();
        _check::<[u64]>();
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_cell_is_maybe_sync_without_parallel() {
        fn _check<T: MaybeSync>() {}
        _check::<std::cell::Cell<u32>>();
    }
}
