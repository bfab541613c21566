//! Host-side orchestration: launches generations until the array is sorted.
//!
//! Every generation launches EvenSweep then OddSweep against the same buffer
//! and synchronizes after each launch. The sweeps overlap on every interior
//! slot, so the barrier between them is required for correctness.

use brick_kernel::{ConvergenceSignal, Device, Grid, LaunchConfig, Sweep, Swaps};
use tracing::{debug, trace, warn};

use crate::strategy::{clamp_trigger, is_blind, Strategy};
use crate::{Result, SortElement, SortError};

/// Terminal state of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// A checked generation made no swap; the array is sorted.
    Converged,
    /// The generation budget (`len`) ran out.
    Exhausted,
}

/// Outcome of one sort call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortReport {
    /// Generations executed, including the final zero-swap one. Never more
    /// than the array length.
    pub generations: usize,
    pub termination: Termination,
}

/// Runs sorts on a [`Device`] with a fixed launch configuration.
///
/// # Example
///
/// ```rust
/// use brick_sort::{LaunchConfig, Sorter, Strategy, Termination};
///
/// let mut sorter = Sorter::new(LaunchConfig::default());
/// let mut data = vec![5, 3, 8, 1, 9, 2];
/// let report = sorter.sort(&mut data, Strategy::EarlyExit).unwrap();
///
/// assert_eq!(data, vec![1, 2, 3, 5, 8, 9]);
/// assert_eq!(report.termination, Termination::Converged);
/// assert!(report.generations <= 6);
/// ```
#[derive(Debug, Default)]
pub struct Sorter {
    device: Device,
    launch: LaunchConfig,
}

impl Sorter {
    pub fn new(launch: LaunchConfig) -> Self {
        Self::with_device(Device::new(), launch)
    }

    pub fn with_device(device: Device, launch: LaunchConfig) -> Self {
        Self { device, launch }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn launch_config(&self) -> LaunchConfig {
        self.launch
    }

    pub fn into_device(self) -> Device {
        self.device
    }

    /// Sort `data` ascending in place.
    ///
    /// Fails with [`SortError::TooShort`] for fewer than two elements, and
    /// with [`SortError::Kernel`] if the launch configuration is unusable, a
    /// convergence counter cannot be allocated, or a kernel faults. After a
    /// kernel fault the contents of `data` are unspecified.
    pub fn sort<T: SortElement>(&mut self, data: &mut [T], strategy: Strategy) -> Result<SortReport> {
        let len = check_len(data)?;
        let grid = self.launch.resolve(len)?;
        debug!(
            len,
            %strategy,
            block_dim = grid.block_dim(),
            grid_dim = grid.grid_dim(),
            "sort started"
        );

        let report = match strategy {
            Strategy::Fixed => self.run_fixed(data, grid)?,
            Strategy::EarlyExit => self.run_checked(data, grid, 0)?,
            Strategy::Hybrid { trigger_percent } => {
                let trigger = clamp_trigger(trigger_percent);
                if trigger != trigger_percent {
                    warn!(requested = trigger_percent, clamped = trigger, "hybrid trigger clamped");
                }
                self.run_checked(data, grid, trigger)?
            }
        };

        debug!(
            generations = report.generations,
            termination = ?report.termination,
            "sort finished"
        );
        Ok(report)
    }

    /// Run one checked generation and return its swap counts.
    ///
    /// Allocates a fresh convergence signal for the call. Useful for driving
    /// a sort one generation at a time.
    pub fn step<T: SortElement>(&mut self, data: &mut [T]) -> Result<Swaps> {
        let len = check_len(data)?;
        let grid = self.launch.resolve(len)?;
        let signal = ConvergenceSignal::allocate(self.device.memory())?;
        self.checked_generation(data, grid, &signal)
    }

    fn run_fixed<T: SortElement>(&mut self, data: &mut [T], grid: Grid) -> Result<SortReport> {
        let budget = data.len();
        for generation in 0..budget {
            self.plain_generation(data, grid)?;
            trace!(generation, "plain generation");
        }
        Ok(SortReport {
            generations: budget,
            termination: Termination::Exhausted,
        })
    }

    /// Early exit (`trigger == 0`) and hybrid share this loop: generations
    /// below the trigger run plain, the rest run checked.
    fn run_checked<T: SortElement>(
        &mut self,
        data: &mut [T],
        grid: Grid,
        trigger: u8,
    ) -> Result<SortReport> {
        let budget = data.len();
        let signal = ConvergenceSignal::allocate(self.device.memory())?;

        for generation in 0..budget {
            if is_blind(generation, budget, trigger) {
                self.plain_generation(data, grid)?;
                trace!(generation, "plain generation");
                continue;
            }

            let swaps = self.checked_generation(data, grid, &signal)?;
            trace!(generation, even = swaps.even, odd = swaps.odd, "checked generation");
            if swaps.converged() {
                return Ok(SortReport {
                    generations: generation + 1,
                    termination: Termination::Converged,
                });
            }
        }

        Ok(SortReport {
            generations: budget,
            termination: Termination::Exhausted,
        })
    }

    fn plain_generation<T: SortElement>(&mut self, data: &mut [T], grid: Grid) -> Result<()> {
        self.device.launch(grid, &Sweep::even(data));
        self.device.synchronize()?;
        self.device.launch(grid, &Sweep::odd(data));
        self.device.synchronize()?;
        Ok(())
    }

    fn checked_generation<T: SortElement>(
        &mut self,
        data: &mut [T],
        grid: Grid,
        signal: &ConvergenceSignal,
    ) -> Result<Swaps> {
        signal.reset();
        self.device
            .launch(grid, &Sweep::even(data).checked(signal.moved_even()));
        self.device.synchronize()?;
        self.device
            .launch(grid, &Sweep::odd(data).checked(signal.moved_odd()));
        self.device.synchronize()?;
        Ok(signal.swaps())
    }
}

fn check_len<T>(data: &[T]) -> Result<usize> {
    match data.len() {
        len @ 0..=1 => Err(SortError::TooShort { len }),
        len => Ok(len),
    }
}
