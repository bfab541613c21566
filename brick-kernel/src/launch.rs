//! Launch geometry.

use crate::{KernelError, Result};

/// Threads per block used when the caller does not choose one.
pub const DEFAULT_BLOCK_DIM: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridSize {
    /// One thread per array slot, rounded up to whole blocks.
    Auto,
    /// Explicit number of blocks.
    Blocks(usize),
    /// Explicit total thread count, rounded up to whole blocks.
    Threads(usize),
}

/// Caller-facing launch configuration.
///
/// The default uses [`DEFAULT_BLOCK_DIM`] threads per block and enough blocks
/// to give every array slot its own thread (`ceil(len / block_dim)` blocks).
/// Because kernels loop with a grid stride, any configuration is correct;
/// the geometry only changes how work is spread over logical threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    block_dim: usize,
    grid: GridSize,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            block_dim: DEFAULT_BLOCK_DIM,
            grid: GridSize::Auto,
        }
    }
}

impl LaunchConfig {
    /// Set the number of threads per block.
    pub fn with_block_dim(mut self, block_dim: usize) -> Self {
        self.block_dim = block_dim;
        self
    }

    /// Set an explicit number of blocks.
    pub fn with_grid_dim(mut self, grid_dim: usize) -> Self {
        self.grid = GridSize::Blocks(grid_dim);
        self
    }

    /// Request a total launch width.
    ///
    /// The width is rounded up to whole blocks. A width smaller than the
    /// block dimension launches a single, narrower block.
    pub fn with_launch_width(mut self, threads: usize) -> Self {
        self.grid = GridSize::Threads(threads);
        self
    }

    /// Threads per block.
    pub fn block_dim(&self) -> usize {
        self.block_dim
    }

    /// Resolve the configuration into a concrete grid for an array of `len`
    /// elements.
    pub fn resolve(&self, len: usize) -> Result<Grid> {
        if self.block_dim == 0 {
            return Err(KernelError::InvalidLaunch("block dimension must be nonzero"));
        }
        match self.grid {
            GridSize::Auto => Ok(Grid {
                block_dim: self.block_dim,
                grid_dim: len.div_ceil(self.block_dim).max(1),
            }),
            GridSize::Blocks(0) => Err(KernelError::InvalidLaunch("grid dimension must be nonzero")),
            GridSize::Blocks(grid_dim) => Ok(Grid {
                block_dim: self.block_dim,
                grid_dim,
            }),
            GridSize::Threads(0) => Err(KernelError::InvalidLaunch("launch width must be nonzero")),
            GridSize::Threads(threads) => {
                let block_dim = self.block_dim.min(threads);
                Ok(Grid {
                    block_dim,
                    grid_dim: threads.div_ceil(block_dim),
                })
            }
        }
    }
}

/// Concrete launch geometry: `grid_dim` blocks of `block_dim` threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    block_dim: usize,
    grid_dim: usize,
}

impl Grid {
    /// Build a grid directly. Both dimensions must be nonzero.
    pub fn new(block_dim: usize, grid_dim: usize) -> Result<Self> {
        if block_dim == 0 || grid_dim == 0 {
            return Err(KernelError::InvalidLaunch("grid dimensions must be nonzero"));
        }
        Ok(Self {
            block_dim,
            grid_dim,
        })
    }

    pub fn block_dim(&self) -> usize {
        self.block_dim
    }

    pub fn grid_dim(&self) -> usize {
        self.grid_dim
    }

    /// Total number of logical threads (the launch width).
    pub fn threads(&self) -> usize {
        self.block_dim.saturating_mul(self.grid_dim)
    }
}
