//! The 2-D grid of weight vectors.

use crate::error::{ChromaError, Result};
use crate::som::vector::{WeightVector, BLACK, CHANNELS};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// A `width x height` grid of weight vectors, indexed by `(x, y)`.
///
/// Cells are stored column-major (`x * height + y`), the order the BMU
/// scan visits them. Every component is an `f64` held in an `AtomicU64`
/// and accessed with `Relaxed` ordering, so the training thread can write
/// while renderers read without any lock.
///
/// There is no snapshot isolation: a read taken while a neighbourhood
/// update is in flight may see some cells (or some components of one
/// cell) from the new iteration and the rest from the previous one.
/// That is acceptable for a live view and is the only consistency the
/// grid offers.
#[derive(Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<[AtomicU64; CHANNELS]>,
}

/// A plain, owned copy of a grid's weights.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Weights in column-major order.
    pub cells: Vec<WeightVector>,
}

impl GridView {
    /// Returns the weights at `(x, y)`, or black when out of range.
    pub fn get(&self, x: usize, y: usize) -> WeightVector {
        if x < self.width && y < self.height {
            self.cells[x * self.height + y]
        } else {
            BLACK
        }
    }
}

#[inline]
fn atomic_cell(v: &WeightVector) -> [AtomicU64; CHANNELS] {
    v.map(|c| AtomicU64::new(c.to_bits()))
}

impl Grid {
    /// Creates a grid whose components are drawn independently and
    /// uniformly from [0, 1).
    ///
    /// Both dimensions must be positive.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        debug_assert!(width > 0 && height > 0, "grid dimensions must be positive");

        let cells = (0..width * height)
            .map(|_| {
                let v: WeightVector = [rng.gen(), rng.gen(), rng.gen()];
                atomic_cell(&v)
            })
            .collect();

        Self { width, height, cells }
    }

    /// Creates a grid from explicit weights given in column-major order.
    pub fn from_cells(width: usize, height: usize, cells: Vec<WeightVector>) -> Result<Self> {
        if cells.len() != width * height {
            return Err(ChromaError::Config(format!(
                "expected {} cells for a {}x{} grid, got {}",
                width * height,
                width,
                height,
                cells.len()
            )));
        }

        Ok(Self {
            width,
            height,
            cells: cells.iter().map(atomic_cell).collect(),
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Returns true if `(x, y)` lies inside the grid.
    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Returns the weights at `(x, y)`.
    ///
    /// Out-of-range coordinates yield black instead of failing, so a
    /// renderer working from stale dimensions never faults.
    pub fn get(&self, x: isize, y: isize) -> WeightVector {
        if self.contains(x, y) {
            self.cell(x as usize, y as usize)
        } else {
            BLACK
        }
    }

    /// Reads a cell known to be in range.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> WeightVector {
        debug_assert!(x < self.width && y < self.height);
        let cell = &self.cells[self.index(x, y)];
        [
            f64::from_bits(cell[0].load(Ordering::Relaxed)),
            f64::from_bits(cell[1].load(Ordering::Relaxed)),
            f64::from_bits(cell[2].load(Ordering::Relaxed)),
        ]
    }

    /// Overwrites a cell known to be in range.
    #[inline]
    pub fn set(&self, x: usize, y: usize, v: &WeightVector) {
        debug_assert!(x < self.width && y < self.height);
        let cell = &self.cells[self.index(x, y)];
        for (slot, c) in cell.iter().zip(v.iter()) {
            slot.store(c.to_bits(), Ordering::Relaxed);
        }
    }

    /// Redraws every component uniformly from [0, 1), in the same order
    /// as [`Grid::random`].
    pub fn randomize<R: Rng + ?Sized>(&self, rng: &mut R) {
        for x in 0..self.width {
            for y in 0..self.height {
                let v: WeightVector = [rng.gen(), rng.gen(), rng.gen()];
                self.set(x, y, &v);
            }
        }
    }

    /// Copies the current weights out of the grid.
    ///
    /// Taken during training, the copy may be torn (see the type docs).
    pub fn snapshot(&self) -> GridView {
        let mut cells = Vec::with_capacity(self.total_cells());
        for x in 0..self.width {
            for y in 0..self.height {
                cells.push(self.cell(x, y));
            }
        }
        GridView {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}
