//! Map quality measures.
//!
//! - **Quantization error**: mean distance from each sample to its BMU.
//!   Falls as the map learns the samples.
//! - **Topographic error**: fraction of samples whose best and second-best
//!   cells are not adjacent on the grid. Falls as the map becomes
//!   topologically ordered.
//!
//! Samples are evaluated in parallel; per-sample results are collected in
//! order and summed sequentially so the values are reproducible.

use crate::som::bmu::{find_bmu_with_distance, find_two_best};
use crate::som::grid::Grid;
use crate::som::map::Som;
use crate::som::samples::SampleSet;
use rayon::prelude::*;

/// Quality of a map against its sample set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapQuality {
    /// Mean sample-to-BMU distance.
    pub quantization_error: f64,
    /// Fraction of samples whose two best cells are not neighbours.
    pub topographic_error: f64,
}

impl MapQuality {
    /// Measures a grid against a sample set.
    pub fn measure(grid: &Grid, samples: &SampleSet) -> Self {
        Self {
            quantization_error: quantization_error(grid, samples),
            topographic_error: topographic_error(grid, samples),
        }
    }

    /// Measures a map's current grid against its own samples.
    ///
    /// Taken during training, the result reflects a possibly torn grid.
    pub fn of(som: &Som) -> Self {
        Self::measure(som.grid(), som.samples())
    }
}

/// Mean Euclidean distance from each sample to its BMU.
pub fn quantization_error(grid: &Grid, samples: &SampleSet) -> f64 {
    let distances: Vec<f64> = samples
        .as_slice()
        .par_iter()
        .map(|s| find_bmu_with_distance(grid, s).1)
        .collect();

    distances.iter().sum::<f64>() / distances.len() as f64
}

/// Fraction of samples whose best and second-best cells are not
/// 8-neighbours.
pub fn topographic_error(grid: &Grid, samples: &SampleSet) -> f64 {
    let misses: Vec<bool> = samples
        .as_slice()
        .par_iter()
        .map(|s| {
            let (best, second) = find_two_best(grid, s);
            !are_neighbors(best, second)
        })
        .collect();

    misses.iter().filter(|&&miss| miss).count() as f64 / misses.len() as f64
}

/// True if two cells are equal or touch, diagonals included.
#[inline]
fn are_neighbors(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_map_has_zero_quantization_error() {
        let grid = Grid::from_cells(2, 1, vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).unwrap();
        let samples = SampleSet::new(vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).unwrap();

        assert_eq!(quantization_error(&grid, &samples), 0.0);
    }

    #[test]
    fn test_quantization_error_is_mean_distance() {
        let grid = Grid::from_cells(1, 1, vec![[0.0, 0.0, 0.0]]).unwrap();
        let samples = SampleSet::new(vec![[1.0, 0.0, 0.0], [0.0, 0.5, 0.0]]).unwrap();

        assert!((quantization_error(&grid, &samples) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_topographic_error() {
        // Best and second best for red are the two ends of a 4x1 strip
        let grid = Grid::from_cells(
            4,
            1,
            vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.9], [0.9, 0.0, 0.0]],
        )
        .unwrap();
        let red = SampleSet::new(vec![[1.0, 0.0, 0.0]]).unwrap();
        assert_eq!(topographic_error(&grid, &red), 1.0);

        let blue = SampleSet::new(vec![[0.0, 0.0, 1.0]]).unwrap();
        assert_eq!(topographic_error(&grid, &blue), 0.0);

        let both = SampleSet::new(vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).unwrap();
        let quality = MapQuality::measure(&grid, &both);
        assert_eq!(quality.topographic_error, 0.5);
        assert_eq!(quality.quantization_error, 0.0);
    }

    #[test]
    fn test_single_cell_grid_is_ordered() {
        let grid = Grid::from_cells(1, 1, vec![[0.5, 0.5, 0.5]]).unwrap();
        let samples = SampleSet::new(vec![[0.0, 0.0, 0.0]]).unwrap();
        assert_eq!(topographic_error(&grid, &samples), 0.0);
    }

    #[test]
    fn test_are_neighbors() {
        assert!(are_neighbors((2, 2), (2, 2)));
        assert!(are_neighbors((2, 2), (3, 3)));
        assert!(are_neighbors((2, 2), (1, 2)));
        assert!(!are_neighbors((2, 2), (4, 2)));
        assert!(!are_neighbors((0, 0), (0, 2)));
    }
}
