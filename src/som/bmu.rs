//! Best Matching Unit (BMU) search.
//!
//! The search is an exhaustive scan over every cell, `x` in the outer loop
//! and `y` in the inner loop. A cell replaces the running best only when
//! it is strictly closer, so on exact ties the first cell in scan order
//! wins. Callers rely on that tie-break; an approximate index would change
//! which cell is returned.

use crate::som::grid::Grid;
use crate::som::vector::{distance, WeightVector};

/// Finds the cell whose weights are closest (Euclidean) to `input`.
#[inline]
pub fn find_bmu(grid: &Grid, input: &WeightVector) -> (usize, usize) {
    find_bmu_with_distance(grid, input).0
}

/// Finds the BMU and its distance to `input`.
pub fn find_bmu_with_distance(grid: &Grid, input: &WeightVector) -> ((usize, usize), f64) {
    let mut best = (0, 0);
    let mut best_dist = f64::MAX;

    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let dist = distance(input, &grid.cell(x, y));
            if dist < best_dist {
                best_dist = dist;
                best = (x, y);
            }
        }
    }

    (best, best_dist)
}

/// Finds the best and second-best matching cells.
///
/// Uses the same scan order and tie rule as [`find_bmu`]. On a grid with a
/// single cell both results are that cell.
pub fn find_two_best(grid: &Grid, input: &WeightVector) -> ((usize, usize), (usize, usize)) {
    let mut best = (0, 0);
    let mut best_dist = f64::MAX;
    let mut second = (0, 0);
    let mut second_dist = f64::MAX;

    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let dist = distance(input, &grid.cell(x, y));
            if dist < best_dist {
                second = best;
                second_dist = best_dist;
                best = (x, y);
                best_dist = dist;
            } else if dist < second_dist {
                second = (x, y);
                second_dist = dist;
            }
        }
    }

    (best, second)
}
