//! Neighbourhood update around the BMU.

use crate::som::grid::Grid;
use crate::som::vector::{lerp, WeightVector};

/// Gaussian influence of the BMU on a cell `grid_dist` cells away.
///
/// Equals 1 at the BMU itself.
#[inline]
pub fn influence(grid_dist: f64, radius: u32) -> f64 {
    let r = f64::from(radius);
    (-(grid_dist * grid_dist) / (2.0 * r * r)).exp()
}

/// Pulls every cell within `radius` of `bmu` towards `input`.
///
/// Cells are visited over the bounding box of the circle, clamped to the
/// grid; those whose grid distance exceeds `radius` are left untouched.
/// Each remaining component moves by `influence * learning_rate` of its
/// gap to the input, so the BMU itself moves by exactly `learning_rate`.
pub fn update(
    grid: &Grid,
    bmu: (usize, usize),
    input: &WeightVector,
    learning_rate: f64,
    radius: u32,
) {
    let (bx, by) = bmu;
    let r = radius as usize;
    let radius_f = f64::from(radius);

    let x_min = bx.saturating_sub(r);
    let x_max = (grid.width() - 1).min(bx.saturating_add(r));
    let y_min = by.saturating_sub(r);
    let y_max = (grid.height() - 1).min(by.saturating_add(r));

    for x in x_min..=x_max {
        for y in y_min..=y_max {
            let dx = x as f64 - bx as f64;
            let dy = y as f64 - by as f64;
            let grid_dist = (dx * dx + dy * dy).sqrt();
            if grid_dist > radius_f {
                continue;
            }

            let step = influence(grid_dist, radius) * learning_rate;
            let weights = grid.cell(x, y);
            grid.set(x, y, &lerp(&weights, input, step));
        }
    }
}
