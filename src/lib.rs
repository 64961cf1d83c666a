//! # chromasom - Colour clustering with a Kohonen Self-Organizing Map
//!
//! chromasom trains a Self-Organizing Map (SOM) on a small set of sample
//! colours. A 2-D grid of RGB weight vectors starts out random and, sample
//! by sample, organizes itself so that similar colours end up close
//! together on the grid.
//!
//! ## Overview
//!
//! Each training iteration draws one sample, finds the Best Matching Unit
//! (the cell closest to it), pulls the cells within the current radius of
//! that unit towards the sample with a Gaussian falloff, and then decays
//! the learning rate and radius. Training runs on one thread while other
//! threads watch progress, read colours for display, or cancel the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chromasom::{palette, SampleSet, Som, SomConfig};
//!
//! let config = SomConfig { width: 40, height: 40, seed: Some(7), ..Default::default() };
//! config.validate()?;
//!
//! let samples = SampleSet::new(palette::default_samples(3))?;
//! let som = Som::new(&config, samples);
//!
//! let summary = som.train(5000, |iteration| {
//!     if iteration % 1000 == 0 {
//!         println!("iteration {}", iteration);
//!     }
//! });
//! println!("{:?}, top-left colour {:?}", summary.outcome, som.color_at(0, 0));
//! # Ok::<(), chromasom::ChromaError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`som`] - the learning engine (grid, BMU search, update, training loop)
//! - [`palette`] - preset colours and colour parsing
//! - [`render`] - grid to PNG rendering
//! - [`config`] - configuration
//! - [`error`] - error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod palette;
pub mod render;
pub mod som;

// Re-export commonly used types
pub use config::{Config, RenderConfig, SomConfig, StoppingCriterion};
pub use error::{ChromaError, Result};
pub use som::{
    Grid, GridView, MapQuality, SampleSet, Som, StopHandle, TrainingOutcome, TrainingPhase,
    TrainingState, TrainingSummary, WeightVector,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
