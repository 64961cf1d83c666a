//! Self-Organizing Map (SOM) module for colour clustering.
//!
//! Leaf-first:
//!
//! - **vector**: fixed-length weight vectors and distances
//! - **grid**: the lock-free W x H grid of weight vectors
//! - **samples**: the colours being learned
//! - **bmu**: exhaustive best-matching-unit search
//! - **neighborhood**: Gaussian update around the BMU
//! - **schedule**: learning-rate and radius decay
//! - **map**: the training controller
//! - **metrics**: quantization and topographic error

pub mod bmu;
mod grid;
mod map;
pub mod metrics;
pub mod neighborhood;
mod samples;
pub mod schedule;
pub mod vector;

pub use grid::{Grid, GridView};
pub use map::{Som, StopHandle, TrainingOutcome, TrainingPhase, TrainingSummary};
pub use metrics::MapQuality;
pub use samples::SampleSet;
pub use schedule::TrainingState;
pub use vector::{WeightVector, CHANNELS};
