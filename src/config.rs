//! Configuration for the chromasom engine.

use crate::error::{ChromaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for chromasom.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SOM (Self-Organizing Map) configuration.
    pub som: SomConfig,

    /// Image rendering configuration.
    pub render: RenderConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing sections and fields fall back to their defaults, so a file
    /// containing only `{"som": {"width": 20}}` is valid.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        Ok(config)
    }
}

/// When a training run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoppingCriterion {
    /// Stop after a fixed number of sample presentations.
    Iterations(usize),
    /// Stop after `n` epochs, where one epoch presents every sample once
    /// for every cell of the grid.
    Epochs(usize),
}

impl StoppingCriterion {
    /// Converts the criterion into the iteration budget passed to training.
    ///
    /// An epoch is `width * height * sample_count` iterations.
    pub fn iteration_budget(&self, width: usize, height: usize, sample_count: usize) -> usize {
        match *self {
            StoppingCriterion::Iterations(n) => n,
            StoppingCriterion::Epochs(n) => n
                .saturating_mul(width)
                .saturating_mul(height)
                .saturating_mul(sample_count),
        }
    }
}

impl Default for StoppingCriterion {
    fn default() -> Self {
        StoppingCriterion::Iterations(5000)
    }
}

/// Self-Organizing Map configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SomConfig {
    /// Number of grid columns.
    /// Default: 50.
    pub width: usize,

    /// Number of grid rows.
    /// Default: 50.
    pub height: usize,

    /// Initial learning rate, conventionally in (0, 1].
    /// Default: 0.1.
    pub initial_learning_rate: f64,

    /// Initial neighborhood radius in grid cells.
    /// Default: 150.
    pub initial_radius: u32,

    /// Stopping criterion for a training run.
    /// Default: 5,000 iterations.
    pub stopping: StoppingCriterion,

    /// Random seed for reproducibility.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            initial_learning_rate: 0.1,
            initial_radius: 150,
            stopping: StoppingCriterion::default(),
            seed: None,
        }
    }
}

impl SomConfig {
    /// Returns the total number of cells in the grid.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.width * self.height
    }

    /// Checks the configuration before it reaches the training engine.
    ///
    /// The engine assumes these hold and does not re-check them.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChromaError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.initial_learning_rate.is_finite() || self.initial_learning_rate <= 0.0 {
            return Err(ChromaError::Config(format!(
                "initial learning rate must be a positive number, got {}",
                self.initial_learning_rate
            )));
        }
        if self.initial_radius == 0 {
            return Err(ChromaError::Config(
                "initial radius must be positive".to_string(),
            ));
        }
        let budget = match self.stopping {
            StoppingCriterion::Iterations(n) | StoppingCriterion::Epochs(n) => n,
        };
        if budget == 0 {
            return Err(ChromaError::Config(
                "stopping value must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Image rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixel edge length of one grid cell.
    /// Default: 10.
    pub scale: u32,

    /// Width in pixels of the black gap between the before and after panes.
    /// Default: 20.
    pub gutter: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 10,
            gutter: 20,
        }
    }
}
