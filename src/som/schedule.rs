//! Learning-rate and radius decay.

/// Multiplier applied to the learning rate after every iteration.
pub const LEARNING_RATE_DECAY: f64 = 0.995;

/// The neighbourhood radius never decays below this.
pub const MIN_RADIUS: u32 = 1;

/// Training parameters that evolve over a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingState {
    /// Number of completed iterations.
    pub iteration: usize,
    /// Current learning rate.
    pub learning_rate: f64,
    /// Current neighbourhood radius, in grid cells.
    pub radius: u32,
}

impl TrainingState {
    /// State at the start of a run.
    pub fn new(initial_learning_rate: f64, initial_radius: u32) -> Self {
        Self {
            iteration: 0,
            learning_rate: initial_learning_rate,
            radius: initial_radius,
        }
    }

    /// Applies one step of the decay schedule.
    ///
    /// The learning rate decays exponentially with no floor; the radius
    /// shrinks by one cell per iteration down to [`MIN_RADIUS`]. Neither
    /// depends on the data seen during the iteration.
    #[inline]
    pub fn decay(&mut self) {
        self.learning_rate *= LEARNING_RATE_DECAY;
        self.radius = self.radius.saturating_sub(1).max(MIN_RADIUS);
    }

    /// Decays and counts one completed iteration.
    #[inline]
    pub fn advance(&mut self) {
        self.decay();
        self.iteration += 1;
    }
}
