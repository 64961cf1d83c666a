//! The training controller: a colour SOM and its iterate/decay/cancel loop.

use crate::config::SomConfig;
use crate::som::bmu::find_bmu;
use crate::som::grid::{Grid, GridView};
use crate::som::neighborhood;
use crate::som::samples::SampleSet;
use crate::som::schedule::TrainingState;
use crate::som::vector::WeightVector;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Iterations between progress log lines.
const PROGRESS_LOG_INTERVAL: usize = 1000;

/// Lifecycle of a [`Som`].
///
/// `Stopped` is terminal: a stopped map never trains again until
/// [`Som::reinitialize`] puts it back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingPhase {
    /// Constructed, not yet trained.
    Idle,
    /// Inside a [`Som::train`] call.
    Running,
    /// Budget exhausted or cancelled.
    Stopped,
}

impl TrainingPhase {
    fn as_u8(self) -> u8 {
        match self {
            TrainingPhase::Idle => 0,
            TrainingPhase::Running => 1,
            TrainingPhase::Stopped => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => TrainingPhase::Idle,
            1 => TrainingPhase::Running,
            _ => TrainingPhase::Stopped,
        }
    }
}

/// How a call to [`Som::train`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOutcome {
    /// The iteration budget was used up.
    Completed,
    /// A stop request was observed.
    Cancelled,
    /// The map had already finished a run; nothing was done.
    AlreadyStopped,
}

/// Result of a call to [`Som::train`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSummary {
    /// Iterations performed by this call.
    pub iterations: usize,
    /// Learning rate after the last iteration.
    pub learning_rate: f64,
    /// Neighbourhood radius after the last iteration.
    pub radius: u32,
    /// Why the run ended.
    pub outcome: TrainingOutcome,
}

/// A cloneable, thread-safe cancellation flag.
///
/// Once set it stays set.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that training stop. Idempotent.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A self-organizing map of colours together with its training state.
///
/// One thread trains through [`Som::train`] while any number of others
/// read through `&Som` (or an `Arc<Som>`): [`Som::color_at`],
/// [`Som::current_iteration`], [`Som::snapshot`] and the stop controls.
/// Reads never block and are not synchronized with the training loop, so
/// they may observe a partly updated grid or a counter one step ahead of
/// the weights. Only the stop flag carries a cross-thread guarantee.
#[derive(Debug)]
pub struct Som {
    grid: Grid,
    samples: SampleSet,
    initial_learning_rate: f64,
    initial_radius: u32,
    iteration: AtomicUsize,
    learning_rate: AtomicU64,
    radius: AtomicU32,
    phase: AtomicU8,
    stop: StopHandle,
    rng: Mutex<ChaCha8Rng>,
}

impl Som {
    /// Creates a map with a randomly initialized grid.
    ///
    /// Seeds the generator from `config.seed` when set, otherwise from
    /// system entropy. The configuration is assumed to have passed
    /// [`SomConfig::validate`].
    pub fn new(config: &SomConfig, samples: SampleSet) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, samples, rng)
    }

    /// Creates a map drawing all of its randomness from `rng`.
    ///
    /// The grid is initialized first, then the same generator drives
    /// sample selection during training.
    pub fn with_rng(config: &SomConfig, samples: SampleSet, mut rng: ChaCha8Rng) -> Self {
        let grid = Grid::random(config.width, config.height, &mut rng);
        Self::with_grid(
            grid,
            samples,
            config.initial_learning_rate,
            config.initial_radius,
            rng,
        )
    }

    /// Creates a map around an existing grid.
    pub fn with_grid(
        grid: Grid,
        samples: SampleSet,
        initial_learning_rate: f64,
        initial_radius: u32,
        rng: ChaCha8Rng,
    ) -> Self {
        debug_assert!(initial_learning_rate > 0.0, "learning rate must be positive");
        debug_assert!(initial_radius > 0, "radius must be positive");

        Self {
            grid,
            samples,
            initial_learning_rate,
            initial_radius,
            iteration: AtomicUsize::new(0),
            learning_rate: AtomicU64::new(initial_learning_rate.to_bits()),
            radius: AtomicU32::new(initial_radius),
            phase: AtomicU8::new(TrainingPhase::Idle.as_u8()),
            stop: StopHandle::new(),
            rng: Mutex::new(rng),
        }
    }

    /// Runs up to `max_iterations` training iterations.
    ///
    /// Each iteration calls `on_iteration` with the number of iterations
    /// completed so far (before the iteration does any work), draws a
    /// sample, finds its BMU, updates the neighbourhood, decays the
    /// learning rate and radius, and counts itself. The stop flag is
    /// checked before the first iteration and after every iteration, so
    /// at most one iteration completes after a stop request.
    ///
    /// `on_iteration` runs on the training thread; a slow callback slows
    /// training. A concurrent second call blocks until this one returns
    /// and then finds the map stopped.
    pub fn train<F>(&self, max_iterations: usize, mut on_iteration: F) -> TrainingSummary
    where
        F: FnMut(usize),
    {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut state = self.training_state();

        if self.phase() == TrainingPhase::Stopped {
            warn!("SOM training requested on a stopped map; ignoring");
            return self.summary(0, &state, TrainingOutcome::AlreadyStopped);
        }
        self.set_phase(TrainingPhase::Running);

        info!(
            "Starting SOM training: {}x{} grid, {} samples, {} iterations, lr={}, radius={}",
            self.grid.width(),
            self.grid.height(),
            self.samples.len(),
            max_iterations,
            state.learning_rate,
            state.radius
        );

        let start = state.iteration;
        let outcome = loop {
            if state.iteration >= max_iterations {
                break TrainingOutcome::Completed;
            }
            if self.stop.is_stop_requested() {
                break TrainingOutcome::Cancelled;
            }

            on_iteration(state.iteration);

            let input = *self.samples.draw(&mut *rng);
            let bmu = find_bmu(&self.grid, &input);
            neighborhood::update(&self.grid, bmu, &input, state.learning_rate, state.radius);

            state.advance();
            self.publish(&state);

            if state.iteration % PROGRESS_LOG_INTERVAL == 0 {
                debug!(
                    "Iteration {}/{}: lr={:.6}, radius={}",
                    state.iteration, max_iterations, state.learning_rate, state.radius
                );
            }

            if self.stop.is_stop_requested() {
                break TrainingOutcome::Cancelled;
            }
        };

        self.set_phase(TrainingPhase::Stopped);

        match outcome {
            TrainingOutcome::Cancelled => info!(
                "SOM training cancelled after {} iterations",
                state.iteration
            ),
            _ => info!("SOM training completed after {} iterations", state.iteration),
        }

        self.summary(state.iteration - start, &state, outcome)
    }

    /// Asks a running (or future) training call to stop.
    ///
    /// Safe from any thread and idempotent. Requested before training, it
    /// makes the next [`Som::train`] perform no iterations.
    pub fn request_stop(&self) {
        self.stop.request_stop();
    }

    /// Returns a handle that can stop this map's training without
    /// borrowing the map.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Returns true once a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_stop_requested()
    }

    /// Puts the map back into its freshly constructed condition.
    ///
    /// Redraws the grid from the map's generator, restores the initial
    /// learning rate and radius, zeroes the iteration counter and installs
    /// a new stop flag. Handles obtained earlier no longer affect this map.
    pub fn reinitialize(&mut self) {
        let rng = self.rng.get_mut().unwrap_or_else(PoisonError::into_inner);
        self.grid.randomize(rng);

        let state = TrainingState::new(self.initial_learning_rate, self.initial_radius);
        self.publish(&state);
        self.set_phase(TrainingPhase::Idle);
        self.stop = StopHandle::new();
    }

    /// Returns the weights at `(x, y)`, or black outside the grid.
    pub fn color_at(&self, x: isize, y: isize) -> WeightVector {
        self.grid.get(x, y)
    }

    /// Number of completed training iterations.
    pub fn current_iteration(&self) -> usize {
        self.iteration.load(Ordering::Relaxed)
    }

    /// Current learning rate.
    pub fn learning_rate(&self) -> f64 {
        f64::from_bits(self.learning_rate.load(Ordering::Relaxed))
    }

    /// Current neighbourhood radius.
    pub fn radius(&self) -> u32 {
        self.radius.load(Ordering::Relaxed)
    }

    /// Iteration counter, learning rate and radius, read individually.
    pub fn training_state(&self) -> TrainingState {
        TrainingState {
            iteration: self.current_iteration(),
            learning_rate: self.learning_rate(),
            radius: self.radius(),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TrainingPhase {
        TrainingPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Number of grid columns.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Number of grid rows.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// The colours being learned.
    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    /// Copies the grid's current weights.
    pub fn snapshot(&self) -> GridView {
        self.grid.snapshot()
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    fn publish(&self, state: &TrainingState) {
        self.learning_rate
            .store(state.learning_rate.to_bits(), Ordering::Relaxed);
        self.radius.store(state.radius, Ordering::Relaxed);
        self.iteration.store(state.iteration, Ordering::Relaxed);
    }

    fn set_phase(&self, phase: TrainingPhase) {
        self.phase.store(phase.as_u8(), Ordering::Release);
    }

    fn summary(
        &self,
        iterations: usize,
        state: &TrainingState,
        outcome: TrainingOutcome,
    ) -> TrainingSummary {
        TrainingSummary {
            iterations,
            learning_rate: state.learning_rate,
            radius: state.radius,
            outcome,
        }
    }
}
