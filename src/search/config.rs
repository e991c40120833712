//! Configuration types for the backtracking search

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Pause applied after every placement and removal.
///
/// Cloning shares the underlying value, so a handle kept by the caller can
/// retune the pacing of solvers that are already running.
#[derive(Debug, Clone, Default)]
pub struct StepDelay {
    millis: Arc<AtomicU64>,
}

impl StepDelay {
    pub fn new(delay: Duration) -> Self {
        Self::from_millis(duration_millis(delay))
    }

    pub fn from_millis(millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(millis)),
        }
    }

    pub fn get(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::Relaxed))
    }

    pub fn set(&self, delay: Duration) {
        self.millis.store(duration_millis(delay), Ordering::Relaxed);
    }

    pub fn is_zero(&self) -> bool {
        self.millis.load(Ordering::Relaxed) == 0
    }
}

pub(crate) fn duration_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// Configuration for a single solver
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Pacing after each board mutation (zero = run flat out)
    pub step_delay: StepDelay,
    /// Whether solvers keep their own copy of every solution they find
    pub keep_local_solutions: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self {
            step_delay: StepDelay::default(),
            keep_local_solutions: true,
        }
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = StepDelay::new(delay);
        self
    }

    pub fn with_step_delay_ms(mut self, millis: u64) -> Self {
        self.step_delay = StepDelay::from_millis(millis);
        self
    }

    /// Share an existing delay handle instead of owning a fresh one.
    pub fn with_shared_step_delay(mut self, delay: StepDelay) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn with_local_solutions(mut self, keep: bool) -> Self {
        self.keep_local_solutions = keep;
        self
    }
}
