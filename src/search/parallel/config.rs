//! Configuration for parallel search execution.

use crate::error::{ConfigurationError, MIN_BOARD_SIZE};
use std::time::Duration;

/// Configuration for parallel search execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Board size `n`.
    pub board_size: usize,
    /// Number of worker threads to spawn (clamped to `board_size`).
    pub num_workers: usize,
    /// Initial pause after each placement and removal.
    pub step_delay: Duration,
    /// Overall timeout applied by [`SearchHandle::wait`](super::SearchHandle::wait).
    pub timeout: Option<Duration>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            num_workers: num_cpus::get(),
            step_delay: Duration::ZERO,
            timeout: None,
        }
    }
}

impl ParallelConfig {
    /// Create a config for an `n`×`n` board with default worker count.
    pub fn new(board_size: usize) -> Self {
        Self::default().with_board_size(board_size)
    }

    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Set the number of workers. Zero is kept as is and rejected by
    /// [`ParallelConfig::validate`].
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the overall timeout from an Option.
    pub fn with_timeout_option(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the config and return the number of workers actually used.
    ///
    /// More workers than first-row columns buys nothing, so the count is
    /// clamped to the board size.
    pub fn validate(&self) -> Result<usize, ConfigurationError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigurationError::InvalidBoardSize {
                size: self.board_size,
                minimum: MIN_BOARD_SIZE,
            });
        }
        if self.num_workers < 1 {
            return Err(ConfigurationError::InvalidWorkerCount(self.num_workers));
        }
        Ok(self.num_workers.min(self.board_size))
    }
}
