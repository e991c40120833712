//! Error types for starting a search run

/// Smallest board size accepted by [`crate::start`].
pub const MIN_BOARD_SIZE: usize = 4;

/// Rejected search configuration.
///
/// Raised synchronously before any worker is spawned. The caller must fix
/// the configuration and start again; nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The board is too small to be worth searching.
    #[error("invalid board size {size}: must be at least {minimum}")]
    InvalidBoardSize {
        /// Requested board size.
        size: usize,
        /// Smallest accepted size.
        minimum: usize,
    },

    /// At least one worker is required.
    #[error("invalid worker count {0}: must be at least 1")]
    InvalidWorkerCount(usize),
}
