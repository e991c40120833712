//! # nqueens
//!
//! Exhaustive, parallel enumeration of N-Queens placements with live
//! progress reporting.
//!
//! The first row is split between worker threads. Each worker runs a
//! depth-first backtracking search per assigned column and reports every
//! board mutation and every solution to a shared [`Sink`]. The
//! [`Aggregator`] sink keeps the latest step and all solutions per worker
//! for a host to poll while the search runs.
//!
//! ```no_run
//! use nqueens::start;
//!
//! let mut handle = start(8, 4).expect("valid configuration");
//! while handle.is_running() {
//!     if let Some(step) = handle.poll_state(0) {
//!         println!("worker 0: {} ({}, {})", step.action, step.row, step.col);
//!     }
//!     std::thread::sleep(std::time::Duration::from_millis(10));
//! }
//! let report = handle.wait_for_completion();
//! println!("{}", report);
//! ```

pub mod aggregator;
pub mod board;
pub mod error;
pub mod search;

pub use aggregator::Aggregator;
pub use board::Board;
pub use error::{ConfigurationError, MIN_BOARD_SIZE};
pub use search::{
    Action, CancellationToken, CompletionReason, ParallelConfig, SearchConfig, SearchHandle,
    SearchReport, Sink, Solution, StepEvent, start, start_with_sink,
};
