//! Backtracking search for N-Queens placements
//!
//! - [`solver`]: depth-first search over one privately owned board
//! - [`parallel`]: partitioning the first row across worker threads
//! - [`sink`]: progress events and the receivers they are sent to
//! - [`cancel`]: cooperative stop signal with interruptible pacing

pub mod cancel;
pub mod config;
pub mod parallel;
pub mod result;
pub mod sink;
pub mod solver;

pub use cancel::CancellationToken;
pub use config::{SearchConfig, StepDelay};
pub use parallel::{ParallelConfig, SearchHandle, start, start_with_sink};
pub use result::{CompletionReason, SearchReport, SearchStatistics, WorkerReport};
pub use sink::{Action, ChannelSink, SearchEvent, Sink, Solution, StepEvent};
pub use solver::{Solver, SolverState, count_solutions, known_solution_count};
