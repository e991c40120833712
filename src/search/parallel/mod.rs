//! Parallel search execution over first-row column partitions.
//!
//! # Architecture
//!
//! - **Partitioning** splits the `n` first-row columns into contiguous,
//!   balanced ranges, one per worker
//! - Each **worker** thread searches its columns sequentially, one fresh
//!   seeded board and solver per column
//! - Workers share nothing but the **sink** and the cancellation token
//! - The **handle** returned by [`start`] stops, waits on and queries the run
//!
//! # Example
//!
//! ```no_run
//! use nqueens::search::parallel::start;
//!
//! let mut handle = start(8, 4).expect("valid configuration");
//! let report = handle.wait_for_completion();
//! assert_eq!(report.total_solutions(), 92);
//! ```

pub mod config;
pub mod coordinator;
pub mod partition;
pub mod worker;

pub use config::ParallelConfig;
pub use coordinator::{SearchHandle, start, start_with_sink};
pub use partition::partition_columns;
pub use worker::{WorkerState, run_worker};
