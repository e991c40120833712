//! One worker: a slice of first-row columns searched sequentially.

use crate::board::Board;
use crate::search::cancel::CancellationToken;
use crate::search::config::SearchConfig;
use crate::search::result::{CompletionReason, SearchStatistics, WorkerReport};
use crate::search::sink::Sink;
use crate::search::solver::Solver;
use std::ops::Range;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a worker. `Completed` and `Cancelled` are final; a new run
/// builds new workers instead of restarting old ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl WorkerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerState::Completed | WorkerState::Cancelled)
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => WorkerState::Idle,
            1 => WorkerState::Running,
            2 => WorkerState::Completed,
            _ => WorkerState::Cancelled,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            WorkerState::Idle => 0,
            WorkerState::Running => 1,
            WorkerState::Completed => 2,
            WorkerState::Cancelled => 3,
        }
    }
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerState::Idle => write!(f, "idle"),
            WorkerState::Running => write!(f, "running"),
            WorkerState::Completed => write!(f, "completed"),
            WorkerState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Lock-free state cell read by the handle while the worker thread runs.
#[derive(Debug)]
pub struct WorkerStatus(AtomicU8);

impl Default for WorkerStatus {
    fn default() -> Self {
        Self(AtomicU8::new(WorkerState::Idle.as_u8()))
    }
}

impl WorkerStatus {
    pub fn get(&self) -> WorkerState {
        WorkerState::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub(crate) fn set(&self, state: WorkerState) {
        self.0.store(state.as_u8(), Ordering::SeqCst);
    }
}

/// Search every board whose first-row queen lies in `columns`.
///
/// Each column gets a fresh seeded board and solver starting at row 1.
/// Returns once all columns are exhausted or a stop is observed.
pub fn run_worker(
    worker_id: usize,
    n: usize,
    columns: Range<usize>,
    sink: Option<&dyn Sink>,
    token: &CancellationToken,
    config: &SearchConfig,
) -> WorkerReport {
    let mut statistics = SearchStatistics::new();
    let mut reason = CompletionReason::Exhausted;

    for col in columns.clone() {
        if token.is_cancelled() {
            reason = CompletionReason::Cancelled;
            break;
        }

        let board = Board::with_first_queen(n, col);
        let mut solver = Solver::new(board, worker_id, config.clone(), token);
        if let Some(sink) = sink {
            solver = solver.with_sink(sink);
        }
        reason = reason.merge(solver.search_from_row(1));
        statistics.absorb(solver.statistics());

        tracing::debug!(
            worker_id,
            col,
            solutions = solver.statistics().solutions_found,
            %reason,
            "first-row column finished"
        );
        if reason.is_cancelled() {
            break;
        }
    }

    WorkerReport {
        worker_id,
        columns,
        reason,
        statistics,
    }
}

/// [`run_worker`] with lifecycle tracking for the handle.
pub(crate) fn run_tracked_worker(
    worker_id: usize,
    n: usize,
    columns: Range<usize>,
    sink: Option<&dyn Sink>,
    token: &CancellationToken,
    config: &SearchConfig,
    status: &WorkerStatus,
) -> WorkerReport {
    status.set(WorkerState::Running);
    let report = run_worker(worker_id, n, columns, sink, token, config);
    status.set(match report.reason {
        CompletionReason::Exhausted => WorkerState::Completed,
        CompletionReason::Cancelled => WorkerState::Cancelled,
    });
    report
}
