//! Depth-first backtracking over one board
//!
//! The solver fills rows top-down. Every placement and removal is reported
//! to the sink as a [`StepEvent`] carrying a board snapshot, and every
//! complete board is reported as a [`Solution`]. Finding a solution does not
//! end the search: sibling branches are still explored, so the solver
//! enumerates every completion of its starting board.

use crate::board::Board;
use crate::search::cancel::CancellationToken;
use crate::search::config::SearchConfig;
use crate::search::result::{CompletionReason, SearchStatistics};
use crate::search::sink::{Action, Sink, Solution, StepEvent};
use std::ops::ControlFlow;
use std::time::Instant;

/// Lifecycle of a [`Solver`]. `Exhausted` and `Cancelled` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverState {
    NotStarted,
    Searching,
    Exhausted,
    Cancelled,
}

impl SolverState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SolverState::Exhausted | SolverState::Cancelled)
    }
}

/// Backtracking search bound to one privately owned board.
pub struct Solver<'a> {
    board: Board,
    worker_id: usize,
    config: SearchConfig,
    sink: Option<&'a dyn Sink>,
    token: &'a CancellationToken,
    solutions: Vec<Solution>,
    statistics: SearchStatistics,
    state: SolverState,
}

impl<'a> Solver<'a> {
    pub fn new(
        board: Board,
        worker_id: usize,
        config: SearchConfig,
        token: &'a CancellationToken,
    ) -> Self {
        Self {
            board,
            worker_id,
            config,
            sink: None,
            token,
            solutions: Vec::new(),
            statistics: SearchStatistics::new(),
            state: SolverState::NotStarted,
        }
    }

    /// Report progress to `sink`.
    pub fn with_sink(mut self, sink: &'a dyn Sink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Solutions found so far, in discovery order. Empty when the config
    /// disables local solution storage.
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Explore every completion of the current board starting at `row`.
    ///
    /// Runs at most once: calling this on a solver that already finished
    /// returns the recorded outcome without searching again.
    pub fn search_from_row(&mut self, row: usize) -> CompletionReason {
        match self.state {
            SolverState::Exhausted => return CompletionReason::Exhausted,
            SolverState::Cancelled => return CompletionReason::Cancelled,
            SolverState::NotStarted | SolverState::Searching => {}
        }

        self.state = SolverState::Searching;
        let start_time = Instant::now();
        let flow = self.explore(row);
        self.statistics.elapsed_time += start_time.elapsed();

        let reason = match flow {
            ControlFlow::Continue(()) => CompletionReason::Exhausted,
            ControlFlow::Break(()) => CompletionReason::Cancelled,
        };
        self.state = match reason {
            CompletionReason::Exhausted => SolverState::Exhausted,
            CompletionReason::Cancelled => SolverState::Cancelled,
        };
        reason
    }

    /// `Break` means a stop was observed and the caller must unwind.
    fn explore(&mut self, row: usize) -> ControlFlow<()> {
        let n = self.board.size();
        if row == n {
            self.record_solution();
            return ControlFlow::Continue(());
        }

        if self.token.is_cancelled() {
            return ControlFlow::Break(());
        }

        for col in 0..n {
            if self.token.is_cancelled() {
                return ControlFlow::Break(());
            }
            if !self.board.is_safe(row, col) {
                continue;
            }

            self.board.place(row, col);
            self.statistics.placements += 1;
            self.notify_step(Action::Place, row, col);
            self.pace()?;

            // Found solutions stay recorded; the board is left as is.
            self.explore(row + 1)?;

            self.board.remove(row, col);
            self.statistics.removals += 1;
            self.notify_step(Action::Remove, row, col);
            self.pace()?;
        }
        ControlFlow::Continue(())
    }

    fn record_solution(&mut self) {
        let solution = Solution::new(self.worker_id, self.board.snapshot());
        self.statistics.solutions_found += 1;
        tracing::trace!(
            worker_id = self.worker_id,
            columns = ?solution.columns(),
            "solution found"
        );

        if let Some(sink) = self.sink {
            sink.on_solution(solution.clone());
        }
        if self.config.keep_local_solutions {
            self.solutions.push(solution);
        }
    }

    fn notify_step(&self, action: Action, row: usize, col: usize) {
        if let Some(sink) = self.sink {
            sink.on_step(StepEvent {
                worker_id: self.worker_id,
                action,
                row,
                col,
                board: self.board.snapshot(),
            });
        }
    }

    /// Wait out the configured step delay, waking early on cancellation.
    /// `Break` once a stop has been requested, so a board completed after
    /// the stop is never recorded.
    fn pace(&self) -> ControlFlow<()> {
        if self.token.sleep(self.config.step_delay.get()) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Count every solution for an `n`×`n` board on the calling thread.
pub fn count_solutions(n: usize) -> u64 {
    let token = CancellationToken::new();
    let config = SearchConfig::new().with_local_solutions(false);
    let mut solver = Solver::new(Board::new(n), 0, config, &token);
    solver.search_from_row(0);
    solver.statistics().solutions_found
}

/// Known solution counts for n = 1..=14.
pub fn known_solution_count(n: usize) -> Option<u64> {
    const COUNTS: [u64; 14] = [
        1, 0, 0, 2, 10, 4, 40, 92, 352, 724, 2680, 14200, 73712, 365596,
    ];
    n.checked_sub(1).and_then(|i| COUNTS.get(i).copied())
}
