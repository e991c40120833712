//! Progress events emitted by solvers and the sinks that receive them.

use crate::board::Board;
use crossbeam_channel::Sender;

/// Board mutation carried by a [`StepEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Place,
    Remove,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place => write!(f, "place"),
            Action::Remove => write!(f, "remove"),
        }
    }
}

/// The most recent mutation made by one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEvent {
    pub worker_id: usize,
    pub action: Action,
    pub row: usize,
    pub col: usize,
    /// Board state right after the mutation.
    pub board: Board,
}

/// One complete, valid placement of `n` queens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub worker_id: usize,
    pub board: Board,
}

impl Solution {
    pub fn new(worker_id: usize, board: Board) -> Self {
        Self { worker_id, board }
    }

    /// Queen column per row.
    pub fn columns(&self) -> Vec<usize> {
        self.board.columns().into_iter().flatten().collect()
    }
}

/// Receiver of solver progress.
///
/// Called from worker threads; implementations must tolerate concurrent
/// calls from different workers.
pub trait Sink: Send + Sync {
    /// A queen was placed or removed.
    fn on_step(&self, event: StepEvent);

    /// A complete solution was found.
    fn on_solution(&self, solution: Solution);
}

/// Event forwarded by [`ChannelSink`].
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Step(StepEvent),
    Solution(Solution),
}

/// Sink that forwards every event over a channel.
///
/// Sends never block on an unbounded channel. A disconnected receiver
/// silently drops events; the search itself keeps going.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<SearchEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<SearchEvent>) -> Self {
        Self { tx }
    }
}

impl Sink for ChannelSink {
    fn on_step(&self, event: StepEvent) {
        let _ = self.tx.send(SearchEvent::Step(event));
    }

    fn on_solution(&self, solution: Solution) {
        let _ = self.tx.send(SearchEvent::Solution(solution));
    }
}
