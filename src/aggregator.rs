//! Thread-safe collection point for worker progress and solutions.
//!
//! The latest [`StepEvent`] per worker is overwritten on every update, so
//! readers only ever see current state. Solutions are append-only per
//! worker and kept in discovery order.

use crate::search::sink::{Sink, Solution, StepEvent};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct AggregatorState {
    current: HashMap<usize, StepEvent>,
    solutions: HashMap<usize, Vec<Solution>>,
}

/// Shared sink queried by the host while a run is in progress.
///
/// One lock guards both maps. Every operation is infallible: a poisoned
/// lock is recovered since the maps never hold a half-written entry.
#[derive(Debug, Default)]
pub struct Aggregator {
    state: Mutex<AggregatorState>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AggregatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the latest step recorded for `worker_id`.
    pub fn update_state(&self, worker_id: usize, event: StepEvent) {
        self.lock().current.insert(worker_id, event);
    }

    /// Append a solution to `worker_id`'s list.
    pub fn add_solution(&self, worker_id: usize, solution: Solution) {
        self.lock()
            .solutions
            .entry(worker_id)
            .or_default()
            .push(solution);
    }

    pub fn current_state(&self, worker_id: usize) -> Option<StepEvent> {
        self.lock().current.get(&worker_id).cloned()
    }

    /// Solutions of one worker in discovery order.
    pub fn solutions(&self, worker_id: usize) -> Vec<Solution> {
        self.lock()
            .solutions
            .get(&worker_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Every stored solution, grouped by ascending worker id.
    pub fn all_solutions(&self) -> Vec<Solution> {
        let state = self.lock();
        let mut ids: Vec<_> = state.solutions.keys().copied().collect();
        ids.sort_unstable();
        ids.iter()
            .flat_map(|id| state.solutions[id].iter().cloned())
            .collect()
    }

    pub fn solution_count(&self, worker_id: usize) -> usize {
        self.lock().solutions.get(&worker_id).map_or(0, Vec::len)
    }

    pub fn total_solution_count(&self) -> usize {
        self.lock().solutions.values().map(Vec::len).sum()
    }

    /// Drop everything recorded so far.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.current.clear();
        state.solutions.clear();
    }
}

impl Sink for Aggregator {
    fn on_step(&self, event: StepEvent) {
        self.update_state(event.worker_id, event);
    }

    fn on_solution(&self, solution: Solution) {
        self.add_solution(solution.worker_id, solution);
    }
}
