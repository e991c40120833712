//! Search result types and statistics

use std::ops::Range;
use std::time::Duration;

/// Why a solver or worker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionReason {
    /// Every branch was explored.
    Exhausted,
    /// A stop request was observed before the search space was exhausted.
    Cancelled,
}

impl CompletionReason {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CompletionReason::Cancelled)
    }

    /// Combine the reasons of two consecutive searches.
    pub fn merge(self, other: CompletionReason) -> CompletionReason {
        if self.is_cancelled() || other.is_cancelled() {
            CompletionReason::Cancelled
        } else {
            CompletionReason::Exhausted
        }
    }
}

impl std::fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionReason::Exhausted => write!(f, "exhausted"),
            CompletionReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Counters collected while searching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Total time spent searching
    pub elapsed_time: Duration,
    /// Number of queens placed
    pub placements: u64,
    /// Number of queens removed while backtracking
    pub removals: u64,
    /// Number of complete solutions found
    pub solutions_found: u64,
}

impl SearchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another run's counters to this one. Elapsed times are summed.
    pub fn absorb(&mut self, other: &SearchStatistics) {
        self.elapsed_time += other.elapsed_time;
        self.placements += other.placements;
        self.removals += other.removals;
        self.solutions_found += other.solutions_found;
    }

    /// Get placements per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.placements as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Placements: {}\n", self.placements));
        s.push_str(&format!("Removals: {}\n", self.removals));
        s.push_str(&format!(
            "Throughput: {:.0} placements/sec\n",
            self.throughput()
        ));
        s.push_str(&format!("Solutions found: {}\n", self.solutions_found));
        s
    }
}

/// Outcome of one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker_id: usize,
    /// First-row columns assigned to this worker.
    pub columns: Range<usize>,
    pub reason: CompletionReason,
    pub statistics: SearchStatistics,
}

/// Outcome of a whole run, one report per worker in worker order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub workers: Vec<WorkerReport>,
    /// Wall-clock time from start until the last worker was joined
    pub elapsed_time: Duration,
}

impl SearchReport {
    pub fn total_solutions(&self) -> u64 {
        self.workers
            .iter()
            .map(|w| w.statistics.solutions_found)
            .sum()
    }

    pub fn was_cancelled(&self) -> bool {
        self.workers.iter().any(|w| w.reason.is_cancelled())
    }

    /// Counters summed over every worker.
    pub fn total_statistics(&self) -> SearchStatistics {
        let mut total = SearchStatistics::new();
        for worker in &self.workers {
            total.absorb(&worker.statistics);
        }
        total.elapsed_time = self.elapsed_time;
        total
    }
}

impl std::fmt::Display for SearchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for worker in &self.workers {
            writeln!(
                f,
                "Worker {} (columns {}..{}): {} solutions, {}",
                worker.worker_id,
                worker.columns.start,
                worker.columns.end,
                worker.statistics.solutions_found,
                worker.reason
            )?;
        }
        write!(f, "Total solutions: {}", self.total_solutions())?;
        if self.was_cancelled() {
            write!(f, " (search cancelled)")?;
        }
        writeln!(f)
    }
}
