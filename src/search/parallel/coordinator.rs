//! Parallel search coordinator that manages worker threads.

use crate::aggregator::Aggregator;
use crate::error::ConfigurationError;
use crate::search::cancel::CancellationToken;
use crate::search::config::{SearchConfig, StepDelay, duration_millis};
use crate::search::parallel::config::ParallelConfig;
use crate::search::parallel::partition::partition_columns;
use crate::search::parallel::worker::{WorkerState, WorkerStatus, run_tracked_worker};
use crate::search::result::{CompletionReason, SearchReport, SearchStatistics, WorkerReport};
use crate::search::sink::{Sink, Solution, StepEvent};
use std::ops::Range;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Poll interval used while waiting for a deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Start an `n`×`n` search on `num_workers` threads reporting into a fresh
/// [`Aggregator`].
pub fn start(n: usize, num_workers: usize) -> Result<SearchHandle, ConfigurationError> {
    let config = ParallelConfig::new(n).with_workers(num_workers);
    start_with_sink(&config, Arc::new(Aggregator::new()))
}

/// Start a search described by `config`, reporting into `sink`.
///
/// The config is validated before any thread is spawned. Reusing an
/// [`Aggregator`] across runs requires calling [`Aggregator::reset`] first.
pub fn start_with_sink<S>(
    config: &ParallelConfig,
    sink: Arc<S>,
) -> Result<SearchHandle<S>, ConfigurationError>
where
    S: Sink + 'static,
{
    let num_workers = config.validate()?;
    let n = config.board_size;
    let columns = partition_columns(n, num_workers);

    let token = Arc::new(CancellationToken::new());
    let step_delay = StepDelay::new(config.step_delay);
    let search_config = SearchConfig::new()
        .with_shared_step_delay(step_delay.clone())
        .with_local_solutions(false);

    tracing::info!(
        board_size = n,
        requested_workers = config.num_workers,
        num_workers,
        step_delay_ms = duration_millis(config.step_delay),
        "starting search"
    );

    let statuses: Vec<_> = (0..num_workers)
        .map(|_| Arc::new(WorkerStatus::default()))
        .collect();

    let handles = columns
        .iter()
        .cloned()
        .enumerate()
        .map(|(worker_id, range)| {
            let sink = Arc::clone(&sink);
            let token = Arc::clone(&token);
            let status = Arc::clone(&statuses[worker_id]);
            let search_config = search_config.clone();

            tracing::debug!(worker_id, columns = ?range, "spawning worker");
            std::thread::spawn(move || {
                let sink: &dyn Sink = sink.as_ref();
                run_tracked_worker(
                    worker_id,
                    n,
                    range,
                    Some(sink),
                    &token,
                    &search_config,
                    &status,
                )
            })
        })
        .collect();

    Ok(SearchHandle {
        board_size: n,
        sink,
        token,
        step_delay,
        timeout: config.timeout,
        columns,
        statuses,
        handles,
        reports: Vec::new(),
        start_time: Instant::now(),
    })
}

/// Control and query surface of one running search.
///
/// Dropping the handle stops the workers and joins them.
pub struct SearchHandle<S: Sink + 'static = Aggregator> {
    board_size: usize,
    sink: Arc<S>,
    token: Arc<CancellationToken>,
    step_delay: StepDelay,
    timeout: Option<Duration>,
    columns: Vec<Range<usize>>,
    statuses: Vec<Arc<WorkerStatus>>,
    handles: Vec<JoinHandle<WorkerReport>>,
    reports: Vec<WorkerReport>,
    start_time: Instant,
}

impl<S: Sink + 'static> SearchHandle<S> {
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Number of workers actually spawned (after clamping).
    pub fn worker_count(&self) -> usize {
        self.columns.len()
    }

    /// First-row column range of each worker, indexed by worker id.
    pub fn column_ranges(&self) -> &[Range<usize>] {
        &self.columns
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    pub fn worker_state(&self, worker_id: usize) -> Option<WorkerState> {
        self.statuses.get(worker_id).map(|s| s.get())
    }

    /// Ask every worker to stop. Idempotent.
    pub fn request_stop(&self) {
        if !self.token.is_cancelled() {
            tracing::info!(board_size = self.board_size, "stop requested");
        }
        self.token.cancel();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True while at least one worker has not reached a terminal state.
    pub fn is_running(&self) -> bool {
        self.statuses.iter().any(|s| !s.get().is_terminal())
    }

    /// Change the pacing delay of this run's workers. Takes effect at their
    /// next board mutation.
    pub fn set_step_delay(&self, delay: Duration) {
        tracing::debug!(delay_ms = duration_millis(delay), "step delay changed");
        self.step_delay.set(delay);
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay.get()
    }

    /// Block until every worker has finished or observed a stop.
    ///
    /// Safe to call repeatedly; later calls return the same report.
    pub fn wait_for_completion(&mut self) -> SearchReport {
        for (worker_id, handle) in self.handles.drain(..).enumerate() {
            let report = match handle.join() {
                Ok(report) => report,
                Err(_) => {
                    tracing::error!(worker_id, "worker thread panicked");
                    self.statuses[worker_id].set(WorkerState::Cancelled);
                    WorkerReport {
                        worker_id,
                        columns: self.columns[worker_id].clone(),
                        reason: CompletionReason::Cancelled,
                        statistics: SearchStatistics::new(),
                    }
                }
            };
            self.reports.push(report);
        }

        let report = SearchReport {
            workers: self.reports.clone(),
            elapsed_time: self.start_time.elapsed(),
        };
        tracing::info!(
            board_size = self.board_size,
            solutions = report.total_solutions(),
            cancelled = report.was_cancelled(),
            elapsed = ?report.elapsed_time,
            "search finished"
        );
        report
    }

    /// Wait at most `timeout`, then request a stop and join the workers.
    pub fn wait_with_timeout(&mut self, timeout: Duration) -> SearchReport {
        let deadline = Instant::now() + timeout;
        while self.is_running() {
            let now = Instant::now();
            if now >= deadline {
                tracing::info!(?timeout, "search timed out");
                self.request_stop();
                break;
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
        self.wait_for_completion()
    }

    /// Wait using the timeout from the config, if any.
    pub fn wait(&mut self) -> SearchReport {
        match self.timeout {
            Some(timeout) => self.wait_with_timeout(timeout),
            None => self.wait_for_completion(),
        }
    }
}

impl SearchHandle<Aggregator> {
    /// Latest step of `worker_id`, if it has made one.
    pub fn poll_state(&self, worker_id: usize) -> Option<StepEvent> {
        self.sink.current_state(worker_id)
    }

    /// Solutions of `worker_id` so far, in discovery order.
    pub fn poll_solutions(&self, worker_id: usize) -> Vec<Solution> {
        self.sink.solutions(worker_id)
    }

    pub fn total_solutions(&self) -> usize {
        self.sink.total_solution_count()
    }
}

impl<S: Sink + 'static> Drop for SearchHandle<S> {
    fn drop(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        self.token.cancel();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}
