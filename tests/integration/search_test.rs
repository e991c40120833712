use nqueens::search::known_solution_count;
use nqueens::search::parallel::partition_columns;
use nqueens::search::{ChannelSink, SearchEvent};
use nqueens::{Aggregator, ConfigurationError, ParallelConfig, start, start_with_sink};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn solve_count(n: usize, workers: usize) -> usize {
    let mut handle = start(n, workers).expect("valid configuration");
    handle.wait_for_completion();
    handle.total_solutions()
}

#[test]
fn test_known_counts_single_worker() {
    for (n, expected) in [(4, 2), (5, 10), (6, 4), (8, 92)] {
        assert_eq!(solve_count(n, 1), expected, "wrong count for n={}", n);
    }
}

#[test]
fn test_count_independent_of_worker_count() {
    for n in [6, 7, 8] {
        let expected = known_solution_count(n).unwrap() as usize;
        for workers in 1..=n {
            assert_eq!(
                solve_count(n, workers),
                expected,
                "n={} workers={}",
                n,
                workers
            );
        }
    }
}

#[test]
fn test_solutions_valid_and_distinct() {
    let aggregator = Arc::new(Aggregator::new());
    let config = ParallelConfig::new(8).with_workers(4);
    let mut handle = start_with_sink(&config, Arc::clone(&aggregator)).unwrap();
    handle.wait_for_completion();

    let solutions = aggregator.all_solutions();
    assert_eq!(solutions.len(), 92);

    let mut seen = HashSet::new();
    for solution in &solutions {
        assert!(solution.board.is_valid_solution(), "{}", solution.board);
        assert!(seen.insert(solution.columns()), "duplicate solution");
    }
}

#[test]
fn test_per_worker_solutions_in_discovery_order() {
    let mut handle = start(8, 3).unwrap();
    handle.wait_for_completion();
    for worker_id in 0..3 {
        let columns: Vec<_> = handle
            .poll_solutions(worker_id)
            .iter()
            .map(|s| s.columns())
            .collect();
        let mut sorted = columns.clone();
        sorted.sort();
        assert_eq!(columns, sorted, "worker {} out of order", worker_id);
    }
}

#[test]
fn test_partition_covers_all_columns() {
    for n in 4..=16 {
        for workers in 1..=n {
            let ranges = partition_columns(n, workers);
            let covered: Vec<_> = ranges.iter().flat_map(|r| r.clone()).collect();
            assert_eq!(covered, (0..n).collect::<Vec<_>>());

            let sizes: Vec<_> = ranges.iter().map(|r| r.len()).collect();
            let max = *sizes.iter().max().unwrap();
            let min = *sizes.iter().min().unwrap();
            assert!(max - min <= 1);
        }
    }
}

#[test]
fn test_configuration_errors() {
    assert_eq!(
        start(3, 2).err(),
        Some(ConfigurationError::InvalidBoardSize {
            size: 3,
            minimum: 4
        })
    );
    assert_eq!(
        start(8, 0).err(),
        Some(ConfigurationError::InvalidWorkerCount(0))
    );
}

#[test]
fn test_cancellation_freezes_solution_count() {
    let aggregator = Arc::new(Aggregator::new());
    let config = ParallelConfig::new(12)
        .with_workers(4)
        .with_step_delay(Duration::from_millis(1));
    let mut handle = start_with_sink(&config, Arc::clone(&aggregator)).unwrap();

    std::thread::sleep(Duration::from_millis(100));
    handle.request_stop();

    let stopped_at = Instant::now();
    while handle.is_running() {
        assert!(
            stopped_at.elapsed() < Duration::from_secs(2),
            "workers did not stop"
        );
        std::thread::sleep(Duration::from_millis(1));
    }
    let report = handle.wait_for_completion();
    assert!(report.was_cancelled());

    let count = aggregator.total_solution_count();
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(aggregator.total_solution_count(), count);
    assert!((count as u64) < known_solution_count(12).unwrap());
}

#[test]
fn test_rerun_after_reset() {
    let aggregator = Arc::new(Aggregator::new());
    let config = ParallelConfig::new(6).with_workers(3);

    let mut first = start_with_sink(&config, Arc::clone(&aggregator)).unwrap();
    first.wait_for_completion();
    assert_eq!(aggregator.total_solution_count(), 4);

    aggregator.reset();
    let mut second = start_with_sink(&config, Arc::clone(&aggregator)).unwrap();
    let report = second.wait_for_completion();
    assert_eq!(report.total_solutions(), 4);
    assert_eq!(aggregator.total_solution_count(), 4);
}

#[test]
fn test_rerun_after_cancel_and_reset() {
    let aggregator = Arc::new(Aggregator::new());
    let slow = ParallelConfig::new(8)
        .with_workers(2)
        .with_step_delay(Duration::from_millis(5));
    let mut first = start_with_sink(&slow, Arc::clone(&aggregator)).unwrap();
    std::thread::sleep(Duration::from_millis(30));
    first.request_stop();
    first.wait_for_completion();

    aggregator.reset();
    let fast = ParallelConfig::new(8).with_workers(2);
    let mut second = start_with_sink(&fast, Arc::clone(&aggregator)).unwrap();
    second.wait_for_completion();
    assert_eq!(aggregator.total_solution_count(), 92);
}

#[test]
fn test_channel_sink_receives_every_solution() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let config = ParallelConfig::new(6).with_workers(2);
    let mut handle = start_with_sink(&config, Arc::new(ChannelSink::new(tx))).unwrap();
    let report = handle.wait_for_completion();
    drop(handle);

    let mut steps = 0;
    let mut solutions = 0;
    for event in rx.try_iter() {
        match event {
            SearchEvent::Step(_) => steps += 1,
            SearchEvent::Solution(solution) => {
                assert!(solution.board.is_valid_solution());
                solutions += 1;
            }
        }
    }
    assert_eq!(solutions, 4);
    let stats = report.total_statistics();
    assert_eq!(steps as u64, stats.placements + stats.removals);
}
