//! Parallel Dispatcher: traces all seeds for one integration direction
//! in parallel, with a controllable, process-wide worker count.
//!
//! The worker-pool size is the one piece of process-wide mutable state
//! the core carries (mirroring the teacher's own choice of `once_cell`
//! for a lazily-initialized singleton); the grid, seeds, and each
//! line's buffer are otherwise exclusively owned or read-only for the
//! duration of one dispatch phase.

use ndarray::Array2;
use once_cell::sync::Lazy;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::{Arc, Mutex};
use tracing::{info, info_span};

use crate::error::ValidationError;
use crate::grid::Grid;
use crate::tracer::{trace_line, Trajectory};

/// Seed counts at or above this trigger an `indicatif` progress bar for
/// the dispatch phase. Small traces (tests, demos) stay quiet.
const PROGRESS_BAR_THRESHOLD: usize = 10_000;

struct WorkerPoolState {
    count: usize,
    pool: Arc<ThreadPool>,
}

fn build_pool(count: usize) -> Arc<ThreadPool> {
    Arc::new(
        ThreadPoolBuilder::new()
            .num_threads(count)
            .build()
            .expect("failed to build rayon thread pool"),
    )
}

static WORKER_POOL: Lazy<Mutex<WorkerPoolState>> = Lazy::new(|| {
    let count = rayon::current_num_threads();
    Mutex::new(WorkerPoolState {
        count,
        pool: build_pool(count),
    })
});

/// Set the process-wide worker count used by every subsequent trace.
/// Rebuilds the underlying thread pool; a trace already in flight keeps
/// running on the pool it started with.
pub fn set_worker_count(n: usize) -> Result<(), ValidationError> {
    if n == 0 {
        return Err(ValidationError::InvalidWorkerCount { value: 0 });
    }
    let mut state = WORKER_POOL.lock().expect("worker pool mutex poisoned");
    state.count = n;
    state.pool = build_pool(n);
    Ok(())
}

/// The current process-wide worker count.
pub fn get_worker_count() -> usize {
    WORKER_POOL.lock().expect("worker pool mutex poisoned").count
}

/// Clone out the pool handle under a brief lock, read at the start of
/// each dispatch phase as the spec requires.
fn current_pool() -> Arc<ThreadPool> {
    WORKER_POOL
        .lock()
        .expect("worker pool mutex poisoned")
        .pool
        .clone()
}

/// Trace every seed in `seeds` for one direction (`sign` = `+1.0` or
/// `-1.0`), in parallel, preserving seed order in the returned `Vec`.
pub(crate) fn trace_all(
    grid: &Grid,
    seeds: &Array2<f64>,
    sign: f64,
    h: f64,
    max_steps: usize,
) -> Vec<Trajectory> {
    let n = seeds.nrows();
    let span = info_span!("dispatch", direction = if sign > 0.0 { "forward" } else { "backward" }, seeds = n);
    let _enter = span.enter();

    let pool = current_pool();

    let progress = if n >= PROGRESS_BAR_THRESHOLD {
        Some(indicatif::ProgressBar::new(n as u64))
    } else {
        None
    };

    info!(threads = pool.current_num_threads(), "starting dispatch phase");

    let results: Vec<Trajectory> = pool.install(|| {
        use rayon::prelude::*;
        (0..n)
            .into_par_iter()
            .map(|i| {
                let seed = [seeds[[i, 0]], seeds[[i, 1]], seeds[[i, 2]]];
                let trajectory = trace_line(grid, seed, sign, h, max_steps);
                if let Some(bar) = &progress {
                    bar.inc(1);
                }
                trajectory
            })
            .collect()
    });

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    results
}
