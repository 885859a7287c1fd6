//! Structured fork-join over a fixed set of tasks.
//!
//! [`fork_join`] starts one worker per task, blocks until every worker has
//! finished, then folds the outcomes into a single result. Panics are caught
//! per worker and reported like errors, so a failing worker never leaves the
//! caller with a partially filled output.

use std::any::Any;

use tracing::{trace, warn};

use crate::{Executor, OpsError, OpsResult, WorkerFault};

/// What one worker produced: its own result, or a panic / spawn message.
type Outcome = Result<OpsResult<()>, String>;

/// Runs `work(worker_index, task)` for every task in parallel and joins.
///
/// # Errors
///
/// - [`OpsError::WorkerFailure`] listing every worker that returned an
///   error (other than cancellation), panicked or could not be started
/// - [`OpsError::Cancelled`] if workers stopped on the cancellation flag and
///   none failed otherwise
/// - [`OpsError::ThreadPool`] if the rayon pool could not be built
///
/// ```rust
/// use downsizer_ops::{fork_join, Executor, OpsError};
///
/// let result = fork_join(Executor::Threads, vec![1, 2, 3], |_, n| {
///     if n == 2 { Err(OpsError::InvalidPartition("bad".into())) } else { Ok(()) }
/// });
/// let err = result.unwrap_err();
/// assert_eq!(err.faults().len(), 1);
/// assert_eq!(err.faults()[0].worker, 1);
/// ```
pub fn fork_join<T, F>(executor: Executor, tasks: Vec<T>, work: F) -> OpsResult<()>
where
    T: Send,
    F: Fn(usize, T) -> OpsResult<()> + Sync,
{
    if tasks.is_empty() {
        return Ok(());
    }
    trace!(workers = tasks.len(), %executor, "fork");
    let outcomes = match executor {
        Executor::Threads => run_scoped(tasks, &work),
        #[cfg(feature = "rayon")]
        Executor::Rayon => run_rayon(tasks, &work)?,
    };
    trace!("join");
    collect(outcomes)
}

fn run_scoped<T, F>(tasks: Vec<T>, work: &F) -> Vec<Outcome>
where
    T: Send,
    F: Fn(usize, T) -> OpsResult<()> + Sync,
{
    std::thread::scope(|scope| {
        let handles: Vec<_> = tasks
            .into_iter()
            .enumerate()
            .map(|(worker, task)| {
                std::thread::Builder::new()
                    .name(format!("downsizer-worker-{worker}"))
                    .spawn_scoped(scope, move || work(worker, task))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle {
                Ok(handle) => handle.join().map_err(|payload| panic_message(&*payload)),
                Err(err) => Err(format!("failed to spawn worker thread: {err}")),
            })
            .collect()
    })
}

#[cfg(feature = "rayon")]
fn run_rayon<T, F>(tasks: Vec<T>, work: &F) -> OpsResult<Vec<Outcome>>
where
    T: Send,
    F: Fn(usize, T) -> OpsResult<()> + Sync,
{
    use rayon::prelude::*;
    use std::panic::{self, AssertUnwindSafe};

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(tasks.len())
        .thread_name(|i| format!("downsizer-worker-{i}"))
        .build()
        .map_err(|err| OpsError::ThreadPool(err.to_string()))?;

    Ok(pool.install(|| {
        tasks
            .into_par_iter()
            .enumerate()
            .map(|(worker, task)| {
                panic::catch_unwind(AssertUnwindSafe(|| work(worker, task)))
                    .map_err(|payload| panic_message(&*payload))
            })
            .collect()
    }))
}

fn collect(outcomes: Vec<Outcome>) -> OpsResult<()> {
    let mut faults = Vec::new();
    let mut cancelled = false;
    for (worker, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(OpsError::Cancelled)) => cancelled = true,
            Ok(Err(err)) => faults.push(WorkerFault::new(worker, err.to_string())),
            Err(message) => faults.push(WorkerFault::new(worker, message)),
        }
    }
    if !faults.is_empty() {
        for fault in &faults {
            warn!(worker = fault.worker, reason = %fault.reason, "worker failed");
        }
        return Err(OpsError::WorkerFailure { failures: faults });
    }
    if cancelled {
        return Err(OpsError::Cancelled);
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload");
    format!("panicked: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn executors() -> Vec<Executor> {
        vec![
            Executor::Threads,
            #[cfg(feature = "rayon")]
            Executor::Rayon,
        ]
    }

    #[test]
    fn test_runs_every_task_once() {
        for executor in executors() {
            let sum = AtomicUsize::new(0);
            fork_join(executor, (1..=10).collect(), |_, n: usize| {
                sum.fetch_add(n, Ordering::Relaxed);
                Ok(())
            })
            .unwrap();
            assert_eq!(sum.into_inner(), 55);
        }
    }

    #[test]
    fn test_worker_index_matches_task_order() {
        for executor in executors() {
            fork_join(executor, vec![0usize, 1, 2, 3], |worker, task| {
                assert_eq!(worker, task);
                Ok(())
            })
            .unwrap();
        }
    }

    #[test]
    fn test_all_faults_collected() {
        for executor in executors() {
            let err = fork_join(executor, vec![0, 1, 2, 3], |worker, _| match worker {
                1 => Err(OpsError::InvalidPartition("row 7".into())),
                3 => panic!("worker exploded"),
                _ => Ok(()),
            })
            .unwrap_err();
            let faults = err.faults();
            assert_eq!(faults.len(), 2);
            assert_eq!(faults[0].worker, 1);
            assert!(faults[0].reason.contains("row 7"));
            assert_eq!(faults[1].worker, 3);
            assert!(faults[1].reason.contains("worker exploded"));
        }
    }

    #[test]
    fn test_failure_wins_over_cancel() {
        let err = fork_join(Executor::Threads, vec![0, 1], |worker, _| match worker {
            0 => Err(OpsError::Cancelled),
            _ => Err(OpsError::ThreadPool("x".into())),
        })
        .unwrap_err();
        assert!(matches!(err, OpsError::WorkerFailure { .. }));
    }

    #[test]
    fn test_cancel_reported_once() {
        let err = fork_join(Executor::Threads, vec![0, 1, 2], |_, _| Err(OpsError::Cancelled))
            .unwrap_err();
        assert!(matches!(err, OpsError::Cancelled));
    }

    #[test]
    fn test_no_tasks() {
        fork_join(Executor::Threads, Vec::<()>::new(), |_, _| unreachable!()).unwrap();
    }
}
