use anyhow::Result;
use async_trait::async_trait;
use core_logic::{Iteration, IterationStats, StopPolicy, Supervisor};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Fails every odd iteration, otherwise reports 2 successes and 1 failure.
#[derive(Default)]
struct FlakyJob {
    calls: AtomicU64,
    seen: std::sync::Mutex<Vec<u64>>,
}

#[async_trait]
impl Iteration for FlakyJob {
    async fn run_once(&self, iteration: u64) -> Result<IterationStats> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(iteration);
        if iteration % 2 == 1 {
            anyhow::bail!("rpc unreachable");
        }
        Ok(IterationStats {
            success: 2,
            failed: 1,
        })
    }
}

#[tokio::test]
async fn test_stops_after_limit_and_survives_errors() {
    let job = FlakyJob::default();
    let supervisor = Supervisor::new(StopPolicy::After(4));

    let report = supervisor.run(&job).await;

    assert_eq!(job.calls.load(Ordering::SeqCst), 4);
    assert_eq!(*job.seen.lock().unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(report.iterations, 4);
    assert_eq!(report.failed_iterations, 2);
    assert_eq!(report.success, 4);
    assert_eq!(report.failed, 2);
}

#[tokio::test]
async fn test_zero_limit_runs_nothing() {
    let job = FlakyJob::default();

    let report = Supervisor::new(StopPolicy::After(0)).run(&job).await;

    assert_eq!(job.calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.iterations, 0);
}

#[tokio::test]
async fn test_cancelled_token_stops_before_first_iteration() {
    let job = FlakyJob::default();
    let token = CancellationToken::new();
    token.cancel();

    let report = Supervisor::new(StopPolicy::Forever)
        .with_token(token)
        .run(&job)
        .await;

    assert_eq!(report.iterations, 0);
}

/// Cancels its own supervisor on the third pass.
struct SelfCancellingJob {
    token: CancellationToken,
    calls: Arc<AtomicU64>,
}

#[async_trait]
impl Iteration for SelfCancellingJob {
    async fn run_once(&self, _iteration: u64) -> Result<IterationStats> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n == 3 {
            self.token.cancel();
        }
        Ok(IterationStats::default())
    }
}

#[tokio::test]
async fn test_forever_runs_until_cancelled_and_finishes_current_iteration() {
    let supervisor = Supervisor::new(StopPolicy::Forever);
    let calls = Arc::new(AtomicU64::new(0));
    let job = SelfCancellingJob {
        token: supervisor.token(),
        calls: calls.clone(),
    };

    let report = supervisor.run(&job).await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.iterations, 3);
    assert_eq!(report.failed_iterations, 0);
}
