use crate::traits::{Iteration, IterationStats};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Instrument};

/// When the supervisor stops starting new iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPolicy {
    /// Keep going until cancelled or the process dies.
    Forever,
    /// Stop after this many iterations, successful or not.
    After(u64),
}

impl StopPolicy {
    fn allows(&self, completed: u64) -> bool {
        match self {
            StopPolicy::Forever => true,
            StopPolicy::After(limit) => completed < *limit,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorReport {
    pub iterations: u64,
    pub failed_iterations: u64,
    pub success: u64,
    pub failed: u64,
}

/// Re-runs an [`Iteration`] back to back.
///
/// An iteration that returns `Err` is logged and the next one starts
/// immediately; there is no backoff. Cancellation is only observed between
/// iterations, so work already in flight always runs to completion.
pub struct Supervisor {
    policy: StopPolicy,
    token: CancellationToken,
}

impl Supervisor {
    pub fn new(policy: StopPolicy) -> Self {
        Self {
            policy,
            token: CancellationToken::new(),
        }
    }

    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// First Ctrl+C stops the loop after the current iteration; a second one
    /// exits the process.
    pub fn with_ctrl_c(self) -> Self {
        let token = self.token.clone();
        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("🛑 Received Ctrl+C. Finishing current iteration (press again to abort)...");
                    token.cancel();
                }
                Err(err) => {
                    error!("Unable to listen for shutdown signal: {}", err);
                    return;
                }
            }
            if signal::ctrl_c().await.is_ok() {
                warn!("🛑 Second Ctrl+C received. Aborting.");
                std::process::exit(130);
            }
        });
        self
    }

    pub async fn run<I: Iteration + ?Sized>(&self, job: &I) -> SupervisorReport {
        let start_time = std::time::Instant::now();
        let mut report = SupervisorReport::default();
        let mut count: u64 = 0;

        loop {
            if self.token.is_cancelled() {
                info!("Supervisor stopping (cancelled).");
                break;
            }
            if !self.policy.allows(count) {
                break;
            }

            let span = tracing::info_span!("iteration", n = count);
            match job.run_once(count).instrument(span).await {
                Ok(stats) => {
                    report.success += stats.success;
                    report.failed += stats.failed;
                    log_iteration(count, &stats);
                }
                Err(e) => {
                    report.failed_iterations += 1;
                    error!("Iteration {} failed: {:#}", count, e);
                }
            }

            count += 1;
            report.iterations = count;
        }

        let total = report.success + report.failed;
        let rate = if total > 0 {
            (report.success as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        info!("🛑 Shutdown Complete.");
        info!(
            "Total Time: {:.1}s | Iterations: {} ({} failed) | Success: {} | Fail: {} | Success Rate: {:.2}%",
            start_time.elapsed().as_secs_f64(),
            report.iterations,
            report.failed_iterations,
            report.success,
            report.failed,
            rate
        );

        report
    }
}

fn log_iteration(count: u64, stats: &IterationStats) {
    info!(
        "Iteration {} finished: {} attempts | Success: {} | Failed: {}",
        count,
        stats.total(),
        stats.success,
        stats.failed
    );
}
