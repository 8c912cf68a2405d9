use chrono::Utc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Holds the pipeline until an absolute Unix-millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedTrigger {
    target_ms: i64,
}

impl TimedTrigger {
    pub fn new(target_ms: i64) -> Self {
        Self { target_ms }
    }

    /// `None` once `now_ms` has reached the target.
    pub fn delay_from(&self, now_ms: i64) -> Option<Duration> {
        let delay = self.target_ms.saturating_sub(now_ms);
        (delay > 0).then(|| Duration::from_millis(delay as u64))
    }

    /// Waits against the wall clock. Returns how long it slept.
    pub async fn wait(&self) -> Duration {
        self.wait_from(Utc::now().timestamp_millis()).await
    }

    /// Single sleep for the remaining delay; no re-check afterwards.
    pub async fn wait_from(&self, now_ms: i64) -> Duration {
        match self.delay_from(now_ms) {
            Some(delay) => {
                info!(
                    "Function will run in {:.2} minutes.",
                    delay.as_millis() as f64 / 60_000.0
                );
                sleep(delay).await;
                info!("Running the function at the specified timestamp!");
                delay
            }
            None => {
                info!("The target timestamp is in the past. Running the function immediately.");
                Duration::ZERO
            }
        }
    }
}
