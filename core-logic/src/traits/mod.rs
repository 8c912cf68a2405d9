use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IterationStats {
    pub success: u64,
    pub failed: u64,
}

impl IterationStats {
    pub fn total(&self) -> u64 {
        self.success + self.failed
    }
}

/// One pass of a repeated job driven by [`crate::Supervisor`].
#[async_trait]
pub trait Iteration: Send + Sync {
    /// Runs the job once. `iteration` is the zero-based loop counter.
    async fn run_once(&self, iteration: u64) -> Result<IterationStats>;
}
