//! Fixed-delay request pacing.
//!
//! Every request waits the full delay first, including the very first one.

use std::time::Duration;

/// Sleeps a fixed interval before each request.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    /// Create a pacer with the given pause.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Configured pause.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the pause.
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::trace!(delay = ?self.delay, "Pausing before request");
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_full_delay() {
        let pacer = Pacer::new(Duration::from_secs(10));
        let start = tokio::time::Instant::now();
        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_returns_immediately() {
        let pacer = Pacer::new(Duration::ZERO);
        let start = tokio::time::Instant::now();
        pacer.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
