//! Rate-limit pacing between processed issues

use relsync_core::PacingConfig;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep a fixed duration after every issue
    Fixed(Duration),
    Disabled,
}

impl Pacing {
    pub fn from_config(config: &PacingConfig) -> Self {
        match config.issue_delay() {
            delay if delay.is_zero() => Pacing::Disabled,
            delay => Pacing::Fixed(delay),
        }
    }

    pub async fn wait(&self) {
        if let Pacing::Fixed(delay) = self {
            tokio::time::sleep(*delay).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Fixed(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        assert_eq!(
            Pacing::from_config(&PacingConfig::default()),
            Pacing::Fixed(Duration::from_secs(1))
        );
        assert_eq!(
            Pacing::from_config(&PacingConfig { issue_delay_ms: 0 }),
            Pacing::Disabled
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_wait_sleeps() {
        let start = tokio::time::Instant::now();
        Pacing::Fixed(Duration::from_millis(1500)).wait().await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
