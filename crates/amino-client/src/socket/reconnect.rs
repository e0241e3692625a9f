//! Reconnect policies
//!
//! After a connection ends without a deliberate `close()`, the socket handler
//! asks its policy how long to wait before the next attempt. `attempt` counts
//! consecutive failed attempts since the last successful open, starting at 0.

use std::fmt;
use std::time::Duration;

/// Decides whether and when to reconnect
pub trait ReconnectPolicy: Send + Sync + fmt::Debug {
    /// Delay before reconnect attempt `attempt`, or `None` to give up
    fn next_delay(&self, attempt: u32) -> Option<Duration>;
}

/// Reconnect right away, forever
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl ReconnectPolicy for Immediate {
    fn next_delay(&self, _attempt: u32) -> Option<Duration> {
        Some(Duration::ZERO)
    }
}

/// Never reconnect
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReconnect;

impl ReconnectPolicy for NoReconnect {
    fn next_delay(&self, _attempt: u32) -> Option<Duration> {
        None
    }
}

/// Exponential backoff between attempts
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// Delay before the first reconnect
    pub initial_delay: Duration,
    /// Upper bound for any delay
    pub max_delay: Duration,
    /// Growth factor per failed attempt
    pub multiplier: f64,
    /// Give up after this many consecutive failures (`None` = never)
    pub max_attempts: Option<u32>,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
            max_attempts: None,
        }
    }
}

impl ExponentialBackoff {
    /// Set the initial delay
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Limit the number of consecutive attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    fn calculate_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let delay_ms = self.initial_delay.as_millis() as f64 * self.multiplier.powi(exponent);

        if !delay_ms.is_finite() || delay_ms >= self.max_delay.as_millis() as f64 {
            self.max_delay
        } else {
            Duration::from_millis(delay_ms as u64)
        }
    }
}

impl ReconnectPolicy for ExponentialBackoff {
    fn next_delay(&self, attempt: u32) -> Option<Duration> {
        match self.max_attempts {
            Some(max) if attempt >= max => None,
            _ => Some(self.calculate_delay(attempt)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate() {
        assert_eq!(Immediate.next_delay(0), Some(Duration::ZERO));
        assert_eq!(Immediate.next_delay(1000), Some(Duration::ZERO));
    }

    #[test]
    fn test_no_reconnect() {
        assert_eq!(NoReconnect.next_delay(0), None);
    }

    #[test]
    fn test_backoff_defaults() {
        let policy = ExponentialBackoff::default();
        assert_eq!(policy.next_delay(0), Some(Duration::from_secs(1)));
        assert_eq!(policy.next_delay(1), Some(Duration::from_secs(2)));
        assert_eq!(policy.next_delay(2), Some(Duration::from_secs(4)));
        assert_eq!(policy.next_delay(10), Some(Duration::from_secs(60)));
        assert_eq!(policy.next_delay(u32::MAX), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_backoff_max_attempts() {
        let policy = ExponentialBackoff::default()
            .with_initial_delay(Duration::from_millis(100))
            .with_multiplier(3.0)
            .with_max_attempts(2);

        assert_eq!(policy.next_delay(0), Some(Duration::from_millis(100)));
        assert_eq!(policy.next_delay(1), Some(Duration::from_millis(300)));
        assert_eq!(policy.next_delay(2), None);
    }
}
