use crate::configuration::SendingSettings;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// How long to wait between consecutive sends. The policy is chosen once
/// at the start of a run and never re-evaluated per recipient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PacingPolicy {
    /// "Chill mode": a uniformly random delay in [2000ms, 3000ms).
    Chill,
    /// One second divided by the configured rate. An unset or
    /// non-positive rate means no delay at all.
    RateLimited { per_second: Option<f64> },
}

impl PacingPolicy {
    pub fn select(chill_mode: bool, rate_per_second: Option<f64>) -> PacingPolicy {
        if chill_mode {
            PacingPolicy::Chill
        } else {
            PacingPolicy::RateLimited {
                per_second: rate_per_second,
            }
        }
    }

    pub fn from_settings(settings: &SendingSettings) -> PacingPolicy {
        Self::select(settings.chill_mode, settings.rate_per_second)
    }

    pub fn next_delay(&self) -> Duration {
        match self {
            PacingPolicy::Chill => {
                Duration::from_millis(rand::thread_rng().gen_range(2000..3000))
            }
            PacingPolicy::RateLimited {
                per_second: Some(rate),
            } if *rate > 0.0 => Duration::from_secs_f64(1.0 / rate),
            PacingPolicy::RateLimited { .. } => Duration::ZERO,
        }
    }

    /// True when every delay this policy produces is zero, i.e. sends go
    /// out back to back.
    pub fn is_unthrottled(&self) -> bool {
        match self {
            PacingPolicy::Chill => false,
            PacingPolicy::RateLimited { per_second } => {
                !matches!(per_second, Some(rate) if *rate > 0.0)
            }
        }
    }
}

/// The suspension point between sends, injectable so tests can observe
/// pacing without sleeping.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
