//! Rate Limiter Config

use clap::{ArgAction, Args};

use crate::limiter::LimiterSettings;

/// Per-client token bucket settings.
#[derive(Debug, Args)]
pub struct LimiterConfig {
    /// Sustained requests per second allowed per client IP
    #[arg(long, env = "LIMITER_RPS", default_value_t = 2.0)]
    pub limiter_rps: f64,

    /// Requests a client may make in a single burst
    #[arg(long, env = "LIMITER_BURST", default_value_t = 4)]
    pub limiter_burst: u32,

    /// Enable the rate limiter
    #[arg(
        long,
        env = "LIMITER_ENABLED",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub limiter_enabled: bool,
}

impl LimiterConfig {
    pub(crate) fn settings(&self) -> LimiterSettings {
        LimiterSettings {
            rps: self.limiter_rps,
            burst: self.limiter_burst,
            enabled: self.limiter_enabled,
        }
    }
}
