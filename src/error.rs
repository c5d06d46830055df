use thiserror::Error;

/// The host could not arm a timer on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("no browser window available for timers")]
    NoWindow,
    #[error("failed to schedule {kind} timer: {reason}")]
    Schedule { kind: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("countdown must be at least one second")]
    ZeroCountdown,
    #[error("tick interval must be non-zero")]
    ZeroTick,
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("circle radius must be positive, got {0}")]
    BadRadius(f64),
}
