use starfall_core::error::ConfigError;

/// Errors surfaced to whoever drives the host.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotStarted,

    #[error("game loop channel closed")]
    ChannelClosed,

    #[error("shared state lock poisoned")]
    LockPoisoned,

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
