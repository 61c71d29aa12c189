use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Config(#[from] workday_core::ConfigError),

    #[error(transparent)]
    Source(#[from] workday_core::SourceError),

    #[error(transparent)]
    Calendar(#[from] workday_core::CalendarError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::Config(workday_core::ConfigError::Source(_)) => 3,
            Self::Config(_) => 2,
            Self::Source(_) => 3,
            Self::Calendar(_) => 4,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
