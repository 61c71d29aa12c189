use std::fmt::{Display, Formatter};

use thiserror::Error;
use time::Date;

/// Failure category for source construction and refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    InvalidConfiguration,
    Unavailable,
    Parse,
    Internal,
}

/// Structured source error.
///
/// Returned when a source is constructed or refreshed on demand. Failures
/// of background refreshes are logged and the previous state is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidConfiguration,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Parse,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidConfiguration => "source.invalid_configuration",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Parse => "source.parse",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Day-walk failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CalendarError {
    #[error("stepping from {date} leaves the supported calendar range")]
    OutOfRange { date: Date },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_kind() {
        assert_eq!(
            SourceError::invalid_configuration("x").code(),
            "source.invalid_configuration"
        );
        assert_eq!(SourceError::unavailable("x").code(), "source.unavailable");
        assert_eq!(SourceError::parse("x").code(), "source.parse");
        assert_eq!(SourceError::internal("x").code(), "source.internal");
    }

    #[test]
    fn display_includes_message_and_code() {
        let error = SourceError::parse("bad date 'x'");
        assert_eq!(error.to_string(), "bad date 'x' (source.parse)");
    }
}
