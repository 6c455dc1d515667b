//! Argument scanning errors.
//!
//! Every failure carries the offending option name. Callers that need to
//! branch on the failure mode can match on the variant directly or use
//! [`ArgumentError::kind`].

use thiserror::Error;

/// Errors raised while scanning arguments against an option table.
///
/// # Examples
///
/// ```
/// use cliargs_core::{parse_args, ArgumentError, ArgumentErrorKind};
///
/// let err = parse_args("a:", None, &["node", "app.js", "-a"]).unwrap_err();
/// assert_eq!(err, ArgumentError::MissingArgument("a".into()));
/// assert_eq!(err.kind(), ArgumentErrorKind::MissingArgument);
/// assert_eq!(err.to_string(), "option needs an argument -- a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// `--name` or a clustered `-x` that the table does not declare.
    #[error("unrecognized option -- {0}")]
    UnrecognizedOption(String),
    /// A value-needing option with no attached or following value.
    #[error("option needs an argument -- {0}")]
    MissingArgument(String),
    /// A required option that never appeared.
    #[error("required option missing -- {0}")]
    RequiredOptionMissing(String),
}

/// Fieldless discriminant of [`ArgumentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentErrorKind {
    UnrecognizedOption,
    MissingArgument,
    RequiredOptionMissing,
}

impl ArgumentError {
    pub fn kind(&self) -> ArgumentErrorKind {
        match self {
            Self::UnrecognizedOption(_) => ArgumentErrorKind::UnrecognizedOption,
            Self::MissingArgument(_) => ArgumentErrorKind::MissingArgument,
            Self::RequiredOptionMissing(_) => ArgumentErrorKind::RequiredOptionMissing,
        }
    }

    /// Returns the option name the error is about (without dashes).
    pub fn option(&self) -> &str {
        match self {
            Self::UnrecognizedOption(name)
            | Self::MissingArgument(name)
            | Self::RequiredOptionMissing(name) => name,
        }
    }
}

/// Convenience alias for results with [`ArgumentError`].
pub type Result<T> = std::result::Result<T, ArgumentError>;
