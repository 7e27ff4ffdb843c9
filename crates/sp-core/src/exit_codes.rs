//! Exit codes for the spamplan CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-9: Operational outcomes (parse outcome from code, not output)
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use crate::config::ConfigError;
use crate::dist::ProbError;

/// Exit codes for spamplan operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success: a category was chosen or the command completed.
    Clean = 0,

    /// The evidence left no valid mass; no category can be chosen.
    Undecided = 3,

    /// Invalid arguments
    ArgsError = 10,

    /// Knowledge or classifier configuration rejected
    ConfigError = 11,

    /// Config schema version mismatch
    VersionError = 13,

    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Stable name for JSON output.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::Undecided => "OK_UNDECIDED",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::VersionError => "ERR_VERSION",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(error: &ConfigError) -> Self {
        match error {
            ConfigError::NotFound { .. } => ExitCode::ArgsError,
            ConfigError::JsonError { .. }
            | ConfigError::TomlError { .. }
            | ConfigError::ValidationError(_) => ExitCode::ConfigError,
            ConfigError::IoError { .. } => ExitCode::IoError,
            ConfigError::VersionMismatch { .. } => ExitCode::VersionError,
        }
    }
}

impl From<&ProbError> for ExitCode {
    fn from(error: &ProbError) -> Self {
        match error {
            ProbError::ZeroMass => ExitCode::Undecided,
            ProbError::EmptyDomain
            | ProbError::DegenerateDistribution
            | ProbError::InvalidProbability { .. } => ExitCode::InternalError,
        }
    }
}
