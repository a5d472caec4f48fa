use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between a failed run
/// and a rejected command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - report generated and presented
    Success = 0,
    /// Application error (not logged in, API error, network error, file I/O error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific error kinds for usage report generation.
///
/// The kinds are what callers match on; the messages here are the detailed
/// form shown in error chains. User-facing advisories for the common kinds
/// are chosen at the presentation boundary.
#[derive(Debug, Error)]
pub enum UsageReportError {
    #[error("Not logged in to a Cloud Foundry API\n\n💡 Hint: Run 'cf login' and try again")]
    NotAuthenticated,

    #[error("CF API returned no output: {url}")]
    EmptyUpstreamResponse { url: String },

    #[error("Malformed response for page {page}: {url}\nDetails: {details}")]
    MalformedPage {
        page: usize,
        url: String,
        details: String,
    },

    #[error("CF API request failed: {url}\nStatus: {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Timed out after {seconds}s while collecting service instances\n\n💡 Hint: Increase the deadline with --timeout")]
    Timeout { seconds: u64 },

    #[error("Failed to read CF CLI configuration: {path}\nDetails: {details}\n\n💡 Hint: Run 'cf login' to recreate it")]
    InvalidSession { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for configuration and request values
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl UsageReportError {
    /// Kinds that abort the whole invocation even when raised by a single
    /// secondary lookup.
    pub fn is_fatal_for_lookup(&self) -> bool {
        matches!(
            self,
            UsageReportError::NotAuthenticated | UsageReportError::Timeout { .. }
        )
    }
}
