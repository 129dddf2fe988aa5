//! CLI-specific error types and exit code mapping

use pomgate_core::error::{PomgateError, ScanError};
use pomgate_maven_scanner::MavenScannerError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The scan pipeline failed (discovery, network, remote service, response).
    #[error("scan error: {0}")]
    Scan(String),

    /// The scan found reportable vulnerabilities and fail-on-discovery is on.
    #[error("build failed: {0}")]
    VulnerabilitiesFound(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                  |
    /// |------|------------------------------------------|
    /// | 0    | Success                                  |
    /// | 1    | General / command / scan pipeline error  |
    /// | 2    | Configuration error                      |
    /// | 4    | Vulnerabilities found (build gate)       |
    /// | 10   | IO error                                 |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::VulnerabilitiesFound(_) => 4,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Scan(_) => 1,
        }
    }
}

impl From<PomgateError> for CliError {
    fn from(e: PomgateError) -> Self {
        match e {
            PomgateError::Config(e) => Self::Config(e.to_string()),
            PomgateError::Scan(e @ ScanError::VulnerabilitiesFound { .. }) => {
                Self::VulnerabilitiesFound(e.to_string())
            }
            PomgateError::Scan(e) => Self::Scan(e.to_string()),
            PomgateError::Io(e) => Self::Io(e),
        }
    }
}

impl From<MavenScannerError> for CliError {
    fn from(e: MavenScannerError) -> Self {
        PomgateError::from(e).into()
    }
}
