use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, or usage was printed
/// - `Error` (2): Command failed (unknown module, missing base catalog, write error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully.
    Success,
    /// Command failed; the error has been printed.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
