//! Top-level error types for the packager binary.
//!
//! This module defines the CLI-facing error types with actionable messages
//! and recovery suggestions. Pipeline failures are wrapped from
//! [`crate::bundler::Error`].

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all packager operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Packaging pipeline errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BundlerError::Bundler(e) => e.exit_code(),
            _ => 1,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error;

        match self {
            BundlerError::Bundler(Error::MissingManifest(path)) => vec![format!(
                "Create {} listing the application's dependencies (PyQt6, lxml, pyzotero)",
                path.display()
            )],
            BundlerError::Bundler(Error::CommandFailed { command, .. })
                if command.contains(" pip ") =>
            {
                vec![
                    "Check network access to PyPI".to_string(),
                    "Re-run with --skip-install if dependencies are already installed".to_string(),
                ]
            }
            BundlerError::Bundler(Error::CommandFailed { command, .. })
                if command.contains("PyInstaller") =>
            {
                vec!["Re-run with --verbose to see PyInstaller's full output".to_string()]
            }
            BundlerError::Bundler(Error::MissingBundle { .. }) => vec![
                "Check that PyInstaller supports --windowed builds on this platform".to_string(),
                "Inspect build/ for PyInstaller's warn-*.txt report".to_string(),
            ],
            BundlerError::Bundler(Error::Config(_)) | BundlerError::Toml(_) => {
                vec!["Check packaging.toml against the documented keys".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
