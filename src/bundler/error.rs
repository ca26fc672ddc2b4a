//! Error types for packaging operations.
//!
//! Every fatal pipeline condition has its own variant so the binary can map
//! it to the right exit code. Recoverable conditions never reach this type;
//! they are recorded as [`ToolOutcome`](crate::bundler::ToolOutcome) values.

use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the packaging pipeline.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Interpreter missing, unparseable or too old.
    #[error("{reason}\n\n{remediation}")]
    Toolchain {
        /// What went wrong
        reason: String,
        /// How to fix it
        remediation: String,
    },

    /// Dependency manifest not found.
    #[error("dependency manifest not found: {0}")]
    MissingManifest(PathBuf),

    /// External command exited unsuccessfully.
    #[error("{}", describe_failure(.command, .code, .stderr))]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Captured stderr, verbatim
        stderr: String,
    },

    /// The bundler ran but the expected .app was not produced.
    #[error("expected bundle not found: {}\n{listing}", .expected.display())]
    MissingBundle {
        /// Path the bundle should exist at
        expected: PathBuf,
        /// Listing of the output directory (or a note that it is absent)
        listing: String,
    },

    /// Invalid packaging configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem error with context.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: std::io::Error,
    },

    /// Directory traversal error.
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Glob pattern error.
    #[error("{0}")]
    Glob(#[from] glob::PatternError),

    /// Catch-all.
    #[error("{0}")]
    GenericError(String),
}

fn describe_failure(command: &str, code: &Option<i32>, stderr: &str) -> String {
    let mut message = format!("`{command}` failed");
    if let Some(code) = code {
        message.push_str(&format!(" with exit code {code}"));
    }
    let stderr = stderr.trim_end();
    if !stderr.is_empty() {
        message.push_str(":\n");
        message.push_str(stderr);
    }
    message
}

impl Error {
    /// Process exit code for this error.
    ///
    /// A failed external tool propagates its own code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::CommandFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Attaches a message to an error or a missing value.
pub trait Context<T> {
    /// Wraps the error with a static message.
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T>;

    /// Wraps the error with a lazily built message.
    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Attaches filesystem context (operation + path) to IO errors.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
