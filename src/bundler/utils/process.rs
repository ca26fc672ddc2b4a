//! External command execution.
//!
//! All packaging tools (interpreter, pip, PyInstaller, sips, iconutil,
//! PlistBuddy, codesign) are invoked through [`CommandRunner`], so the
//! pipeline can be driven by a fake runner in tests.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::bundler::error::{Error, Result};

/// A fully specified external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Program name or path.
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Working directory, if different from the current one.
    pub current_dir: Option<PathBuf>,
}

impl ToolCommand {
    /// Creates a command with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// File name of the program (`/usr/bin/sips` -> `sips`).
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` if terminated by a signal.
    pub code: Option<i32>,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// True if the process exited with status 0.
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Converts a non-zero exit into [`Error::CommandFailed`].
    pub fn into_result(self, command: &ToolCommand) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::CommandFailed {
                command: command.to_string(),
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

/// Executes external commands and locates tools on the host.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs the command to completion, capturing stdout and stderr.
    ///
    /// An `Err` means the process could not be spawned at all.
    async fn run(&self, command: &ToolCommand) -> std::io::Result<CommandOutput>;

    /// Resolves a tool by name (via `PATH`) or by absolute path.
    fn find_tool(&self, name: &str) -> Option<PathBuf>;
}

/// Runs commands on the host with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> std::io::Result<CommandOutput> {
        log::debug!("Running: {}", command);

        let mut process = tokio::process::Command::new(&command.program);
        process
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &command.current_dir {
            process.current_dir(dir);
        }

        let output = process.output().await?;
        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.stdout.trim().is_empty() {
            log::debug!("{} stdout:\n{}", command.program_name(), result.stdout.trim_end());
        }
        if !result.is_success() {
            log::debug!(
                "{} exited with {:?}: {}",
                command.program_name(),
                result.code,
                result.stderr.trim_end()
            );
        }

        Ok(result)
    }

    fn find_tool(&self, name: &str) -> Option<PathBuf> {
        match which::which(name) {
            Ok(path) => {
                log::debug!("Found {} at: {}", name, path.display());
                Some(path)
            }
            Err(e) => {
                log::debug!("{} not found: {}", name, e);
                None
            }
        }
    }
}

/// Converts a path into a command argument, rejecting non-UTF8 paths.
pub fn path_arg(path: &Path) -> Result<String> {
    path.to_str().map(str::to_owned).ok_or_else(|| {
        Error::GenericError(format!(
            "Path contains non-UTF8 characters: {}",
            path.display()
        ))
    })
}
