//! Colored terminal output for the packager CLI.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes user-facing status lines, honouring verbose and quiet modes.
///
/// Progress goes to stdout; warnings and errors go to stderr and are shown
/// even in quiet mode.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let color = if std::io::IsTerminal::is_terminal(&io::stdout()) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            verbose,
            quiet,
            color,
        }
    }

    /// Prints only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose {
            self.line(false, None, "", message)?;
        }
        Ok(())
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(false, Some(Color::Green), "✓", message)
    }

    /// Prints a warning line to stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.line(true, Some(Color::Yellow), "⚠", message)
    }

    /// Prints an error line to stderr.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.line(true, Some(Color::Red), "✗", message)
    }

    /// Prints a bold section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = StandardStream::stdout(self.color);
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "{title}")?;
        out.reset()
    }

    /// Prints an indented line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = StandardStream::stdout(self.color);
        writeln!(out, "  {message}")
    }

    fn line(&self, stderr: bool, color: Option<Color>, symbol: &str, message: &str) -> io::Result<()> {
        let mut out = if stderr {
            StandardStream::stderr(self.color)
        } else {
            StandardStream::stdout(self.color)
        };
        if !symbol.is_empty() {
            out.set_color(ColorSpec::new().set_fg(color).set_bold(true))?;
            write!(out, "{symbol} ")?;
            out.reset()?;
        }
        writeln!(out, "{message}")
    }
}

/// Formats a byte count the way `du -h` does.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
