//! Command line argument parsing and validation.
//!
//! Every flag has a default, so running the binary with no arguments
//! packages the application in the current directory.

use clap::Parser;
use std::path::PathBuf;

/// Packages CiteMigrate into a signed macOS application bundle
#[derive(Parser, Debug)]
#[command(
    name = "citemigrate_packager",
    version,
    about = "Packages CiteMigrate into a signed macOS application bundle",
    long_about = "Packages the CiteMigrate PyQt6 application into dist/CiteMigrate.app.

Steps: check the Python version, install requirements.txt and PyInstaller,
clean build/ and dist/, build icon.icns from icon.png, run PyInstaller,
patch Info.plist, ad-hoc sign, and report the bundle path and size.

Usage:
  citemigrate_packager
  PYTHON=/opt/homebrew/bin/python3.12 citemigrate_packager
  citemigrate_packager --project-dir ~/src/citemigrate --skip-install

Exit code 0 = bundle guaranteed to exist at dist/<name>.app."
)]
pub struct Args {
    /// Directory containing the entry point, requirements.txt and icon.png
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Python interpreter used for pip and PyInstaller
    #[arg(long, env = "PYTHON", value_name = "PATH", default_value = "python3")]
    pub python: PathBuf,

    /// Packaging manifest (default: <project-dir>/packaging.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip `pip install` (dependencies already present)
    #[arg(long)]
    pub skip_install: bool,

    /// Show debug output, including every external command
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.project_dir.is_dir() {
            return Err(format!(
                "Project directory not found: {}",
                self.project_dir.display()
            ));
        }

        if self.python.as_os_str().is_empty() {
            return Err("Python interpreter cannot be empty".to_string());
        }

        Ok(())
    }

    /// Default `env_logger` filter for the chosen verbosity; `RUST_LOG`
    /// still takes precedence.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "citemigrate_packager=debug"
        } else if self.quiet {
            "citemigrate_packager=warn"
        } else {
            "citemigrate_packager=info"
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}
