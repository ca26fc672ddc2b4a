//! Packaging pipeline for turning a PyQt6 application into a macOS `.app`.
//!
//! The pipeline drives external tools (Python, pip, PyInstaller, sips,
//! iconutil, PlistBuddy, codesign) through the [`CommandRunner`] seam and
//! records the result of every best-effort stage in a [`BuildState`].
//!
//! ```no_run
//! use citemigrate_packager::bundler::{Bundler, SettingsBuilder};
//!
//! # async fn example() -> citemigrate_packager::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .project_dir(".")
//!     .interpreter("python3")
//!     .build()?;
//!
//! let state = Bundler::new(settings).bundle().await?;
//! println!("{:?}", state.report);
//! # Ok(())
//! # }
//! ```

pub mod builder;
mod error;
pub mod platform;
mod settings;
pub mod utils;

// Public re-exports
pub use builder::{BuildState, Bundler, BundleReport, IconFlags, ToolOutcome, Toolchain};
pub use error::{Context, Error, ErrorExt, Result};
pub use settings::{
    IconSettings, MacOsSettings, PackageSettings, PythonSettings, Settings, SettingsBuilder,
};
pub use utils::process::{CommandOutput, CommandRunner, SystemRunner, ToolCommand};
