//! Packaging library for the CiteMigrate desktop application
//!
//! This library drives the tools that turn the PyQt6 app into a macOS
//! `.app` bundle:
//! - Python / pip for dependencies
//! - PyInstaller for freezing
//! - sips + iconutil for the icon
//! - PlistBuddy for Info.plist
//! - codesign for the ad-hoc signature
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
