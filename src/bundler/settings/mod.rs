//! Configuration structures for packaging operations.
//!
//! This module provides the configuration types for the packaging pipeline:
//! application metadata, interpreter options, icon and macOS settings, and a
//! builder that validates them into a [`Settings`].

mod builder;
mod core;
mod macos;
mod package;
mod python;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use macos::{IconSettings, MacOsSettings};
pub use package::PackageSettings;
pub use python::PythonSettings;
