//! Platform-specific packaging stages.

pub mod macos;
