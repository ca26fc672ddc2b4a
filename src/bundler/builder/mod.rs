//! Pipeline orchestration and the stages that are not platform specific.
//!
//! This module provides the main [`Bundler`] orchestrator that sequences the
//! packaging stages and threads a [`BuildState`] through them.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the bundle tree
//! - [`orchestrator`] - Main [`Bundler`] struct and the report stage
//! - [`signing`] - Ad-hoc code signing of the bundle
//! - [`state`] - [`BuildState`] and [`ToolOutcome`]
//! - [`toolchain`] - Interpreter discovery and version gate
//! - [`tool_detection`] - External tool availability checking
//! - [`workspace`] - Dependency installation and cleanup

pub mod checksum;
pub mod orchestrator;
pub mod signing;
pub mod state;
pub mod tool_detection;
pub mod toolchain;
pub mod workspace;

#[cfg(test)]
pub(crate) mod testing;

pub use orchestrator::Bundler;
pub use state::{BuildState, BundleReport, IconFlags, ToolOutcome, Toolchain};
