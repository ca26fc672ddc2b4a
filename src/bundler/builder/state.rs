//! Pipeline state threaded through every stage.
//!
//! Each stage takes a [`BuildState`] by value and returns the updated state,
//! so everything a later stage depends on is visible in one struct.

use semver::Version;
use std::fmt;
use std::path::{Path, PathBuf};

/// Result of a best-effort stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToolOutcome {
    /// Stage has not run yet.
    #[default]
    Pending,
    /// Nothing to do (e.g. no icon source, metadata document absent).
    Skipped(String),
    /// Required host tool is not available.
    Unavailable(String),
    /// Tool ran and succeeded.
    Succeeded,
    /// Tool ran and failed; the pipeline continues in degraded form.
    Failed(String),
}

impl ToolOutcome {
    /// True for outcomes that should be surfaced as warnings.
    pub fn is_warning(&self) -> bool {
        matches!(self, ToolOutcome::Unavailable(_) | ToolOutcome::Failed(_))
    }
}

impl fmt::Display for ToolOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutcome::Pending => write!(f, "not run"),
            ToolOutcome::Skipped(reason) => write!(f, "skipped ({reason})"),
            ToolOutcome::Unavailable(reason) => write!(f, "unavailable ({reason})"),
            ToolOutcome::Succeeded => write!(f, "ok"),
            ToolOutcome::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// Interpreter that passed the version gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Binary to invoke: a bare name looked up on `PATH`, or an absolute path.
    pub interpreter: PathBuf,
    /// Reported version.
    pub version: Version,
}

/// Icon-related PyInstaller flags, decided by file existence after the
/// icon stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconFlags {
    /// `--icon <container>` when the compiled container exists.
    pub icon: Option<String>,
    /// `--add-data <source>:.` when the source image exists.
    pub add_data: Option<String>,
}

impl IconFlags {
    /// Flags as PyInstaller arguments.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(icon) = &self.icon {
            args.push("--icon".to_string());
            args.push(icon.clone());
        }
        if let Some(data) = &self.add_data {
            args.push("--add-data".to_string());
            args.push(format!("{data}:."));
        }
        args
    }
}

/// Final summary of the produced bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReport {
    /// Absolute bundle path.
    pub path: PathBuf,
    /// Total size of all files in bytes.
    pub size: u64,
    /// SHA-256 of the bundle tree.
    pub checksum: String,
}

/// Everything the pipeline has learned so far.
#[derive(Debug, Clone, Default)]
pub struct BuildState {
    /// Set by the toolchain stage.
    pub toolchain: Option<Toolchain>,
    /// Dependency installation.
    pub dependencies: ToolOutcome,
    /// Icon set generation.
    pub icon: ToolOutcome,
    /// Flags derived from the icon stage.
    pub icon_flags: IconFlags,
    /// Set by the freeze stage once the bundle is verified to exist.
    pub bundle: Option<PathBuf>,
    /// Info.plist patching.
    pub metadata: ToolOutcome,
    /// Code signing.
    pub signature: ToolOutcome,
    /// Set by the report stage.
    pub report: Option<BundleReport>,
}

impl BuildState {
    /// Interpreter resolved by the toolchain stage, or `fallback` before it ran.
    pub fn interpreter<'a>(&'a self, fallback: &'a Path) -> &'a Path {
        self.toolchain
            .as_ref()
            .map_or(fallback, |toolchain| toolchain.interpreter.as_path())
    }

    /// Human-readable warnings for every degraded stage.
    pub fn warnings(&self) -> Vec<String> {
        [
            ("dependencies", &self.dependencies),
            ("icon", &self.icon),
            ("metadata", &self.metadata),
            ("signature", &self.signature),
        ]
        .into_iter()
        .filter(|(_, outcome)| outcome.is_warning())
        .map(|(stage, outcome)| format!("{stage}: {outcome}"))
        .collect()
    }
}
