//! External tool detection and availability checking.
//!
//! Host tools for the best-effort stages are probed here. A missing tool is
//! never an error: callers turn `None` into
//! [`ToolOutcome::Unavailable`](super::ToolOutcome::Unavailable).

use crate::bundler::utils::process::CommandRunner;
use std::path::PathBuf;

/// Image resizer (macOS).
pub const SIPS: &str = "sips";

/// Icon set compiler (macOS).
pub const ICONUTIL: &str = "iconutil";

/// Code signing utility (macOS).
pub const CODESIGN: &str = "codesign";

/// Tools needed to build an `.icns` from a PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTools {
    /// Resolved `sips`.
    pub sips: PathBuf,
    /// Resolved `iconutil`.
    pub iconutil: PathBuf,
}

/// Looks up a single tool, logging what was found.
pub fn probe<R: CommandRunner>(runner: &R, name: &str, purpose: &str) -> Option<PathBuf> {
    match runner.find_tool(name) {
        Some(path) => {
            log::debug!("✓ {} available at {}", name, path.display());
            Some(path)
        }
        None => {
            log::debug!("{} not found. {} will be skipped.", name, purpose);
            None
        }
    }
}

/// Looks up `sips` and `iconutil`.
///
/// Returns the names of the missing tools when either is absent.
pub fn probe_icon_tools<R: CommandRunner>(runner: &R) -> Result<IconTools, String> {
    let sips = probe(runner, SIPS, "Icon generation");
    let iconutil = probe(runner, ICONUTIL, "Icon generation");

    match (sips, iconutil) {
        (Some(sips), Some(iconutil)) => Ok(IconTools { sips, iconutil }),
        (sips, iconutil) => {
            let missing: Vec<&str> = [(SIPS, sips.is_none()), (ICONUTIL, iconutil.is_none())]
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| name)
                .collect();
            Err(format!("{} not found (macOS only)", missing.join(" and ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::builder::testing::FakeRunner;

    #[test]
    fn icon_tools_require_both_binaries() {
        let runner = FakeRunner::new().with_tools(&[SIPS, ICONUTIL]);
        let tools = probe_icon_tools(&runner).unwrap();
        assert!(tools.sips.ends_with("sips"));
        assert!(tools.iconutil.ends_with("iconutil"));
    }

    #[test]
    fn missing_icon_tools_are_named() {
        let runner = FakeRunner::new().with_tools(&[SIPS]);
        assert_eq!(
            probe_icon_tools(&runner).unwrap_err(),
            "iconutil not found (macOS only)"
        );

        let runner = FakeRunner::new();
        assert_eq!(
            probe_icon_tools(&runner).unwrap_err(),
            "sips and iconutil not found (macOS only)"
        );
    }
}
