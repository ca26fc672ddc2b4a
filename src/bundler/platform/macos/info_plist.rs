//! Info.plist patching.
//!
//! PyInstaller writes its own `Info.plist` with placeholder version fields.
//! The three user-visible string keys are overwritten with PlistBuddy: `Set`
//! first, `Add ... string` when the key does not exist yet.

use crate::bundler::{
    Settings,
    builder::{BuildState, ToolOutcome, tool_detection},
    error::Result,
    utils::process::{CommandRunner, ToolCommand, path_arg},
};
use std::path::Path;

/// `CFBundleShortVersionString`: marketing version.
pub const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";

/// `CFBundleVersion`: build number.
pub const BUILD_VERSION_KEY: &str = "CFBundleVersion";

/// `CFBundleDisplayName`: name shown by Finder and the Dock.
pub const DISPLAY_NAME_KEY: &str = "CFBundleDisplayName";

/// Keys and values written into the bundle's Info.plist.
pub fn metadata_entries(settings: &Settings) -> [(&'static str, String); 3] {
    let package = settings.package();
    [
        (SHORT_VERSION_KEY, package.version.clone()),
        (BUILD_VERSION_KEY, package.build.clone()),
        (DISPLAY_NAME_KEY, package.product_name.clone()),
    ]
}

/// Sets or inserts the version and display-name keys.
///
/// Never fatal. A missing Info.plist is skipped: PyInstaller always writes
/// one for `--windowed` builds, so its absence is logged for investigation
/// but not treated as a build failure.
pub async fn patch_metadata<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    mut state: BuildState,
) -> Result<BuildState> {
    let plist_path = settings.info_plist_path();

    state.metadata = if !plist_path.is_file() {
        log::warn!("{} not found; version fields not patched", plist_path.display());
        ToolOutcome::Skipped("Info.plist not found".into())
    } else {
        match tool_detection::probe(runner, &settings.macos().plist_buddy, "Info.plist patching") {
            None => {
                log::warn!(
                    "{} not available; version fields not patched",
                    settings.macos().plist_buddy
                );
                ToolOutcome::Unavailable(format!("{} not found", settings.macos().plist_buddy))
            }
            Some(plist_buddy) => {
                let plist_arg = path_arg(&plist_path)?;
                let mut failed = Vec::new();
                for (key, value) in metadata_entries(settings) {
                    if !set_or_add(runner, &plist_buddy, &plist_arg, key, &value).await {
                        failed.push(key);
                    }
                }

                if failed.is_empty() {
                    log::info!("✓ Patched {}", plist_path.display());
                    log_patched_values(&plist_path);
                    ToolOutcome::Succeeded
                } else {
                    log::warn!("Could not set {} in Info.plist", failed.join(", "));
                    ToolOutcome::Failed(format!("could not set {}", failed.join(", ")))
                }
            }
        }
    };

    Ok(state)
}

/// Returns true when either `Set` or the `Add` fallback succeeded.
async fn set_or_add<R: CommandRunner>(
    runner: &R,
    plist_buddy: &Path,
    plist: &str,
    key: &str,
    value: &str,
) -> bool {
    let value = quote(value);
    let set = ToolCommand::new(plist_buddy)
        .arg("-c")
        .arg(format!("Set :{key} {value}"))
        .arg(plist);

    if matches!(runner.run(&set).await, Ok(output) if output.is_success()) {
        return true;
    }

    log::debug!("{} not present, adding it", key);
    let add = ToolCommand::new(plist_buddy)
        .arg("-c")
        .arg(format!("Add :{key} string {value}"))
        .arg(plist);

    match runner.run(&add).await {
        Ok(output) if output.is_success() => true,
        Ok(output) => {
            log::warn!("`{}` failed: {}", add, output.stderr.trim());
            false
        }
        Err(e) => {
            log::warn!("`{}` could not be run: {}", add, e);
            false
        }
    }
}

/// PlistBuddy splits its command on whitespace unless the value is quoted.
fn quote(value: &str) -> String {
    if value.contains(char::is_whitespace) || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

fn log_patched_values(plist_path: &Path) {
    let value = match plist::Value::from_file(plist_path) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Could not read back {}: {}", plist_path.display(), e);
            return;
        }
    };
    if let Some(dict) = value.as_dictionary() {
        for key in [SHORT_VERSION_KEY, BUILD_VERSION_KEY, DISPLAY_NAME_KEY] {
            log::debug!(
                "  {} = {}",
                key,
                dict.get(key).and_then(|v| v.as_string()).unwrap_or("<missing>")
            );
        }
    }
}
