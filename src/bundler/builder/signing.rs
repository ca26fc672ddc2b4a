//! Code signing of the finished bundle.
//!
//! The bundle gets a forced, deep signature with the configured identity,
//! "-" (ad-hoc) by default. Ad-hoc signatures let the app launch locally on
//! Apple Silicon but do not satisfy Gatekeeper for distribution.

use super::{
    state::{BuildState, ToolOutcome},
    tool_detection::{self, CODESIGN},
};
use crate::bundler::{
    Settings,
    error::Result,
    utils::process::{CommandRunner, ToolCommand, path_arg},
};

/// Signs the bundle recorded in `state`. Never fatal.
pub async fn sign_bundle<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    mut state: BuildState,
) -> Result<BuildState> {
    let bundle = state
        .bundle
        .clone()
        .unwrap_or_else(|| settings.bundle_path());

    let Some(codesign) = tool_detection::probe(runner, CODESIGN, "Code signing") else {
        log::warn!("codesign not available; {} is unsigned", bundle.display());
        state.signature = ToolOutcome::Unavailable("codesign not found".into());
        return Ok(state);
    };

    let identity = &settings.macos().signing_identity;
    let command = ToolCommand::new(codesign)
        .args(["--force", "--deep", "--sign", identity.as_str()])
        .arg(path_arg(&bundle)?);

    log::info!("Signing {} (identity: {})...", bundle.display(), identity);
    state.signature = match runner.run(&command).await {
        Ok(output) if output.is_success() => {
            log::info!("✓ Signed {}", bundle.display());
            ToolOutcome::Succeeded
        }
        Ok(output) => {
            let hint = remediation(&bundle);
            log::warn!("codesign failed: {}\n{}", output.stderr.trim(), hint);
            ToolOutcome::Failed(format!("{}. {}", output.stderr.trim(), hint))
        }
        Err(e) => {
            log::warn!("codesign could not be run: {}", e);
            ToolOutcome::Failed(format!("codesign could not be run: {e}"))
        }
    };

    Ok(state)
}

fn remediation(bundle: &std::path::Path) -> String {
    format!(
        "Clear extended attributes with `xattr -cr \"{}\"` and re-run, \
         or open the app once via right-click > Open",
        bundle.display()
    )
}
