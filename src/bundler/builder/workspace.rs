//! Dependency installation and workspace cleanup.

use super::state::{BuildState, ToolOutcome};
use crate::bundler::{
    Settings,
    error::{Context, Error, Result},
    utils::{
        fs,
        process::{CommandRunner, ToolCommand, path_arg},
    },
};

/// Installs the dependency manifest plus the bundler itself with pip.
///
/// A non-zero pip exit aborts the pipeline with pip's exit code.
pub async fn install_dependencies<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    mut state: BuildState,
) -> Result<BuildState> {
    if settings.skip_install() {
        log::info!("Skipping dependency installation (--skip-install)");
        state.dependencies = ToolOutcome::Skipped("--skip-install".into());
        return Ok(state);
    }

    let requirements = settings.requirements_path();
    if !requirements.is_file() {
        return Err(Error::MissingManifest(requirements));
    }

    log::info!("Installing dependencies from {}...", requirements.display());
    let command = ToolCommand::new(state.interpreter(settings.interpreter()))
        .args(["-m", "pip", "install", "-r"])
        .arg(path_arg(&requirements)?)
        .args(settings.python().extra_packages.iter().cloned());

    runner
        .run(&command)
        .await
        .with_context(|| format!("Failed to execute {}", command.program.display()))?
        .into_result(&command)?;

    log::info!("✓ Dependencies installed");
    state.dependencies = ToolOutcome::Succeeded;
    Ok(state)
}

/// Removes PyInstaller's work and output directories and stale `.spec` files.
///
/// Absent targets are not an error, so this always succeeds on a clean tree.
pub async fn clean_workspace(settings: &Settings, state: BuildState) -> Result<BuildState> {
    log::info!("Cleaning previous build output...");

    for dir in [settings.build_dir(), settings.dist_dir()] {
        log::debug!("Removing {}", dir.display());
        fs::remove_dir_all(&dir).await?;
    }

    for spec in fs::glob_in(settings.project_dir(), "*.spec")? {
        log::debug!("Removing {}", spec.display());
        fs::remove_file(&spec).await?;
    }

    Ok(state)
}
