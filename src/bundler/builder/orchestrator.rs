//! Main packaging orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs the packaging
//! stages in their fixed order.

use super::{
    checksum::calculate_sha256,
    signing::sign_bundle,
    state::{BuildState, BundleReport},
    toolchain::resolve_toolchain,
    workspace::{clean_workspace, install_dependencies},
};
use crate::bundler::{
    Result, Settings,
    error::Context,
    platform::macos::{freeze::freeze_app, icon::prepare_icon, info_plist::patch_metadata},
    utils::{
        fs,
        process::{CommandRunner, SystemRunner},
    },
};
use path_absolutize::Absolutize;

/// Main packaging orchestrator.
///
/// Runs the pipeline strictly in order; a stage only runs if every earlier
/// stage returned `Ok`:
///
/// 1. Resolve toolchain (fatal)
/// 2. Install dependencies (fatal)
/// 3. Clean workspace
/// 4. Prepare icon (best-effort)
/// 5. Freeze with PyInstaller (fatal)
/// 6. Patch Info.plist (best-effort)
/// 7. Sign (best-effort)
/// 8. Report
///
/// Best-effort stages record a [`ToolOutcome`](super::ToolOutcome) in the
/// returned [`BuildState`] instead of failing.
///
/// # Examples
///
/// ```no_run
/// use citemigrate_packager::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> citemigrate_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new().project_dir(".").build()?;
/// let state = Bundler::new(settings).bundle().await?;
///
/// if let Some(report) = &state.report {
///     println!("Created: {} ({} bytes)", report.path.display(), report.size);
/// }
/// for warning in state.warnings() {
///     println!("warning: {warning}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R: CommandRunner = SystemRunner> {
    settings: Settings,
    runner: R,
}

impl Bundler<SystemRunner> {
    /// Creates a bundler that runs the real host tools.
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(settings, SystemRunner)
    }
}

impl<R: CommandRunner> Bundler<R> {
    /// Creates a bundler with a custom command runner.
    pub fn with_runner(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Executes the full pipeline.
    pub async fn bundle(&self) -> Result<BuildState> {
        let settings = &self.settings;
        let runner = &self.runner;
        log::info!(
            "Packaging {} from {}",
            settings.product_name(),
            settings.project_dir().display()
        );

        let state = BuildState::default();
        let state = resolve_toolchain(settings, runner, state).await?;
        let state = install_dependencies(settings, runner, state).await?;
        let state = clean_workspace(settings, state).await?;
        let state = prepare_icon(settings, runner, state).await?;
        let state = freeze_app(settings, runner, state).await?;
        let state = patch_metadata(settings, runner, state).await?;
        let state = sign_bundle(settings, runner, state).await?;
        report(settings, state).await
    }
}

/// Records the absolute path, size and checksum of the bundle.
pub async fn report(settings: &Settings, mut state: BuildState) -> Result<BuildState> {
    let bundle = state
        .bundle
        .clone()
        .context("report requested before the bundle was built")?;

    let path = bundle
        .absolutize()
        .with_context(|| format!("resolving {}", bundle.display()))?
        .into_owned();
    let size = fs::dir_size(&bundle)?;
    let checksum = calculate_sha256(&bundle).await?;

    log::info!("{} ready at {} ({} bytes)", settings.product_name(), path.display(), size);
    log::debug!("SHA256: {}", checksum);

    state.report = Some(BundleReport {
        path,
        size,
        checksum,
    });
    Ok(state)
}
