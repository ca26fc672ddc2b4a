//! PyInstaller invocation and bundle verification.

use crate::bundler::{
    Settings,
    builder::BuildState,
    error::{Context, Error, Result},
    utils::{
        fs,
        process::{CommandRunner, ToolCommand},
    },
};

/// Assembles the PyInstaller command line.
///
/// Runs from the project directory so the icon, data and entry point
/// arguments stay relative, matching what PyInstaller records in the
/// generated `.spec`.
pub fn pyinstaller_command(settings: &Settings, state: &BuildState) -> ToolCommand {
    let package = settings.package();
    let python = settings.python();

    let mut command = ToolCommand::new(state.interpreter(settings.interpreter()))
        .args(["-m", "PyInstaller", "--noconfirm", "--onedir", "--windowed"])
        .arg("--name")
        .arg(package.product_name.as_str())
        .arg("--osx-bundle-identifier")
        .arg(settings.identifier())
        .args(state.icon_flags.to_args());

    for module in &python.hidden_imports {
        command = command.arg("--hidden-import").arg(module.as_str());
    }
    for name in &python.collect_all {
        command = command.arg("--collect-all").arg(name.as_str());
    }

    command
        .arg(package.entry_point.as_str())
        .current_dir(settings.project_dir())
}

/// Runs PyInstaller and verifies the `.app` it should have produced.
///
/// # Errors
///
/// - [`Error::CommandFailed`] if PyInstaller exits non-zero
/// - [`Error::MissingBundle`] if `dist/<ProductName>.app` is not a directory
///   afterwards; the error carries a listing of `dist/`
pub async fn freeze_app<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    mut state: BuildState,
) -> Result<BuildState> {
    let command = pyinstaller_command(settings, &state);

    log::info!("Building {}.app with PyInstaller...", settings.product_name());
    runner
        .run(&command)
        .await
        .with_context(|| format!("Failed to execute {}", command.program.display()))?
        .into_result(&command)?;

    let expected = settings.bundle_path();
    if !expected.is_dir() {
        let listing = describe_dist(settings).await?;
        log::error!("Build failed: {} not found", expected.display());
        return Err(Error::MissingBundle { expected, listing });
    }

    log::info!("✓ Built {}", expected.display());
    state.bundle = Some(expected);
    Ok(state)
}

async fn describe_dist(settings: &Settings) -> Result<String> {
    let dist = settings.dist_dir();
    if !dist.is_dir() {
        return Ok(format!("{} does not exist", dist.display()));
    }

    let entries = fs::list_dir(&dist).await?;
    if entries.is_empty() {
        return Ok(format!("{} is empty", dist.display()));
    }

    let mut listing = format!("Contents of {}:", dist.display());
    for entry in entries {
        listing.push_str("\n  ");
        listing.push_str(&entry);
    }
    Ok(listing)
}
