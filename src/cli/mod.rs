//! Command line interface for the packager.
//!
//! Parses arguments, loads `packaging.toml`, runs the [`Bundler`] and
//! renders the outcome.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::{OutputManager, format_bytes};

use crate::bundler::{BuildState, Bundler, ToolOutcome};
use crate::error::{BundlerError, CliError, Result};
use crate::metadata;

/// Main CLI entry point. Returns the process exit code.
pub async fn run(args: Args) -> Result<i32> {
    let config = RuntimeConfig::from(&args);
    let output = config.output();

    args.validate()
        .map_err(|reason| BundlerError::Cli(CliError::InvalidArguments { reason }))?;

    let settings = metadata::load_manifest(&args.project_dir, args.config.as_deref())?
        .into_builder()
        .project_dir(&args.project_dir)
        .interpreter(&args.python)
        .skip_install(args.skip_install)
        .build()?;

    output.section(&format!("Packaging {}", settings.product_name()))?;

    match Bundler::new(settings).bundle().await {
        Ok(state) => {
            print_summary(output, &state)?;
            Ok(0)
        }
        Err(e) => {
            let e = BundlerError::from(e);
            output.error(&e.to_string())?;
            for suggestion in e.recovery_suggestions() {
                output.indent(&suggestion)?;
            }
            Ok(e.exit_code())
        }
    }
}

fn print_summary(output: &OutputManager, state: &BuildState) -> Result<()> {
    for warning in state.warnings() {
        output.warn(&warning)?;
    }

    output.section("Build complete")?;
    if let Some(toolchain) = &state.toolchain {
        output.verbose(&format!(
            "  Python:    {} ({})",
            toolchain.version,
            toolchain.interpreter.display()
        ))?;
    }
    if let Some(report) = &state.report {
        output.success(&format!("{}", report.path.display()))?;
        output.indent(&format!("Size:      {}", format_bytes(report.size)))?;
        output.indent(&format!("SHA256:    {}", report.checksum))?;
    }
    output.indent(&format!("Icon:      {}", state.icon))?;
    output.indent(&format!("Info.plist: {}", state.metadata))?;
    output.indent(&format!("Signature: {}", state.signature))?;

    if state.signature == ToolOutcome::Succeeded {
        output.indent("Ad-hoc signed: runs locally, not notarized for distribution")?;
    }
    Ok(())
}
