//! Application icon generation.
//!
//! Turns a single PNG into an `.icns` with `sips` and `iconutil`. The whole
//! stage is best-effort: any problem leaves the app with the default icon.

use crate::bundler::{
    Settings,
    builder::{
        BuildState, ToolOutcome,
        tool_detection::{self, IconTools},
    },
    error::Result,
    utils::{
        fs,
        process::{CommandRunner, ToolCommand, path_arg},
    },
};
use std::path::Path;

/// Resized entries of an `.iconset`: (edge length in px, file name).
pub const ICONSET_SIZES: [(u32, &str); 9] = [
    (16, "icon_16x16.png"),
    (32, "icon_16x16@2x.png"),
    (32, "icon_32x32.png"),
    (64, "icon_32x32@2x.png"),
    (128, "icon_128x128.png"),
    (256, "icon_128x128@2x.png"),
    (256, "icon_256x256.png"),
    (512, "icon_256x256@2x.png"),
    (512, "icon_512x512.png"),
];

/// Largest entry, copied from the source without resizing.
pub const ICONSET_LARGEST: &str = "icon_512x512@2x.png";

/// Edge length the largest entry is expected to have.
const SOURCE_EDGE: u32 = 1024;

/// Builds the icon container if needed and decides the icon flags.
///
/// # Process
/// 1. Skip if the container already exists or there is no source image
/// 2. Skip with a warning if `sips`/`iconutil` are missing
/// 3. Resize the source into the iconset staging directory
/// 4. Copy the source verbatim as the @2x 512 entry
/// 5. Compile with `iconutil`, then delete the staging directory
///
/// Flags are decided from file existence afterwards, independently of each
/// other: the source image is embedded even when compilation failed.
pub async fn prepare_icon<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    mut state: BuildState,
) -> Result<BuildState> {
    let source = settings.icon_source_path();
    let container = settings.icon_container_path();

    state.icon = if container.exists() {
        log::info!("Using existing icon {}", container.display());
        ToolOutcome::Skipped(format!("{} already exists", settings.icon().container))
    } else if !source.exists() {
        log::info!("No {} found, using the default icon", settings.icon().source);
        ToolOutcome::Skipped(format!("{} not found", settings.icon().source))
    } else {
        match tool_detection::probe_icon_tools(runner) {
            Ok(tools) => {
                inspect_source(&source);
                build_icns(settings, runner, &tools).await
            }
            Err(reason) => {
                log::warn!("{}; skipping custom icon", reason);
                ToolOutcome::Unavailable(reason)
            }
        }
    };

    state.icon_flags.icon = container
        .exists()
        .then(|| settings.icon().container.clone());
    state.icon_flags.add_data = source.exists().then(|| settings.icon().source.clone());

    Ok(state)
}

/// Warns about a source image iconutil will upscale or distort.
fn inspect_source(source: &Path) {
    match image::image_dimensions(source) {
        Ok((width, height)) if width != height => {
            log::warn!(
                "{} is {}x{}; icons should be square",
                source.display(),
                width,
                height
            );
        }
        Ok((width, _)) if width < SOURCE_EDGE => {
            log::warn!(
                "{} is {}px; {}px is recommended for Retina icons",
                source.display(),
                width,
                SOURCE_EDGE
            );
        }
        Ok(_) => {}
        Err(e) => log::warn!("Could not read {}: {}", source.display(), e),
    }
}

async fn build_icns<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    tools: &IconTools,
) -> ToolOutcome {
    let iconset = settings.iconset_path();
    let container = settings.icon_container_path();

    log::info!("Generating {} from {}...", settings.icon().container, settings.icon().source);
    let outcome = match compile_iconset(settings, runner, tools).await {
        Ok(outcome) => outcome,
        Err(reason) => ToolOutcome::Failed(reason),
    };

    if let Err(e) = fs::remove_dir_all(&iconset).await {
        log::warn!("Could not clean up {}: {}", iconset.display(), e);
    }

    match &outcome {
        ToolOutcome::Succeeded => log::info!("✓ Created {}", container.display()),
        other => log::warn!("Icon generation {}; continuing without a custom icon", other),
    }
    outcome
}

/// Stages the iconset and runs `iconutil` on it. `Err` carries the reason
/// the iconset could not be prepared.
async fn compile_iconset<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    tools: &IconTools,
) -> std::result::Result<ToolOutcome, String> {
    let source = settings.icon_source_path();
    let iconset = settings.iconset_path();
    let container = settings.icon_container_path();

    fs::create_dir_all(&iconset, true)
        .await
        .map_err(|e| e.to_string())?;
    stage_iconset(runner, tools, &source, &iconset).await?;

    let command = ToolCommand::new(&tools.iconutil)
        .args(["-c", "icns"])
        .arg(path_arg(&iconset).map_err(|e| e.to_string())?)
        .arg("-o")
        .arg(path_arg(&container).map_err(|e| e.to_string())?);
    Ok(compile_outcome(runner.run(&command).await, &command))
}

/// Fills the iconset directory. Returns the failure reason on the first
/// resize that does not succeed.
async fn stage_iconset<R: CommandRunner>(
    runner: &R,
    tools: &IconTools,
    source: &Path,
    iconset: &Path,
) -> std::result::Result<(), String> {
    let source_arg = path_arg(source).map_err(|e| e.to_string())?;

    for (edge, name) in ICONSET_SIZES {
        let target = iconset.join(name);
        let edge = edge.to_string();
        let command = ToolCommand::new(&tools.sips)
            .args(["-z", edge.as_str(), edge.as_str(), source_arg.as_str(), "--out"])
            .arg(path_arg(&target).map_err(|e| e.to_string())?);

        match runner.run(&command).await {
            Ok(output) if output.is_success() => {}
            Ok(output) => {
                return Err(format!(
                    "sips exited with {:?} resizing to {}: {}",
                    output.code,
                    name,
                    output.stderr.trim()
                ));
            }
            Err(e) => return Err(format!("sips could not be run: {e}")),
        }
    }

    fs::copy_file(source, &iconset.join(ICONSET_LARGEST))
        .await
        .map_err(|e| e.to_string())
}

fn compile_outcome(
    result: std::io::Result<crate::bundler::utils::process::CommandOutput>,
    command: &ToolCommand,
) -> ToolOutcome {
    match result {
        Ok(output) if output.is_success() => ToolOutcome::Succeeded,
        Ok(output) => ToolOutcome::Failed(format!(
            "`{}` exited with {:?}: {}",
            command,
            output.code,
            output.stderr.trim()
        )),
        Err(e) => ToolOutcome::Failed(format!("iconutil could not be run: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{SettingsBuilder, builder::testing::FakeHost};

    fn settings(dir: &Path) -> Settings {
        SettingsBuilder::new().project_dir(dir).build().unwrap()
    }

    fn write_png(path: &Path, edge: u32) {
        image::RgbaImage::new(edge, edge).save(path).unwrap();
    }

    #[tokio::test]
    async fn no_source_means_no_icon_and_no_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = FakeHost::default().runner();

        let state = prepare_icon(&settings(tmp.path()), &runner, BuildState::default())
            .await
            .unwrap();

        assert!(matches!(state.icon, ToolOutcome::Skipped(_)));
        assert!(state.icon_flags.to_args().is_empty());
        assert!(!tmp.path().join("icon.icns").exists());
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn builds_icns_from_source() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("icon.png"), 1024);
        let runner = FakeHost::default().runner();

        let state = prepare_icon(&settings(tmp.path()), &runner, BuildState::default())
            .await
            .unwrap();

        assert_eq!(state.icon, ToolOutcome::Succeeded);
        assert_eq!(runner.count("sips"), 9);
        assert_eq!(runner.count("iconutil"), 1);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("icon.icns")).unwrap(),
            "icns with 10 images"
        );
        assert!(!tmp.path().join("icon.iconset").exists());
        assert_eq!(
            state.icon_flags.to_args(),
            vec!["--icon", "icon.icns", "--add-data", "icon.png:."]
        );
    }

    #[tokio::test]
    async fn resize_commands_follow_the_size_table() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("icon.png"), 1024);
        let runner = FakeHost::default().runner();

        prepare_icon(&settings(tmp.path()), &runner, BuildState::default())
            .await
            .unwrap();

        let resizes: Vec<(String, String)> = runner
            .calls()
            .iter()
            .filter(|c| c.program_name() == "sips")
            .map(|c| {
                let out = std::path::Path::new(&c.args[5]);
                (c.args[1].clone(), out.file_name().unwrap().to_string_lossy().into_owned())
            })
            .collect();
        let expected: Vec<(String, String)> = ICONSET_SIZES
            .iter()
            .map(|(edge, name)| (edge.to_string(), name.to_string()))
            .collect();
        assert_eq!(resizes, expected);
    }

    #[tokio::test]
    async fn missing_tools_still_embed_source() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("icon.png"), 1024);
        let runner = FakeHost::linux().runner();

        let state = prepare_icon(&settings(tmp.path()), &runner, BuildState::default())
            .await
            .unwrap();

        assert!(matches!(state.icon, ToolOutcome::Unavailable(_)));
        assert_eq!(state.icon_flags.icon, None);
        assert_eq!(state.icon_flags.add_data.as_deref(), Some("icon.png"));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn compile_failure_is_not_fatal_and_cleans_staging() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("icon.png"), 512);
        let runner = FakeHost {
            iconutil_exit: 1,
            ..Default::default()
        }
        .runner();

        let state = prepare_icon(&settings(tmp.path()), &runner, BuildState::default())
            .await
            .unwrap();

        assert!(matches!(state.icon, ToolOutcome::Failed(_)));
        assert!(!tmp.path().join("icon.iconset").exists());
        assert!(!tmp.path().join("icon.icns").exists());
        assert_eq!(state.icon_flags.add_data.as_deref(), Some("icon.png"));
        assert_eq!(state.icon_flags.icon, None);
    }

    #[tokio::test]
    async fn resize_failure_skips_compile() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("icon.png"), 1024);
        let runner = FakeHost {
            sips_exit: 13,
            ..Default::default()
        }
        .runner();

        let state = prepare_icon(&settings(tmp.path()), &runner, BuildState::default())
            .await
            .unwrap();

        assert!(matches!(state.icon, ToolOutcome::Failed(ref r) if r.contains("sips")));
        assert_eq!(runner.count("sips"), 1);
        assert_eq!(runner.count("iconutil"), 0);
        assert!(!tmp.path().join("icon.iconset").exists());
    }

    #[tokio::test]
    async fn existing_container_is_reused() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("icon.icns"), "prebuilt").unwrap();
        let runner = FakeHost::default().runner();

        let state = prepare_icon(&settings(tmp.path()), &runner, BuildState::default())
            .await
            .unwrap();

        assert!(matches!(state.icon, ToolOutcome::Skipped(_)));
        assert_eq!(state.icon_flags.icon.as_deref(), Some("icon.icns"));
        assert_eq!(state.icon_flags.add_data, None);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("icon.icns")).unwrap(),
            "prebuilt"
        );
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn stale_iconset_file_degrades_to_failed() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("icon.png"), 1024);
        std::fs::write(tmp.path().join("icon.iconset"), "not a directory").unwrap();
        let runner = FakeHost::default().runner();

        let state = prepare_icon(&settings(tmp.path()), &runner, BuildState::default())
            .await
            .unwrap();

        assert!(matches!(state.icon, ToolOutcome::Failed(_)));
        assert_eq!(runner.count("sips"), 0);
        assert_eq!(state.icon_flags.add_data.as_deref(), Some("icon.png"));
        assert_eq!(state.icon_flags.icon, None);
    }
}
