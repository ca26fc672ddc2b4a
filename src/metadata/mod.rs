//! Packaging manifest (`packaging.toml`) loading.
//!
//! The manifest is optional. Every table and key has a default, so a missing
//! file and an empty file both package CiteMigrate with its stock settings.

use crate::bundler::{
    IconSettings, MacOsSettings, PackageSettings, PythonSettings, SettingsBuilder,
};
use crate::error::{BundlerError, CliError, Result};
use std::path::{Path, PathBuf};

/// Default manifest file name, looked up in the project directory.
pub const MANIFEST_FILE: &str = "packaging.toml";

/// Parsed contents of `packaging.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagingManifest {
    /// `[app]`
    pub app: PackageSettings,
    /// `[python]`
    pub python: PythonSettings,
    /// `[icon]`
    pub icon: IconSettings,
    /// `[macos]`
    pub macos: MacOsSettings,
}

impl PackagingManifest {
    /// Seeds a [`SettingsBuilder`] with the manifest's tables.
    pub fn into_builder(self) -> SettingsBuilder {
        SettingsBuilder::new()
            .package_settings(self.app)
            .python_settings(self.python)
            .icon_settings(self.icon)
            .macos_settings(self.macos)
    }
}

/// Parses a manifest from a string.
pub fn parse_manifest(contents: &str) -> Result<PackagingManifest> {
    Ok(toml::from_str(contents)?)
}

/// Loads the manifest for a project.
///
/// With an explicit path the file must exist. Without one,
/// `<project_dir>/packaging.toml` is used if present, defaults otherwise.
pub fn load_manifest(project_dir: &Path, explicit: Option<&Path>) -> Result<PackagingManifest> {
    let path: PathBuf = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(BundlerError::Cli(CliError::InvalidArguments {
                    reason: format!("config file not found: {}", path.display()),
                }));
            }
            path.to_path_buf()
        }
        None => {
            let path = project_dir.join(MANIFEST_FILE);
            if !path.is_file() {
                log::debug!("No {} found, using defaults", path.display());
                return Ok(PackagingManifest::default());
            }
            path
        }
    };

    log::debug!("Loading packaging manifest from {}", path.display());
    let contents = std::fs::read_to_string(&path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_packaging_manifest".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    parse_manifest(&contents).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "parse_packaging_manifest".to_string(),
            reason: format!("Failed to parse {}: {}", path.display(), e),
        })
    })
}
