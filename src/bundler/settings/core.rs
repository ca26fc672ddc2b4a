//! Core Settings struct and implementations.

use super::{IconSettings, MacOsSettings, PackageSettings, PythonSettings};
use semver::Version;
use std::path::{Path, PathBuf};

/// Main settings for packaging operations.
///
/// Central configuration for the [`Bundler`](crate::bundler::Bundler),
/// constructed via [`SettingsBuilder`](super::SettingsBuilder). All project
/// paths are resolved against [`Settings::project_dir`].
///
/// # Examples
///
/// ```no_run
/// use citemigrate_packager::bundler::SettingsBuilder;
///
/// # fn example() -> citemigrate_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir(".")
///     .interpreter("python3")
///     .build()?;
/// assert!(settings.bundle_path().ends_with("dist/CiteMigrate.app"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    package: PackageSettings,
    python: PythonSettings,
    icon: IconSettings,
    macos: MacOsSettings,

    /// Directory holding the entry point, manifest and icon.
    project_dir: PathBuf,

    /// Interpreter binary name or path.
    interpreter: PathBuf,

    /// Parsed `python.minimum_version`.
    minimum_python: Version,

    /// Skip the dependency installation stage.
    skip_install: bool,
}

impl Settings {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        python: PythonSettings,
        icon: IconSettings,
        macos: MacOsSettings,
        project_dir: PathBuf,
        interpreter: PathBuf,
        minimum_python: Version,
        skip_install: bool,
    ) -> Self {
        Self {
            package,
            python,
            icon,
            macos,
            project_dir,
            interpreter,
            minimum_python,
            skip_install,
        }
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the bundle identifier.
    pub fn identifier(&self) -> &str {
        &self.package.identifier
    }

    /// Returns the package metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the interpreter and PyInstaller settings.
    pub fn python(&self) -> &PythonSettings {
        &self.python
    }

    /// Returns the icon settings.
    pub fn icon(&self) -> &IconSettings {
        &self.icon
    }

    /// Returns the macOS settings.
    pub fn macos(&self) -> &MacOsSettings {
        &self.macos
    }

    /// Returns the project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the interpreter binary.
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Returns the oldest accepted interpreter version.
    pub fn minimum_python(&self) -> &Version {
        &self.minimum_python
    }

    /// Whether dependency installation is skipped.
    pub fn skip_install(&self) -> bool {
        self.skip_install
    }

    /// Dependency manifest path.
    pub fn requirements_path(&self) -> PathBuf {
        self.project_dir.join(&self.python.requirements)
    }

    /// PyInstaller work directory.
    pub fn build_dir(&self) -> PathBuf {
        self.project_dir.join("build")
    }

    /// PyInstaller output directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.project_dir.join("dist")
    }

    /// Expected application bundle: `dist/<ProductName>.app`.
    pub fn bundle_path(&self) -> PathBuf {
        self.dist_dir().join(format!("{}.app", self.product_name()))
    }

    /// Metadata document inside the bundle.
    pub fn info_plist_path(&self) -> PathBuf {
        self.bundle_path().join("Contents").join("Info.plist")
    }

    /// Icon source image path.
    pub fn icon_source_path(&self) -> PathBuf {
        self.project_dir.join(&self.icon.source)
    }

    /// Compiled icon container path.
    pub fn icon_container_path(&self) -> PathBuf {
        self.project_dir.join(&self.icon.container)
    }

    /// Icon set staging directory path.
    pub fn iconset_path(&self) -> PathBuf {
        self.project_dir.join(&self.icon.iconset)
    }
}
