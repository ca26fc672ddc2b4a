//! Builder for constructing Settings.

use super::{IconSettings, MacOsSettings, PackageSettings, PythonSettings, Settings};
use crate::bundler::{error::Error, utils::version};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building packaging settings with validation.
///
/// # Examples
///
/// ```no_run
/// use citemigrate_packager::bundler::{SettingsBuilder, PackageSettings};
///
/// # fn example() -> citemigrate_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("/path/to/citemigrate")
///     .package_settings(PackageSettings {
///         version: "1.1".into(),
///         build: "42".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_dir: Option<PathBuf>,
    interpreter: Option<PathBuf>,
    package_settings: PackageSettings,
    python_settings: PythonSettings,
    icon_settings: IconSettings,
    macos_settings: MacOsSettings,
    skip_install: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project directory.
    ///
    /// Default: current directory
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the interpreter binary (name on `PATH` or explicit path).
    ///
    /// Default: "python3"
    pub fn interpreter<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.interpreter = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets application identity and version metadata.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = settings;
        self
    }

    /// Sets interpreter and PyInstaller options.
    pub fn python_settings(mut self, settings: PythonSettings) -> Self {
        self.python_settings = settings;
        self
    }

    /// Sets icon configuration.
    pub fn icon_settings(mut self, settings: IconSettings) -> Self {
        self.icon_settings = settings;
        self
    }

    /// Sets macOS signing and plist editor configuration.
    pub fn macos_settings(mut self, settings: MacOsSettings) -> Self {
        self.macos_settings = settings;
        self
    }

    /// Skips the dependency installation stage.
    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the application name, identifier or entry
    /// point is empty, if `python.minimum_version` is not a version, or if
    /// `icon.iconset` does not end in `.iconset` (iconutil requires it).
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let package = self.package_settings;
        for (key, value) in [
            ("app.name", &package.product_name),
            ("app.identifier", &package.identifier),
            ("app.entry_point", &package.entry_point),
            ("app.version", &package.version),
            ("app.build", &package.build),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{key} must not be empty")));
            }
        }

        let minimum_python =
            version::parse_lenient(&self.python_settings.minimum_version).ok_or_else(|| {
                Error::Config(format!(
                    "python.minimum_version is not a version: {:?}",
                    self.python_settings.minimum_version
                ))
            })?;

        if !self.icon_settings.iconset.ends_with(".iconset") {
            return Err(Error::Config(format!(
                "icon.iconset must end in .iconset: {:?}",
                self.icon_settings.iconset
            )));
        }

        Ok(Settings::new(
            package,
            self.python_settings,
            self.icon_settings,
            self.macos_settings,
            self.project_dir.unwrap_or_else(|| PathBuf::from(".")),
            self.interpreter.unwrap_or_else(|| PathBuf::from("python3")),
            minimum_python,
            self.skip_install,
        ))
    }
}
