//! Application identity and version metadata.

/// Application identity and version metadata.
///
/// Maps to the `[app]` table of `packaging.toml`. Every field has a default,
/// so an empty table (or no file at all) packages CiteMigrate.
///
/// # Examples
///
/// ```no_run
/// use citemigrate_packager::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "CiteMigrate".into(),
///     version: "1.2".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageSettings {
    /// Application name: PyInstaller `--name`, `.app` file name and
    /// `CFBundleDisplayName`.
    #[serde(rename = "name")]
    pub product_name: String,

    /// Bundle identifier in reverse domain notation.
    pub identifier: String,

    /// Python script passed to PyInstaller.
    pub entry_point: String,

    /// `CFBundleShortVersionString`.
    pub version: String,

    /// `CFBundleVersion`.
    pub build: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            product_name: "CiteMigrate".into(),
            identifier: "com.citemigrate.app".into(),
            entry_point: "citemigrate.py".into(),
            version: "1.0".into(),
            build: "1.0".into(),
        }
    }
}
