//! Interpreter, dependency and PyInstaller settings.

/// Interpreter requirements and PyInstaller options.
///
/// Maps to the `[python]` table of `packaging.toml`.
///
/// ```toml
/// [python]
/// minimum_version = "3.9"
/// requirements = "requirements.txt"
/// extra_packages = ["pyinstaller"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PythonSettings {
    /// Oldest interpreter accepted, as `MAJOR.MINOR[.PATCH]`.
    pub minimum_version: String,

    /// Dependency manifest, relative to the project directory.
    pub requirements: String,

    /// Packages installed alongside the manifest (the bundler itself).
    pub extra_packages: Vec<String>,

    /// Modules PyInstaller's analysis misses.
    pub hidden_imports: Vec<String>,

    /// Packages whose data, binaries and submodules are collected wholesale.
    pub collect_all: Vec<String>,
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            minimum_version: "3.9".into(),
            requirements: "requirements.txt".into(),
            extra_packages: vec!["pyinstaller".into()],
            hidden_imports: [
                "PyQt6.QtCore",
                "PyQt6.QtGui",
                "PyQt6.QtWidgets",
                "lxml",
                "lxml.etree",
                "lxml._elementpath",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            collect_all: vec!["PyQt6".into()],
        }
    }
}
