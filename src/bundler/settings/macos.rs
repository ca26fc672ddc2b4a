//! macOS platform-specific settings.

/// macOS application bundle (.app) configuration.
///
/// Maps to the `[macos]` table of `packaging.toml`.
///
/// ```toml
/// [macos]
/// signing_identity = "-"
/// plist_buddy = "/usr/libexec/PlistBuddy"
/// ```
///
/// # See Also
///
/// - [`IconSettings`] - application icon configuration
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacOsSettings {
    /// Code signing identity passed to `codesign --sign`.
    ///
    /// Use "-" for ad-hoc signing (local execution only).
    ///
    /// Default: "-"
    pub signing_identity: String,

    /// Property-list editor used to patch `Info.plist`.
    ///
    /// Default: "/usr/libexec/PlistBuddy"
    pub plist_buddy: String,
}

impl Default for MacOsSettings {
    fn default() -> Self {
        Self {
            signing_identity: "-".into(),
            plist_buddy: "/usr/libexec/PlistBuddy".into(),
        }
    }
}

/// Application icon configuration.
///
/// Maps to the `[icon]` table of `packaging.toml`. Paths are relative to the
/// project directory.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconSettings {
    /// Source raster image, ideally a 1024x1024 PNG.
    ///
    /// Default: "icon.png"
    pub source: String,

    /// Compiled multi-resolution icon. Used as-is when it already exists.
    ///
    /// Default: "icon.icns"
    pub container: String,

    /// Staging directory for `iconutil`; must end in `.iconset`.
    ///
    /// Default: "icon.iconset"
    pub iconset: String,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            source: "icon.png".into(),
            container: "icon.icns".into(),
            iconset: "icon.iconset".into(),
        }
    }
}
