//! Lenient version parsing for interpreter output and configuration values.

use semver::Version;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is valid")
});

/// Extracts the first `MAJOR.MINOR[.PATCH]` from `text`.
///
/// Pre-release suffixes are dropped (`3.13.0rc1` -> `3.13.0`), a missing
/// patch component is treated as 0 (`3.9` -> `3.9.0`).
pub fn parse_lenient(text: &str) -> Option<Version> {
    let caps = VERSION_PATTERN.captures(text)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let patch = caps
        .get(3)
        .map(|m| m.as_str().parse())
        .transpose()
        .ok()?
        .unwrap_or(0);
    Some(Version::new(major, minor, patch))
}
