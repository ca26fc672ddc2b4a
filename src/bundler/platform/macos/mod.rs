//! macOS application bundle stages.
//!
//! - `icon` - `.icns` generation with sips and iconutil
//! - `freeze` - PyInstaller invocation and bundle verification
//! - `info_plist` - version and display-name patching with PlistBuddy

pub mod freeze;
pub mod icon;
pub mod info_plist;
