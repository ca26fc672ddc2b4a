//! Bundle checksum calculation.
//!
//! A `.app` is a directory, so its checksum covers every file's relative
//! path and content in sorted order. Symlinks (framework `Current`
//! links) are hashed by their target. Two builds with identical tool output
//! hash identically regardless of directory iteration order.

use crate::{bail, bundler::Result, bundler::error::ErrorExt};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 of a file or directory tree.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the path cannot be read or is neither file nor directory
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading metadata for hashing", path)?;

    let mut hasher = Sha256::new();
    if metadata.is_file() {
        hash_file(&mut hasher, path).await?;
    } else if metadata.is_dir() {
        let mut entries = Vec::new();
        for entry in walkdir::WalkDir::new(path).follow_links(false) {
            let entry = entry?;
            let kind = entry.file_type();
            if kind.is_file() || kind.is_symlink() {
                entries.push(entry.into_path());
            }
        }
        entries.sort();

        for entry in entries {
            let rel_path = entry.strip_prefix(path).unwrap_or(entry.as_path());
            hasher.update(rel_path.to_string_lossy().as_bytes());
            hasher.update([0u8]);
            hash_entry(&mut hasher, &entry).await?;
        }
    } else {
        bail!("Path is neither file nor directory: {}", path.display());
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Hashes one tree entry as a tagged, length-prefixed record. Symlinks
/// contribute their target, not the file they point to.
async fn hash_entry(hasher: &mut Sha256, path: &Path) -> Result<()> {
    let metadata = tokio::fs::symlink_metadata(path)
        .await
        .fs_context("reading metadata for hashing", path)?;

    if metadata.file_type().is_symlink() {
        let target = tokio::fs::read_link(path)
            .await
            .fs_context("reading symlink for hashing", path)?;
        let target = target.to_string_lossy();
        hasher.update(b"L");
        hasher.update((target.len() as u64).to_le_bytes());
        hasher.update(target.as_bytes());
    } else {
        hasher.update(b"F");
        hasher.update(metadata.len().to_le_bytes());
        hash_file(hasher, path).await?;
    }
    Ok(())
}

async fn hash_file(hasher: &mut Sha256, path: &Path) -> Result<()> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(())
}
