// crates/staging_processor/src/fs_utils.rs

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Returns every regular file below `root` whose name ends with `suffix`,
/// sorted by path.
pub fn find_files_with_suffix(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .map_or(false, |name| name.ends_with(suffix));
        if matches {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}

/// Removes whatever sits at `path`. A missing path is not an error.
pub fn remove_if_exists(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to inspect {}", path.display()))
        }
    };
    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.with_context(|| format!("Failed to remove {}", path.display()))
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let pointee =
        fs::read_link(link).with_context(|| format!("Failed to read link {}", link.display()))?;
    std::os::unix::fs::symlink(&pointee, target)
        .with_context(|| format!("Failed to create link {}", target.display()))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    fs::copy(link, target)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {} to {}", link.display(), target.display()))
}

/// Whether a failed rename means the two paths are on different filesystems.
pub fn is_cross_device(err: &io::Error) -> bool {
    // EXDEV on Linux and the BSDs, ERROR_NOT_SAME_DEVICE on Windows.
    #[cfg(unix)]
    const CROSS_DEVICE: i32 = 18;
    #[cfg(windows)]
    const CROSS_DEVICE: i32 = 17;
    #[cfg(not(any(unix, windows)))]
    const CROSS_DEVICE: i32 = -1;
    err.raw_os_error() == Some(CROSS_DEVICE)
}

/// Recursively copies the directory `from` to `to`, which must not exist.
/// Symbolic links are recreated rather than followed.
pub fn copy_dir_recursive(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from) {
        let entry = entry.with_context(|| format!("Failed to walk {}", from.display()))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .with_context(|| format!("{} is outside {}", entry.path().display(), from.display()))?;
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else if entry.file_type().is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Moves the directory `from` to `to`, replacing anything already at `to`.
///
/// Uses a rename where possible. Only when the two paths live on different
/// filesystems is the tree copied and the original removed, which is not
/// atomic. Any other rename failure is returned.
pub fn replace_directory(from: &Path, to: &Path) -> Result<()> {
    remove_if_exists(to)?;
    match fs::rename(from, to) {
        Ok(()) => {
            debug!(from = %from.display(), to = %to.display(), "renamed staging directory");
            Ok(())
        }
        Err(rename_err) if !is_cross_device(&rename_err) => Err(rename_err)
            .with_context(|| format!("Failed to rename {} to {}", from.display(), to.display())),
        Err(rename_err) => {
            warn!(
                error = %rename_err,
                "cross-device rename, falling back to copy and remove"
            );
            copy_dir_recursive(from, to)?;
            fs::remove_dir_all(from)
                .with_context(|| format!("Failed to remove {}", from.display()))
        }
    }
}
