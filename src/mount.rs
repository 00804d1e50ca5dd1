//! Mountpoint resolution.
//! A directory is a mount boundary when its device id differs from its
//! parent's. The filesystem root is always a valid mountpoint fallback.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Whether `path` is itself a mount boundary.
pub fn is_mount_point(path: &Path) -> bool {
    if path == Path::new("/") {
        return true;
    }
    let Ok(meta) = fs::metadata(path) else {
        return false;
    };
    if !meta.is_dir() {
        return false;
    }
    let Some(parent) = path.parent() else {
        return true;
    };
    match fs::metadata(parent) {
        #[cfg(unix)]
        Ok(parent_meta) => {
            // Crossing onto a different device, or "parent" resolving to the
            // same inode (the root case), marks a boundary.
            parent_meta.dev() != meta.dev()
                || (parent_meta.dev() == meta.dev() && parent_meta.ino() == meta.ino())
        }
        #[cfg(not(unix))]
        Ok(_) => false,
        Err(_) => false,
    }
}

/// Walk up from `path` (inclusive) to its containing mountpoint.
pub fn resolve_mount(path: &Path) -> PathBuf {
    let mut probe = path;
    loop {
        if is_mount_point(probe) {
            return probe.to_path_buf();
        }
        match probe.parent() {
            Some(parent) => probe = parent,
            None => return PathBuf::from("/"),
        }
    }
}
