//! Path classification.
//! Splits requested paths into directories, regular files/symlinks, other
//! filesystem entries (sockets, fifos, devices) and non-existent paths.
//! Type tests never follow symlinks: a link pointing at a directory is still
//! handled as a file, so it is unlinked rather than recursed into.

use std::fs;
use std::path::{Path, PathBuf};

/// What a requested path turned out to be. Computed once, never revised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    RegularOrLink,
    Other,
    Missing,
}

/// Classify a single path from its lstat result.
pub fn kind_of(path: &Path) -> PathKind {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            let ft = meta.file_type();
            if ft.is_symlink() || ft.is_file() {
                PathKind::RegularOrLink
            } else if ft.is_dir() {
                PathKind::Directory
            } else {
                PathKind::Other
            }
        }
        Err(_) => PathKind::Missing,
    }
}

/// Requested paths partitioned by kind, input order preserved within each group.
#[derive(Debug, Default, Clone)]
pub struct Classified {
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub other: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

impl Classified {
    /// Partition `paths` into the four kind groups.
    pub fn partition(paths: &[PathBuf]) -> Self {
        let mut classified = Self::default();
        for path in paths {
            match kind_of(path) {
                PathKind::Directory => classified.dirs.push(path.clone()),
                PathKind::RegularOrLink => classified.files.push(path.clone()),
                PathKind::Other => classified.other.push(path.clone()),
                PathKind::Missing => classified.missing.push(path.clone()),
            }
        }
        classified
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty() && self.other.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::tempdir;

    #[test]
    fn partition_splits_by_kind() {
        let td = tempdir().unwrap();
        let dir = td.path().join("d");
        fs::create_dir(&dir).unwrap();
        let file = td.path().join("f.txt");
        fs::write(&file, "x").unwrap();
        let missing = td.path().join("nope");

        let classified =
            Classified::partition(&[dir.clone(), file.clone(), missing.clone()]);
        assert_eq!(classified.dirs, vec![dir]);
        assert_eq!(classified.files, vec![file]);
        assert!(classified.other.is_empty());
        assert_eq!(classified.missing, vec![missing]);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_directory_is_a_file() {
        use std::os::unix::fs::symlink;
        let td = tempdir().unwrap();
        let dir = td.path().join("real");
        fs::create_dir(&dir).unwrap();
        let link = td.path().join("link");
        symlink(&dir, &link).unwrap();
        assert_eq!(kind_of(&link), PathKind::RegularOrLink);
    }

    #[cfg(unix)]
    #[test]
    fn broken_symlink_is_a_file_not_missing() {
        use std::os::unix::fs::symlink;
        let td = tempdir().unwrap();
        let link = td.path().join("dangling");
        symlink(td.path().join("gone"), &link).unwrap();
        assert_eq!(kind_of(&link), PathKind::RegularOrLink);
    }

    #[cfg(unix)]
    #[test]
    fn fifo_is_other() {
        let td = tempdir().unwrap();
        let fifo = td.path().join("pipe");
        let status = Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(status.success(), "mkfifo should succeed");
        assert_eq!(kind_of(&fifo), PathKind::Other);
    }

    #[test]
    fn classification_is_idempotent() {
        let td = tempdir().unwrap();
        let file = td.path().join("f");
        fs::write(&file, "x").unwrap();
        let first = kind_of(&file);
        assert_eq!(first, kind_of(&file));
    }
}
