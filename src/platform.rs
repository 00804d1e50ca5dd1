//! Platform facts: where the desktop trash lives, what a per-mount trash
//! directory is called, and which convention it follows.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// Platform the binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// The user's home trash directory, when the platform has one.
    pub fn home_trash(&self, home: &Path) -> Option<PathBuf> {
        match self {
            Self::MacOs => Some(home.join(".Trash")),
            Self::Linux => Some(home.join(".local/share/Trash")),
            Self::Other => None,
        }
    }

    /// Name of the visible per-mount trash directory. Suffixed with the
    /// owner's uid everywhere except macOS.
    pub fn visible_trash_name(&self, uid: u32) -> String {
        match self {
            Self::MacOs => ".Trash".to_string(),
            _ => format!(".Trash-{uid}"),
        }
    }

    /// Whether trash directories follow the files/info subdirectory
    /// convention with `.trashinfo` sidecars.
    pub fn uses_info_convention(&self) -> bool {
        matches!(self, Self::Linux)
    }

    /// Whether a native desktop-trash integration may be attempted.
    pub fn supports_desktop_trash(&self) -> bool {
        matches!(self, Self::MacOs)
    }
}

/// Locate `osascript` on PATH, if present.
pub fn osascript_path() -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join("osascript"))
        .find(|candidate| candidate.is_file())
}
