//! Runtime context.
//! Everything environment-derived (home directory, platform, trash
//! availability, marker files) is detected once at startup and carried as an
//! immutable value, so the routing logic stays pure given a `Config`.

use std::path::{Path, PathBuf};

use crate::exec::{DeleteFlags, MoveFlags};
use crate::platform::Platform;

/// Marker file that forces recycling on for everything.
pub const RECYCLE_MARKER: &str = ".rm_recycle";
/// Marker file that forces recycling on for paths under $HOME only.
pub const RECYCLE_HOME_MARKER: &str = ".rm_recycle_home";
/// Marker file that disables the desktop-trash integration.
pub const NO_DESKTOP_TRASH_MARKER: &str = ".no_apple_rm";

/// How paths are routed between direct deletion and the trash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecycleMode {
    /// Everything is deleted directly.
    #[default]
    Off,
    /// Everything goes through the trash flow.
    All,
    /// Only paths under the home directory are recycled.
    HomeOnly,
}

/// Immutable per-invocation configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub platform: Platform,
    pub uid: u32,
    pub user: String,
    pub home: PathBuf,
    /// Desktop trash directory for this platform, if it has one.
    pub home_trash: Option<PathBuf>,
    /// Whether `home_trash` existed at startup.
    pub has_home_trash: bool,
    /// System-wide fallback bin, created silently on first use.
    pub shared_bin: PathBuf,
    pub recycle: RecycleMode,
    /// `~/.no_apple_rm` was present or the bridge was disabled.
    pub desktop_trash_disabled: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub delete_flags: DeleteFlags,
    pub move_flags: MoveFlags,
}

impl Config {
    /// Build a config from explicit platform facts; trash availability and
    /// marker files are read from the given home directory.
    pub fn new(platform: Platform, uid: u32, user: impl Into<String>, home: impl Into<PathBuf>) -> Self {
        let user = user.into();
        let home = home.into();
        let home_trash = platform.home_trash(&home);
        let has_home_trash = home_trash.as_deref().is_some_and(Path::is_dir);

        let recycle = if home.join(RECYCLE_MARKER).is_file() {
            RecycleMode::All
        } else if home.join(RECYCLE_HOME_MARKER).is_file() {
            RecycleMode::HomeOnly
        } else {
            RecycleMode::Off
        };
        let desktop_trash_disabled = home.join(NO_DESKTOP_TRASH_MARKER).is_file();

        Self {
            platform,
            uid,
            shared_bin: PathBuf::from(format!("/tmp/{user}_trash")),
            user,
            home,
            home_trash,
            has_home_trash,
            recycle,
            desktop_trash_disabled,
            dry_run: false,
            verbose: false,
            delete_flags: DeleteFlags::default(),
            move_flags: MoveFlags::default(),
        }
    }

    /// Detect the runtime environment: platform, uid, user and home.
    pub fn detect() -> anyhow::Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot determine a home directory"))?;
        let uid = effective_uid();
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .unwrap_or_else(|_| format!("uid{uid}"));
        Ok(Self::new(Platform::current(), uid, user, home))
    }

    /// Whether an absolute path lives under the home directory.
    pub fn is_under_home(&self, path: &Path) -> bool {
        path.starts_with(&self.home)
    }
}

#[cfg(unix)]
fn effective_uid() -> u32 {
    unsafe { libc::geteuid() }
}

#[cfg(not(unix))]
fn effective_uid() -> u32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn marker_files_drive_recycle_mode() {
        let td = tempdir().unwrap();
        let cfg = Config::new(Platform::Linux, 1000, "u", td.path());
        assert_eq!(cfg.recycle, RecycleMode::Off);

        std::fs::write(td.path().join(RECYCLE_HOME_MARKER), "").unwrap();
        let cfg = Config::new(Platform::Linux, 1000, "u", td.path());
        assert_eq!(cfg.recycle, RecycleMode::HomeOnly);

        // The all-paths marker wins over the home-only one.
        std::fs::write(td.path().join(RECYCLE_MARKER), "").unwrap();
        let cfg = Config::new(Platform::Linux, 1000, "u", td.path());
        assert_eq!(cfg.recycle, RecycleMode::All);
    }

    #[test]
    fn home_trash_presence_is_captured_at_startup() {
        let td = tempdir().unwrap();
        let cfg = Config::new(Platform::Linux, 1000, "u", td.path());
        assert!(!cfg.has_home_trash);

        std::fs::create_dir_all(td.path().join(".local/share/Trash")).unwrap();
        let cfg = Config::new(Platform::Linux, 1000, "u", td.path());
        assert!(cfg.has_home_trash);
    }

    #[test]
    fn shared_bin_is_per_user() {
        let td = tempdir().unwrap();
        let cfg = Config::new(Platform::Linux, 1000, "alice", td.path());
        assert_eq!(cfg.shared_bin, PathBuf::from("/tmp/alice_trash"));
    }

    #[test]
    fn under_home_check() {
        let td = tempdir().unwrap();
        let cfg = Config::new(Platform::Linux, 1000, "u", td.path());
        assert!(cfg.is_under_home(&td.path().join("docs/x.txt")));
        assert!(!cfg.is_under_home(Path::new("/var/tmp/x.txt")));
    }
}
