//! External collaborators: the delete and move primitives and the desktop
//! trash integration. The engine only sees these traits; the real
//! implementations shell out to `rm`, `mv` and `osascript` and block until
//! the child exits. Exit codes are forwarded, never interpreted here.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Flags forwarded verbatim to the delete primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteFlags {
    pub force: bool,
    pub interactive: bool,
    pub recursive: bool,
    pub empty_dirs: bool,
    pub verbose: bool,
}

impl DeleteFlags {
    pub fn to_args(&self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.force {
            args.push("-f");
        }
        if self.interactive {
            args.push("-i");
        }
        if self.recursive {
            args.push("-r");
        }
        if self.empty_dirs {
            args.push("-d");
        }
        if self.verbose {
            args.push("-v");
        }
        args
    }
}

/// Flags forwarded to the move primitive. Only force/interactive/verbose
/// mean anything to `mv`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub force: bool,
    pub interactive: bool,
    pub verbose: bool,
}

impl MoveFlags {
    pub fn to_args(&self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.force {
            args.push("-f");
        }
        if self.interactive {
            args.push("-i");
        }
        if self.verbose {
            args.push("-v");
        }
        args
    }
}

/// The OS delete primitive.
pub trait Remover {
    /// Delete `paths`, returning the process exit code.
    fn delete(&self, flags: &DeleteFlags, paths: &[PathBuf]) -> i32;

    /// The command line that `delete` would run, for echoing to the user.
    fn render_command(&self, flags: &DeleteFlags, paths: &[PathBuf]) -> String;
}

/// The OS move primitive: move one path into a destination directory.
pub trait Mover {
    fn move_to(&self, flags: &MoveFlags, src: &Path, dest_dir: &Path) -> i32;
}

/// Optional platform trash integration, one path per call.
pub trait DesktopTrash {
    /// Returns the integration's exit code; non-zero means the path must
    /// fall through to filesystem-based recycling.
    fn send(&self, path: &Path) -> i32;
}

/// Shell-quote a single word for display purposes.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '/' | '+'));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

fn run_blocking(mut cmd: Command) -> i32 {
    debug!(?cmd, "spawning");
    match cmd.status() {
        Ok(status) => status.code().unwrap_or(1),
        Err(err) => {
            warn!(error = %err, "failed to spawn command");
            1
        }
    }
}

/// `rm` wrapper. Paths always follow a `--` separator so names starting
/// with '-' survive.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRemover;

impl Remover for SystemRemover {
    fn delete(&self, flags: &DeleteFlags, paths: &[PathBuf]) -> i32 {
        let mut cmd = Command::new("rm");
        cmd.args(flags.to_args()).arg("--").args(paths);
        run_blocking(cmd)
    }

    fn render_command(&self, flags: &DeleteFlags, paths: &[PathBuf]) -> String {
        let mut parts = vec!["rm".to_string()];
        parts.extend(flags.to_args().iter().map(|s| s.to_string()));
        parts.push("--".to_string());
        parts.extend(paths.iter().map(|p| shell_quote(&p.display().to_string())));
        parts.join(" ")
    }
}

/// `mv` wrapper.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMover;

impl Mover for SystemMover {
    fn move_to(&self, flags: &MoveFlags, src: &Path, dest_dir: &Path) -> i32 {
        let mut cmd = Command::new("mv");
        cmd.args(flags.to_args()).arg("--").arg(src).arg(dest_dir);
        run_blocking(cmd)
    }
}

/// macOS Finder trash via `osascript`.
#[derive(Debug, Clone)]
pub struct FinderTrash {
    osascript: PathBuf,
}

impl FinderTrash {
    pub fn new(osascript: PathBuf) -> Self {
        Self { osascript }
    }
}

impl DesktopTrash for FinderTrash {
    fn send(&self, path: &Path) -> i32 {
        let script = format!(
            "tell application \"Finder\" to delete POSIX file \"{}\"",
            path.display()
        );
        let mut cmd = Command::new(&self.osascript);
        cmd.arg("-e")
            .arg(script)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        run_blocking(cmd)
    }
}
