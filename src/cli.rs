//! CLI definition and parsing.
//! The engine never inspects raw flag characters: clap parses the rm-style
//! surface into booleans here, and `apply_overrides` folds them into the
//! detected Config.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, RecycleMode};
use crate::exec::{DeleteFlags, MoveFlags};

const AFTER_HELP: &str = "\
Only -i, -f and -v have any meaning in recycle mode, which uses `mv`.

This tool is meant to be aliased to rm; add this to your bashrc/zshrc:

    if hash careful-rm 2>/dev/null; then
        alias rm=\"$(command -v careful-rm)\"
    else
        alias rm=\"rm -I\"
    fi";

/// CLI wrapper for the careful-rm engine. Flags mirror `rm` where they are
/// forwarded to it; combined short flags (`-rf`) work as usual.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "careful-rm",
    version,
    about = "Safe rm wrapper: asks before bulk or recursive deletes, and can recycle to trash",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Move to trash instead of deleting (forced on by ~/.rm_recycle).
    #[arg(short = 'c', long)]
    pub recycle: bool,

    /// Force recycling off, even if ~/.rm_recycle exists.
    #[arg(long)]
    pub direct: bool,

    /// Do not actually remove or move files, just print.
    #[arg(long)]
    pub dryrun: bool,

    /// Ignore nonexistent files and arguments, never prompt (passed to rm/mv).
    #[arg(short, long)]
    pub force: bool,

    /// Prompt before every removal (passed to rm/mv).
    #[arg(short)]
    pub interactive: bool,

    /// Accepted for rm compatibility; the bulk-delete gate always applies.
    #[arg(short = 'I')]
    pub prompt_once: bool,

    /// Remove directories and their contents recursively.
    #[arg(short, long, short_alias = 'R')]
    pub recursive: bool,

    /// Remove empty directories (passed to rm).
    #[arg(short = 'd', long = "dir")]
    pub empty_dirs: bool,

    /// Explain what is being done.
    #[arg(short, long)]
    pub verbose: bool,

    /// Files or directories to remove (glob-expanded by the shell).
    #[arg(required = true, value_name = "PATH", value_hint = ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,
}

impl Args {
    /// Fold CLI flags into the environment-detected config. `--direct` wins
    /// over both marker files and `-c`.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if self.recycle {
            cfg.recycle = RecycleMode::All;
        }
        if self.direct {
            cfg.recycle = RecycleMode::Off;
        }
        cfg.dry_run = self.dryrun;
        cfg.verbose = self.verbose;
        cfg.delete_flags = DeleteFlags {
            force: self.force,
            interactive: self.interactive,
            recursive: self.recursive,
            empty_dirs: self.empty_dirs,
            verbose: self.verbose,
        };
        cfg.move_flags = MoveFlags {
            force: self.force,
            interactive: self.interactive,
            verbose: self.verbose,
        };
    }
}

pub fn parse() -> Args {
    Args::parse()
}
