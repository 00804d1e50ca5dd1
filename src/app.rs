//! Application orchestrator.
//! Detects the runtime context, applies CLI overrides, initializes logging,
//! wires the real collaborators and maps engine results to exit codes.

use anyhow::Result;
use tracing::debug;

use careful_rm::cli::Args;
use careful_rm::exec::{DesktopTrash, FinderTrash, SystemMover, SystemRemover};
use careful_rm::prompt::StdinPrompter;
use careful_rm::{Config, RecycleMode, engine, output, platform};

use crate::logging::init_tracing;

/// Run the CLI application, returning the process exit code.
pub fn run(args: Args) -> Result<i32> {
    let mut cfg = Config::detect()?;
    args.apply_overrides(&mut cfg);
    init_tracing(cfg.verbose)?;

    if cfg.dry_run {
        output::print_warn("Not actually removing files.");
    }
    if cfg.verbose {
        match cfg.recycle {
            RecycleMode::Off => debug!("using remove instead of recycle"),
            mode => debug!(?mode, "using recycle instead of remove"),
        }
    }

    // The Finder bridge is only wired up when the platform has one, it is
    // found on PATH, and no marker file disabled it.
    let bridge = if cfg.platform.supports_desktop_trash() && !cfg.desktop_trash_disabled {
        platform::osascript_path().map(FinderTrash::new)
    } else {
        None
    };
    let desktop = bridge.as_ref().map(|b| b as &dyn DesktopTrash);

    let mut prompter = StdinPrompter::new();
    let remover = SystemRemover;
    let mover = SystemMover;

    match engine::run(&cfg, &args.paths, &mut prompter, &remover, &mover, desktop) {
        Ok(code) => Ok(code),
        Err(err) => {
            output::print_error(&err.to_string());
            Ok(err.exit_code())
        }
    }
}
