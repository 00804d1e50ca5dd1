//! The removal engine.
//! Classifies the requested paths, runs the confirmation gates, splits the
//! survivors between direct deletion and the trash flow, and finally hands
//! the delete set to the external delete primitive. Every path ends in
//! exactly one terminal bucket: deleted, recycled, dropped on refusal, or
//! reported missing.

use std::path::PathBuf;

use tracing::debug;

use crate::classify::Classified;
use crate::config::{Config, RecycleMode};
use crate::errors::{EXIT_DELETE_FAILED, EXIT_NOTHING_TO_DO, Result};
use crate::exec::{DesktopTrash, Mover, Remover};
use crate::output;
use crate::policy;
use crate::prompt::{self, Prompter};
use crate::trash;
use crate::ui;

/// Run one removal request. Returns the process exit code; confirmation
/// refusals and invalid prompt responses surface as errors with their own
/// codes.
pub fn run(
    cfg: &Config,
    paths: &[PathBuf],
    prompter: &mut dyn Prompter,
    remover: &dyn Remover,
    mover: &dyn Mover,
    desktop: Option<&dyn DesktopTrash>,
) -> Result<i32> {
    let term_width = ui::detect_width();
    let classified = Classified::partition(paths);

    if !classified.missing.is_empty() {
        output::print_warn(&format!(
            "The following paths do not match any files\n{}",
            ui::format_list_width(&classified.missing, term_width)
        ));
    }
    debug!(
        dirs = classified.dirs.len(),
        files = classified.files.len(),
        other = classified.other.len(),
        missing = classified.missing.len(),
        "classified input paths"
    );

    let mut dirs = classified.dirs;
    let files = classified.files;
    let other = classified.other;

    if cfg.delete_flags.recursive {
        if !dirs.is_empty() {
            policy::recursive_gate(&dirs, prompter, term_width)?;
        }
    } else if !dirs.is_empty() && !policy::unrequested_dirs_gate(&dirs, prompter, term_width)? {
        // Dropped, not aborted: the remaining files still go through.
        dirs.clear();
    }

    policy::bulk_gate(&files, prompter, term_width)?;

    let mut to_delete: Vec<PathBuf> = dirs;
    to_delete.extend(files);
    let mut to_recycle: Vec<PathBuf> = Vec::new();
    match cfg.recycle {
        RecycleMode::All => to_recycle = std::mem::take(&mut to_delete),
        RecycleMode::HomeOnly => {
            // Two-pass partition: each home path moves to the recycle list
            // exactly once.
            let (home, elsewhere): (Vec<PathBuf>, Vec<PathBuf>) = to_delete
                .into_iter()
                .partition(|p| cfg.is_under_home(&trash::absolutize(p)));
            to_recycle = home;
            to_delete = elsewhere;
        }
        RecycleMode::Off => {}
    }
    debug!(
        delete = to_delete.len() + other.len(),
        recycle = to_recycle.len(),
        "routing decided"
    );

    if to_delete.is_empty() && other.is_empty() && to_recycle.is_empty() {
        output::print_warn("No files or folders to delete");
        return Ok(EXIT_NOTHING_TO_DO);
    }

    // Sockets, devices and friends cannot be recycled; they are deleted
    // directly after their own confirmation.
    if !other.is_empty() {
        output::print_report("The following entries cannot be recycled and will be deleted:");
        output::print_report(&ui::format_list_width(&other, term_width));
        if prompt::yes_no(prompter, "Delete?", false)? {
            let code = if cfg.dry_run {
                output::print_command(&format!(
                    "Command: {}",
                    remover.render_command(&cfg.delete_flags, &other)
                ));
                0
            } else {
                remover.delete(&cfg.delete_flags, &other)
            };
            if code != 0 {
                output::print_error("Delete failed!");
                return Ok(EXIT_DELETE_FAILED);
            }
            output::print_report("Done");
        }
    }

    if !to_recycle.is_empty() {
        trash::ensure_shared_bin(cfg)?;
        let failed = trash::recycle_files(&to_recycle, cfg, prompter, mover, desktop)?;
        to_delete.extend(failed);
    }

    if !to_delete.is_empty() {
        if cfg.dry_run || cfg.verbose {
            output::print_command(&format!(
                "Command: {}",
                remover.render_command(&cfg.delete_flags, &to_delete)
            ));
            if cfg.dry_run {
                return Ok(0);
            }
        }
        return Ok(remover.delete(&cfg.delete_flags, &to_delete));
    }

    Ok(0)
}
