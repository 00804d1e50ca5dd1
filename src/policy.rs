//! Confirmation policy.
//! Decides, from counts and flags, when the user must confirm before
//! anything is deleted, and builds the prompt messages. All prompts default
//! to the safe answer.

use std::fs;
use std::path::PathBuf;

use crate::errors::{AbortReason, CarefulRmError, Result};
use crate::output;
use crate::prompt::{self, Prompter};
use crate::ui;

/// Minimum count of plain files that triggers the bulk confirmation.
pub const CUTOFF: usize = 3;

/// Maximum item count still rendered inline in a prompt message.
pub const MAX_LINE: usize = 5;

/// One-level-deep totals across the requested directories: (subfiles,
/// subfolders). A shallow heuristic by design, not a recursive scan; it only
/// gives the user a rough size hint before a recursive delete.
pub fn shallow_counts(dirs: &[PathBuf]) -> (usize, usize) {
    let mut files = 0usize;
    let mut folders = 0usize;
    for dir in dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            if entry.path().is_dir() {
                folders += 1;
            } else {
                files += 1;
            }
        }
    }
    (files, folders)
}

fn contents_hint(subfiles: usize, subfolders: usize) -> Option<String> {
    let mut parts = Vec::new();
    if subfiles > 0 {
        parts.push(format!("{subfiles} subfiles"));
    }
    if subfolders > 0 {
        parts.push(format!("{subfolders} subfolders"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" and "))
    }
}

/// The message shown before a recursive directory delete.
pub fn recursive_message(dirs: &[PathBuf], term_width: usize) -> String {
    let (subfiles, subfolders) = shallow_counts(dirs);
    let hint = contents_hint(subfiles, subfolders);
    let mut msg = String::from("Recursively deleting ");
    if dirs.len() < MAX_LINE {
        msg.push_str(&format!("the folders [{}]", ui::inline_list(dirs)));
        if let Some(hint) = hint {
            msg.push_str(" with ");
            msg.push_str(&hint);
        }
    } else {
        msg.push_str(&format!("{} dirs:", dirs.len()));
        msg.push_str(&format!("\n{}\n", ui::format_list_width(dirs, term_width)));
        match hint {
            Some(hint) => msg.push_str(&format!("Containing {hint}")),
            None => msg.push_str("Containing no subfiles or directories"),
        }
    }
    msg
}

/// Recursive-directory gate. Only called when recursion was requested and
/// directories are present. Declining aborts the whole operation.
pub fn recursive_gate(
    dirs: &[PathBuf],
    prompter: &mut dyn Prompter,
    term_width: usize,
) -> Result<()> {
    output::print_report(&recursive_message(dirs, term_width));
    if prompt::yes_no(prompter, "Really delete?", false)? {
        Ok(())
    } else {
        Err(CarefulRmError::UserAborted(AbortReason::RecursiveDelete))
    }
}

/// Directories present but recursion not requested: warn and ask whether to
/// continue. Returns whether the directories should be kept; declining drops
/// them from processing while files continue.
pub fn unrequested_dirs_gate(
    dirs: &[PathBuf],
    prompter: &mut dyn Prompter,
    term_width: usize,
) -> Result<bool> {
    if dirs.len() < MAX_LINE {
        output::print_report(&format!(
            "Directories [{}] included but -r not sent",
            ui::inline_list(dirs)
        ));
    } else {
        output::print_report(&format!(
            "{} directories included but -r not sent\n{}",
            dirs.len(),
            ui::format_list_width(dirs, term_width)
        ));
    }
    prompt::yes_no(prompter, "Continue anyway?", true)
}

/// Bulk-file gate: triggers iff the plain file count reaches the cutoff.
/// Declining aborts, with the exit code distinguishing the inline and
/// columnar forms.
pub fn bulk_gate(
    files: &[PathBuf],
    prompter: &mut dyn Prompter,
    term_width: usize,
) -> Result<()> {
    if files.len() < CUTOFF {
        return Ok(());
    }
    if files.len() < MAX_LINE {
        let question = format!("Delete the files [{}]?", ui::inline_list(files));
        if prompt::yes_no(prompter, &question, false)? {
            Ok(())
        } else {
            Err(CarefulRmError::UserAborted(AbortReason::BulkDelete))
        }
    } else {
        output::print_report(&format!(
            "Deleting the following {} files:\n{}",
            files.len(),
            ui::format_list_width(files, term_width)
        ));
        if prompt::yes_no(prompter, "Delete?", false)? {
            Ok(())
        } else {
            Err(CarefulRmError::UserAborted(AbortReason::BulkDeleteList))
        }
    }
}
