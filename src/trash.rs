//! Trash routing and writing.
//! Groups recycle candidates by mountpoint, resolves (or creates) a trash
//! directory per mount, moves each path into it one at a time so metadata
//! can be attached, and hands back whatever could not be recycled.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::{CarefulRmError, Result};
use crate::exec::{DesktopTrash, Mover};
use crate::mount;
use crate::output;
use crate::prompt::{self, Prompter};
use crate::ui;

/// Timestamp format written into `.trashinfo` sidecars.
pub const TRASHINFO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A resolved trash directory for one mountpoint group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashTarget {
    pub dir: PathBuf,
    /// Moves go into `dir/files` with a sidecar in `dir/info`.
    pub uses_info: bool,
}

/// Best-effort absolute form without touching the filesystem.
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Group absolute paths by their containing mountpoint, using the real
/// mountpoint resolver.
pub fn group_by_mount(files: &[PathBuf], cfg: &Config) -> Vec<(PathBuf, Vec<PathBuf>)> {
    group_by_mount_with(files, cfg, &|p| mount::resolve_mount(p))
}

/// Grouping with an injectable resolver (tests supply a scripted one).
///
/// Longer paths are processed first so nested paths discover the deepest
/// mountpoints early; later paths reuse them by prefix match instead of
/// walking the directory tree again. A group resolving to the filesystem
/// root is remapped to the home trash (when the path is under home and the
/// home trash exists) or to the shared bin.
pub fn group_by_mount_with(
    files: &[PathBuf],
    cfg: &Config,
    resolve: &dyn Fn(&Path) -> PathBuf,
) -> Vec<(PathBuf, Vec<PathBuf>)> {
    let mut ordered: Vec<PathBuf> = files.to_vec();
    ordered.sort_by_key(|p| std::cmp::Reverse(p.as_os_str().len()));

    let mut groups: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();
    for file in ordered {
        if let Some((_, members)) = groups
            .iter_mut()
            .find(|(mount_dir, _)| file.starts_with(mount_dir))
        {
            members.push(file);
            continue;
        }
        let mut mnt = resolve(&file);
        if mnt == Path::new("/") {
            mnt = if cfg.has_home_trash && cfg.is_under_home(&file) {
                cfg.home_trash.clone().unwrap_or_else(|| cfg.shared_bin.clone())
            } else {
                cfg.shared_bin.clone()
            };
        }
        // Remapped root groups can repeat the same key; merge instead of
        // duplicating the mount entry.
        if let Some((_, members)) = groups.iter_mut().find(|(mount_dir, _)| *mount_dir == mnt) {
            members.push(file);
        } else {
            groups.push((mnt, vec![file]));
        }
    }
    groups
}

fn ensure_dir(path: &Path, dry_run: bool) -> Result<()> {
    if path.is_dir() || dry_run {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| CarefulRmError::io(path, e))
}

/// The shared bin is a private, low-stakes location: create it silently.
pub fn ensure_shared_bin(cfg: &Config) -> Result<()> {
    ensure_dir(&cfg.shared_bin, cfg.dry_run)
}

fn target_for(cfg: &Config, dir: PathBuf) -> TrashTarget {
    let uses_info = cfg.platform.uses_info_convention() && dir != cfg.shared_bin;
    TrashTarget { dir, uses_info }
}

fn push_group(
    targets: &mut Vec<(TrashTarget, Vec<PathBuf>)>,
    target: TrashTarget,
    members: Vec<PathBuf>,
) {
    if let Some((_, existing)) = targets.iter_mut().find(|(t, _)| t.dir == target.dir) {
        existing.extend(members);
    } else {
        targets.push((target, members));
    }
}

/// Resolve a trash directory for every mountpoint group. Mounts with no
/// visible trash ask the user whether to create one, fall back to the
/// shared bin, or give up on recycling that group (those paths are returned
/// as force-delete candidates). Each mount is resolved exactly once.
pub fn resolve_targets(
    groups: Vec<(PathBuf, Vec<PathBuf>)>,
    cfg: &Config,
    prompter: &mut dyn Prompter,
) -> Result<(Vec<(TrashTarget, Vec<PathBuf>)>, Vec<PathBuf>)> {
    let mut targets: Vec<(TrashTarget, Vec<PathBuf>)> = Vec::new();
    let mut abandoned: Vec<PathBuf> = Vec::new();
    let visible_name = cfg.platform.visible_trash_name(cfg.uid);

    for (mount_dir, members) in groups {
        let is_home_trash = cfg.home_trash.as_deref() == Some(mount_dir.as_path());
        if is_home_trash {
            push_group(&mut targets, target_for(cfg, mount_dir), members);
            continue;
        }
        if mount_dir == cfg.shared_bin {
            ensure_shared_bin(cfg)?;
            push_group(&mut targets, target_for(cfg, mount_dir), members);
            continue;
        }

        let candidate = mount_dir.join(&visible_name);
        if candidate.is_dir() {
            push_group(&mut targets, target_for(cfg, candidate), members);
            continue;
        }

        let question = format!(
            "Mount {} has no {}. Create, use (root) {}, or delete files?",
            mount_dir.display(),
            visible_name,
            cfg.shared_bin.display()
        );
        match prompt::ask_validated(prompter, &question, &["create", "root", "del"], None)?.as_str()
        {
            "create" => {
                if cfg.dry_run {
                    output::print_report(&format!("Would create {}", candidate.display()));
                } else {
                    fs::create_dir_all(&candidate)
                        .map_err(|e| CarefulRmError::io(&candidate, e))?;
                    if cfg.platform.uses_info_convention() {
                        for sub in ["expunged", "files", "info"] {
                            let subdir = candidate.join(sub);
                            fs::create_dir_all(&subdir)
                                .map_err(|e| CarefulRmError::io(&subdir, e))?;
                        }
                    }
                }
                push_group(&mut targets, target_for(cfg, candidate), members);
            }
            "root" => {
                ensure_shared_bin(cfg)?;
                push_group(&mut targets, target_for(cfg, cfg.shared_bin.clone()), members);
            }
            _ => abandoned.extend(members),
        }
    }

    Ok((targets, abandoned))
}

/// Move one absolute path into its trash target. Under the files/info
/// convention the path lands in `files/` and a two-line sidecar recording
/// the original location and deletion time is written to `info/`. Returns
/// the move exit code; non-zero is a soft failure for the caller.
pub fn recycle_one(path: &Path, target: &TrashTarget, cfg: &Config, mover: &dyn Mover) -> i32 {
    if !target.uses_info {
        return mover.move_to(&cfg.move_flags, path, &target.dir);
    }

    let code = mover.move_to(&cfg.move_flags, path, &target.dir.join("files"));
    if code == 0 {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            warn!(path = %path.display(), "recycled path has no basename; skipping sidecar");
            return code;
        };
        let info_path = target.dir.join("info").join(format!("{name}.trashinfo"));
        let stamp = Local::now().format(TRASHINFO_TIME_FORMAT);
        let record = format!("Path={}\nDeletionDate={}\n", path.display(), stamp);
        if let Err(err) = fs::write(&info_path, record) {
            // The file is already in the trash; a missing sidecar only
            // degrades restore tooling, so report and carry on.
            warn!(info = %info_path.display(), error = %err, "failed to write trashinfo sidecar");
        }
    }
    code
}

/// Recycle a batch of paths. Tries the desktop-trash bridge first when one
/// is supplied, then routes the remainder per-mount. Returns the paths the
/// user explicitly confirmed for force deletion; declined failures are
/// dropped entirely.
pub fn recycle_files(
    paths: &[PathBuf],
    cfg: &Config,
    prompter: &mut dyn Prompter,
    mover: &dyn Mover,
    desktop: Option<&dyn DesktopTrash>,
) -> Result<Vec<PathBuf>> {
    recycle_files_with(paths, cfg, prompter, mover, desktop, &|p| {
        mount::resolve_mount(p)
    })
}

/// `recycle_files` with an injectable mountpoint resolver.
pub fn recycle_files_with(
    paths: &[PathBuf],
    cfg: &Config,
    prompter: &mut dyn Prompter,
    mover: &dyn Mover,
    desktop: Option<&dyn DesktopTrash>,
    resolve: &dyn Fn(&Path) -> PathBuf,
) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = paths.iter().map(|p| absolutize(p)).collect();

    if let Some(bridge) = desktop {
        debug!("attempting desktop trash integration");
        if cfg.dry_run {
            output::print_report(&format!(
                "Moving [{}] to Trash with Finder",
                ui::inline_list(&files)
            ));
            return Ok(Vec::new());
        }
        let mut leftover = Vec::new();
        for file in &files {
            if bridge.send(file) != 0 {
                leftover.push(file.clone());
            }
        }
        if leftover.is_empty() {
            return Ok(Vec::new());
        }
        output::print_warn(&format!(
            "Desktop trash failed on:\n{}",
            ui::format_list(&leftover)
        ));
        files = leftover;
    }

    let groups = group_by_mount_with(&files, cfg, resolve);
    let (targets, mut failed) = resolve_targets(groups, cfg, prompter)?;

    for (target, members) in &targets {
        for file in members {
            if cfg.dry_run {
                output::print_report(&format!(
                    "Moving {} to {}",
                    file.display(),
                    target.dir.display()
                ));
                continue;
            }
            if recycle_one(file, target, cfg, mover) != 0 {
                failed.push(file.clone());
            }
        }
    }

    if !failed.is_empty() {
        output::print_warn(&format!("Failed to recycle:\n{}", ui::format_list(&failed)));
        if prompt::yes_no(prompter, "Attempt to fully delete with rm?", false)? {
            return Ok(failed);
        }
        return Ok(Vec::new());
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::MoveFlags;
    use crate::platform::Platform;
    use crate::prompt::ScriptedPrompter;
    use std::cell::RefCell;
    use tempfile::tempdir;

    fn test_config(home: &Path) -> Config {
        let mut cfg = Config::new(Platform::Linux, 1000, "tester", home);
        cfg.shared_bin = home.join("shared_bin");
        cfg
    }

    /// Mover that renames on the real filesystem, optionally failing on
    /// selected sources.
    struct FsMover {
        fail_on: Vec<PathBuf>,
        moved: RefCell<Vec<(PathBuf, PathBuf)>>,
    }

    impl FsMover {
        fn new() -> Self {
            Self {
                fail_on: Vec::new(),
                moved: RefCell::new(Vec::new()),
            }
        }
    }

    impl Mover for FsMover {
        fn move_to(&self, _flags: &MoveFlags, src: &Path, dest_dir: &Path) -> i32 {
            if self.fail_on.iter().any(|p| p == src) {
                return 1;
            }
            let dest = dest_dir.join(src.file_name().unwrap());
            match fs::rename(src, &dest) {
                Ok(()) => {
                    self.moved.borrow_mut().push((src.to_path_buf(), dest));
                    0
                }
                Err(_) => 1,
            }
        }
    }

    #[test]
    fn root_groups_remap_to_shared_bin_without_home_trash() {
        let td = tempdir().unwrap();
        let cfg = test_config(td.path());
        assert!(!cfg.has_home_trash);
        let files = vec![PathBuf::from("/var/data/a"), PathBuf::from("/var/data/b")];
        let groups = group_by_mount_with(&files, &cfg, &|_| PathBuf::from("/"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, cfg.shared_bin);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn root_groups_under_home_prefer_home_trash() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join(".local/share/Trash")).unwrap();
        let cfg = test_config(td.path());
        assert!(cfg.has_home_trash);
        let inside = td.path().join("docs/a.txt");
        let outside = PathBuf::from("/var/data/b.txt");
        let groups = group_by_mount_with(&[inside.clone(), outside.clone()], &cfg, &|_| {
            PathBuf::from("/")
        });
        let home_trash = cfg.home_trash.clone().unwrap();
        let find = |dir: &Path| {
            groups
                .iter()
                .find(|(m, _)| m == dir)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };
        assert_eq!(find(&home_trash), vec![inside]);
        assert_eq!(find(&cfg.shared_bin), vec![outside]);
    }

    #[test]
    fn discovered_mounts_are_reused_by_prefix() {
        let td = tempdir().unwrap();
        let cfg = test_config(td.path());
        let calls = RefCell::new(0usize);
        let files = vec![
            PathBuf::from("/mnt/disk/a"),
            PathBuf::from("/mnt/disk/deep/nested/b"),
            PathBuf::from("/mnt/disk/c"),
        ];
        let groups = group_by_mount_with(&files, &cfg, &|_| {
            *calls.borrow_mut() += 1;
            PathBuf::from("/mnt/disk")
        });
        // Longest path resolved first; the other two reuse the prefix.
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1.len(), 3);
    }

    #[test]
    fn existing_visible_trash_is_used_without_prompting() {
        let td = tempdir().unwrap();
        let cfg = test_config(td.path());
        let mnt = td.path().join("mnt");
        fs::create_dir_all(mnt.join(".Trash-1000")).unwrap();
        let mut p = ScriptedPrompter::new(Vec::<String>::new());
        let groups = vec![(mnt.clone(), vec![mnt.join("x")])];
        let (targets, abandoned) = resolve_targets(groups, &cfg, &mut p).unwrap();
        assert!(p.asked.is_empty());
        assert!(abandoned.is_empty());
        assert_eq!(targets[0].0.dir, mnt.join(".Trash-1000"));
        assert!(targets[0].0.uses_info);
    }

    #[test]
    fn create_answer_builds_trash_with_subdirs() {
        let td = tempdir().unwrap();
        let cfg = test_config(td.path());
        let mnt = td.path().join("mnt");
        fs::create_dir_all(&mnt).unwrap();
        let mut p = ScriptedPrompter::new(["create"]);
        let groups = vec![(mnt.clone(), vec![mnt.join("x")])];
        let (targets, _) = resolve_targets(groups, &cfg, &mut p).unwrap();
        let trash = mnt.join(".Trash-1000");
        assert_eq!(targets[0].0.dir, trash);
        for sub in ["expunged", "files", "info"] {
            assert!(trash.join(sub).is_dir(), "missing {sub}");
        }
    }

    #[test]
    fn root_answer_merges_into_shared_bin() {
        let td = tempdir().unwrap();
        let cfg = test_config(td.path());
        let mnt = td.path().join("mnt");
        fs::create_dir_all(&mnt).unwrap();
        let mut p = ScriptedPrompter::new(["root"]);
        let groups = vec![(mnt.clone(), vec![mnt.join("x")])];
        let (targets, _) = resolve_targets(groups, &cfg, &mut p).unwrap();
        assert_eq!(targets[0].0.dir, cfg.shared_bin);
        assert!(!targets[0].0.uses_info, "shared bin takes direct moves");
        assert!(cfg.shared_bin.is_dir(), "shared bin created silently");
    }

    #[test]
    fn del_answer_abandons_the_group() {
        let td = tempdir().unwrap();
        let cfg = test_config(td.path());
        let mnt = td.path().join("mnt");
        fs::create_dir_all(&mnt).unwrap();
        let mut p = ScriptedPrompter::new(["del"]);
        let member = mnt.join("x");
        let groups = vec![(mnt, vec![member.clone()])];
        let (targets, abandoned) = resolve_targets(groups, &cfg, &mut p).unwrap();
        assert!(targets.is_empty());
        assert_eq!(abandoned, vec![member]);
    }

    #[test]
    fn trashinfo_sidecar_has_two_line_format() {
        let td = tempdir().unwrap();
        let cfg = test_config(td.path());
        let trash = td.path().join("mnt/.Trash-1000");
        fs::create_dir_all(trash.join("files")).unwrap();
        fs::create_dir_all(trash.join("info")).unwrap();
        let victim = td.path().join("mnt/doc.txt");
        fs::create_dir_all(victim.parent().unwrap()).unwrap();
        fs::write(&victim, "bye").unwrap();

        let target = TrashTarget {
            dir: trash.clone(),
            uses_info: true,
        };
        let mover = FsMover::new();
        assert_eq!(recycle_one(&victim, &target, &cfg, &mover), 0);
        assert!(trash.join("files/doc.txt").is_file());

        let info = fs::read_to_string(trash.join("info/doc.txt.trashinfo")).unwrap();
        let lines: Vec<&str> = info.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("Path={}", victim.display()));
        let stamp = lines[1].strip_prefix("DeletionDate=").unwrap();
        assert!(
            chrono::NaiveDateTime::parse_from_str(stamp, TRASHINFO_TIME_FORMAT).is_ok(),
            "bad timestamp: {stamp}"
        );
    }

    #[test]
    fn shared_bin_moves_are_direct() {
        let td = tempdir().unwrap();
        let cfg = test_config(td.path());
        fs::create_dir_all(&cfg.shared_bin).unwrap();
        let victim = td.path().join("junk.bin");
        fs::write(&victim, "x").unwrap();
        let target = TrashTarget {
            dir: cfg.shared_bin.clone(),
            uses_info: false,
        };
        let mover = FsMover::new();
        assert_eq!(recycle_one(&victim, &target, &cfg, &mover), 0);
        assert!(cfg.shared_bin.join("junk.bin").is_file());
        assert!(!cfg.shared_bin.join("info").exists());
    }

    #[test]
    fn declined_force_delete_drops_failures() {
        let td = tempdir().unwrap();
        let mut cfg = test_config(td.path());
        cfg.has_home_trash = false;
        let victim = td.path().join("stuck.txt");
        fs::write(&victim, "x").unwrap();

        let mover = FsMover {
            fail_on: vec![absolutize(&victim)],
            moved: RefCell::new(Vec::new()),
        };
        // No prompt for the shared bin itself; only the final fallback asks.
        let mut p = ScriptedPrompter::new(["n"]);
        let survivors = recycle_files_with(&[victim.clone()], &cfg, &mut p, &mover, None, &|_| {
            PathBuf::from("/")
        })
        .unwrap();
        assert!(survivors.is_empty(), "declined failures must be dropped");
        assert!(victim.exists(), "never deleted without explicit consent");
        assert_eq!(p.asked.len(), 1);
        assert!(p.asked[0].contains("fully delete"));
    }

    #[test]
    fn confirmed_force_delete_returns_failures() {
        let td = tempdir().unwrap();
        let mut cfg = test_config(td.path());
        cfg.has_home_trash = false;
        let victim = td.path().join("stuck.txt");
        fs::write(&victim, "x").unwrap();

        let mover = FsMover {
            fail_on: vec![absolutize(&victim)],
            moved: RefCell::new(Vec::new()),
        };
        let mut p = ScriptedPrompter::new(["y"]);
        let survivors = recycle_files_with(&[victim.clone()], &cfg, &mut p, &mover, None, &|_| {
            PathBuf::from("/")
        })
        .unwrap();
        assert_eq!(survivors, vec![absolutize(&victim)]);
    }
}
