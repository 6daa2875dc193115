//! Depth-first tree walk that rewrites file contents and renames matching
//! files and directories.
//!
//! Within one directory, files are rewritten and renamed before any
//! subdirectory is entered. A subdirectory is renamed only after its whole
//! subtree has been processed, so every path used during recursion stays
//! valid until the directory's own rename, which is the last operation on it.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::filter::FilterSet;
use super::rewrite::rewrite;
use super::rules::RuleTable;
use crate::error::{Error, Result};
use crate::utils::io as fs_io;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub files_renamed: usize,
    pub dirs_renamed: usize,
    pub replacements: usize,
}

/// Why a single file could not be rewritten. The walk always continues.
#[derive(Debug)]
pub enum FileFailure {
    /// The path turned out to be a directory. Not worth a warning.
    IsDirectory,
    /// Contents are not valid UTF-8.
    NotText,
    Io(io::Error),
}

impl FileFailure {
    pub fn is_silent(&self) -> bool {
        matches!(self, FileFailure::IsDirectory)
    }
}

impl From<io::Error> for FileFailure {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::IsADirectory => FileFailure::IsDirectory,
            io::ErrorKind::InvalidData => FileFailure::NotText,
            _ => FileFailure::Io(err),
        }
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFailure::IsDirectory => write!(f, "is a directory"),
            FileFailure::NotText => write!(f, "not valid UTF-8 text"),
            FileFailure::Io(err) => write!(f, "{}", err),
        }
    }
}

/// Progress reported while walking. Rename paths are as seen at the moment of
/// the rename, so ancestors still carry their old names.
#[derive(Debug)]
pub enum WalkEvent<'a> {
    FileScanned {
        path: &'a Path,
    },
    FileModified {
        path: &'a Path,
        replacements: usize,
    },
    FileRenamed {
        from: &'a Path,
        to: &'a Path,
    },
    DirRenamed {
        from: &'a Path,
        to: &'a Path,
    },
    FileSkipped {
        path: &'a Path,
        failure: &'a FileFailure,
    },
}

pub trait WalkObserver {
    fn on_event(&mut self, event: &WalkEvent<'_>);
}

impl<F> WalkObserver for F
where
    F: FnMut(&WalkEvent<'_>),
{
    fn on_event(&mut self, event: &WalkEvent<'_>) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
    Other,
}

/// One pass over a tree. Owns the run's [`WalkStats`] and hands them back
/// from [`Walker::walk`].
pub struct Walker<'a> {
    rules: &'a RuleTable,
    filter: &'a FilterSet,
    observer: &'a mut dyn WalkObserver,
    dry_run: bool,
    excluded: Vec<PathBuf>,
    stats: WalkStats,
}

impl<'a> Walker<'a> {
    pub fn new(
        rules: &'a RuleTable,
        filter: &'a FilterSet,
        observer: &'a mut dyn WalkObserver,
    ) -> Self {
        Self {
            rules,
            filter,
            observer,
            dry_run: false,
            excluded: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    /// In dry-run mode writes and renames are reported but never performed.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Leave the file at `path` untouched. Matched by resolved path, so files
    /// with the same name elsewhere in the tree are still processed.
    pub fn exclude_file(mut self, path: &Path) -> Self {
        self.excluded.push(resolve(path));
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded
            .iter()
            .any(|excluded| {
                excluded.file_name() == path.file_name() && *excluded == resolve(path)
            })
    }

    pub fn walk(mut self, root: &Path) -> Result<WalkStats> {
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.filter.should_skip(&root_name) {
            log_status!("walk", "Root {} is excluded, nothing to do", root.display());
            return Ok(self.stats);
        }

        log_status!("walk", "Scanning {}", root.display());
        self.walk_dir(root)?;
        Ok(self.stats)
    }

    fn walk_dir(&mut self, dir: &Path) -> Result<()> {
        let mut subdirs = Vec::new();

        for entry in fs_io::list_dir(dir)? {
            let name = entry.file_name().to_string_lossy().to_string();
            if self.filter.should_skip(&name) {
                continue;
            }

            let path = entry.path();
            match entry_kind(&entry, &path)? {
                EntryKind::File if self.is_excluded(&path) => {}
                EntryKind::File => self.process_file(&path, &name)?,
                EntryKind::Dir => subdirs.push((path, name)),
                EntryKind::Other => {}
            }
        }

        for (path, name) in subdirs {
            self.walk_dir(&path)?;

            if let Some(to_name) = self.rules.resolve_dir(&name) {
                let target = self.rename(&path, to_name)?;
                self.stats.dirs_renamed += 1;
                self.observer.on_event(&WalkEvent::DirRenamed {
                    from: &path,
                    to: &target,
                });
            }
        }

        Ok(())
    }

    fn process_file(&mut self, path: &Path, name: &str) -> Result<()> {
        self.stats.files_scanned += 1;
        self.observer.on_event(&WalkEvent::FileScanned { path });

        if let Err(failure) = self.rewrite_file(path) {
            self.observer
                .on_event(&WalkEvent::FileSkipped { path, failure: &failure });
        }

        if let Some(to_name) = self.rules.resolve_file(name) {
            let target = self.rename(path, to_name)?;
            self.stats.files_renamed += 1;
            self.observer.on_event(&WalkEvent::FileRenamed {
                from: path,
                to: &target,
            });
        }

        Ok(())
    }

    fn rewrite_file(&mut self, path: &Path) -> std::result::Result<(), FileFailure> {
        let content = fs::read_to_string(path)?;

        let result = rewrite(&content, &self.rules.content);
        let Some(text) = result.text else {
            return Ok(());
        };

        self.stats.files_modified += 1;
        self.stats.replacements += result.replacements;

        if !self.dry_run {
            fs::write(path, text)?;
        }

        self.observer.on_event(&WalkEvent::FileModified {
            path,
            replacements: result.replacements,
        });
        Ok(())
    }

    /// Rename `path` to a sibling named `to_name`. The collision check runs in
    /// dry-run mode too.
    fn rename(&self, path: &Path, to_name: &str) -> Result<PathBuf> {
        let target = path.with_file_name(to_name);

        if self.dry_run {
            fs_io::ensure_rename_target_free(path, &target)?;
        } else {
            fs_io::rename_path(path, &target)?;
        }

        Ok(target)
    }
}

fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Symlinks are `Other`: the walk never follows them.
fn entry_kind(entry: &fs::DirEntry, path: &Path) -> Result<EntryKind> {
    let file_type = entry
        .file_type()
        .map_err(|e| Error::walk_list_failed(path.display().to_string(), e.to_string()))?;

    Ok(if file_type.is_file() {
        EntryKind::File
    } else if file_type.is_dir() {
        EntryKind::Dir
    } else {
        EntryKind::Other
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(root: &Path, relative: &str) -> String {
        fs::read_to_string(root.join(relative)).unwrap()
    }

    fn rel(root: &Path, path: &Path) -> String {
        path.strip_prefix(root)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Every file and directory under `root`, with file bytes.
    fn snapshot(root: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
        let mut out = BTreeMap::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    out.insert(rel(root, &path), None);
                    stack.push(path);
                } else {
                    out.insert(rel(root, &path), Some(fs::read(&path).unwrap()));
                }
            }
        }
        out
    }

    fn run(root: &Path, dry_run: bool) -> Result<(WalkStats, Vec<String>)> {
        let rules = RuleTable::builtin();
        let filter = FilterSet::builtin();
        let mut events = Vec::new();
        let mut record = |event: &WalkEvent<'_>| {
            events.push(match event {
                WalkEvent::FileScanned { path } => format!("scan {}", rel(root, path)),
                WalkEvent::FileModified { path, replacements } => {
                    format!("modify {} {}", rel(root, path), replacements)
                }
                WalkEvent::FileRenamed { from, to } => {
                    format!("rename-file {} {}", rel(root, from), rel(root, to))
                }
                WalkEvent::DirRenamed { from, to } => {
                    format!("rename-dir {} {}", rel(root, from), rel(root, to))
                }
                WalkEvent::FileSkipped { path, failure } => {
                    format!("skip {} {}", rel(root, path), failure)
                }
            })
        };

        let stats = Walker::new(&rules, &filter, &mut record)
            .dry_run(dry_run)
            .walk(root)?;
        Ok((stats, events))
    }

    #[test]
    fn rewrites_package_scope() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/index.ts", br#"import core from "@openclaw/core";"#);

        let (stats, events) = run(dir.path(), false).unwrap();

        assert_eq!(
            read(dir.path(), "src/index.ts"),
            r#"import core from "@zoidbergbot/core";"#
        );
        assert_eq!(stats.files_scanned, 1);
        assert_eq!(stats.files_modified, 1);
        assert_eq!(stats.replacements, 1);
        assert!(events.contains(&"modify src/index.ts 1".to_string()));
    }

    #[test]
    fn renames_file_after_rewriting_it() {
        let dir = tempdir().unwrap();
        write(dir.path(), "openclaw.mjs", b"load('openclaw.json')\n");

        let (stats, events) = run(dir.path(), false).unwrap();

        assert!(!dir.path().join("openclaw.mjs").exists());
        assert_eq!(read(dir.path(), "zoidbergbot.mjs"), "load('zoidbergbot.json')\n");
        assert_eq!(stats.files_renamed, 1);
        assert_eq!(
            events,
            vec![
                "scan openclaw.mjs".to_string(),
                "modify openclaw.mjs 1".to_string(),
                "rename-file openclaw.mjs zoidbergbot.mjs".to_string(),
            ]
        );
    }

    #[test]
    fn directory_renamed_after_its_subtree() {
        let dir = tempdir().unwrap();
        write(dir.path(), "OpenClawKit/Package.swift", b"import OpenClawProtocol\n");
        write(
            dir.path(),
            "OpenClawKit/Sources/OpenClawProtocol/openclaw.mjs",
            b"// nothing to rewrite\n",
        );

        let (stats, events) = run(dir.path(), false).unwrap();

        assert_eq!(
            events,
            vec![
                "scan OpenClawKit/Package.swift".to_string(),
                "modify OpenClawKit/Package.swift 1".to_string(),
                "scan OpenClawKit/Sources/OpenClawProtocol/openclaw.mjs".to_string(),
                "rename-file OpenClawKit/Sources/OpenClawProtocol/openclaw.mjs \
                 OpenClawKit/Sources/OpenClawProtocol/zoidbergbot.mjs"
                    .to_string(),
                "rename-dir OpenClawKit/Sources/OpenClawProtocol \
                 OpenClawKit/Sources/ZoidbergBotProtocol"
                    .to_string(),
                "rename-dir OpenClawKit ZoidbergBotKit".to_string(),
            ]
        );

        let kit_rename = events
            .iter()
            .position(|e| e == "rename-dir OpenClawKit ZoidbergBotKit")
            .unwrap();
        for (index, event) in events.iter().enumerate() {
            if event.contains("OpenClawKit/") {
                assert!(index < kit_rename, "{} happened after the kit rename", event);
            }
        }

        assert_eq!(stats.dirs_renamed, 2);
        assert_eq!(stats.files_renamed, 1);
        assert_eq!(
            read(dir.path(), "ZoidbergBotKit/Package.swift"),
            "import ZoidbergBotProtocol\n"
        );
        assert!(dir
            .path()
            .join("ZoidbergBotKit/Sources/ZoidbergBotProtocol/zoidbergbot.mjs")
            .is_file());
        assert!(!dir.path().join("OpenClawKit").exists());
    }

    #[test]
    fn files_processed_before_subdirectories() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a/inner.txt", b"openclaw.ai\n");
        write(dir.path(), "z.txt", b"openclaw.ai\n");

        let (_, events) = run(dir.path(), true).unwrap();

        let top = events.iter().position(|e| e == "scan z.txt").unwrap();
        let nested = events.iter().position(|e| e == "scan a/inner.txt").unwrap();
        assert!(top < nested);
    }

    #[test]
    fn skipped_directory_is_never_entered() {
        let dir = tempdir().unwrap();
        let original = b"module.exports = require('@openclaw/core');\n";
        write(dir.path(), "node_modules/@openclaw/core/index.js", original);
        write(dir.path(), "node_modules/OpenClaw/openclaw.mjs", original);

        let (stats, events) = run(dir.path(), false).unwrap();

        assert_eq!(stats, WalkStats::default());
        assert!(events.is_empty());
        assert_eq!(
            fs::read(dir.path().join("node_modules/@openclaw/core/index.js")).unwrap(),
            original
        );
        assert!(dir.path().join("node_modules/OpenClaw/openclaw.mjs").exists());
    }

    #[test]
    fn binary_extension_left_untouched() {
        let dir = tempdir().unwrap();
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a];
        bytes.extend_from_slice(b"openclaw");
        bytes.push(0xff);
        write(dir.path(), "assets/logo.png", &bytes);

        let (stats, _) = run(dir.path(), false).unwrap();

        assert_eq!(stats.files_scanned, 0);
        assert_eq!(fs::read(dir.path().join("assets/logo.png")).unwrap(), bytes);
    }

    #[test]
    fn undecodable_file_is_skipped_and_walk_continues() {
        let dir = tempdir().unwrap();
        write(dir.path(), "blob.dat", &[0xff, 0xfe, b'o', b'p', b'e', b'n']);
        write(dir.path(), "notes.md", b"npx openclaw\n");

        let (stats, events) = run(dir.path(), false).unwrap();

        assert_eq!(stats.files_scanned, 2);
        assert_eq!(stats.files_modified, 1);
        assert!(events.contains(&"skip blob.dat not valid UTF-8 text".to_string()));
        assert_eq!(read(dir.path(), "notes.md"), "npx zoidbergbot\n");
    }

    #[test]
    fn dry_run_matches_live_counts_without_mutation() {
        let live = tempdir().unwrap();
        let dry = tempdir().unwrap();
        for root in [live.path(), dry.path()] {
            write(root, "package.json", br#"{"name": "@openclaw/cli", "bin": "openclaw.mjs"}"#);
            write(root, "openclaw.mjs", b"#!/usr/bin/env node\nimport './dist/entry.js'\n");
            write(root, "apps/OpenClaw/App.swift", b"let cfg = OpenClawConfig()\n");
            write(root, "deploy/openclaw-auth-monitor.service", b"ExecStart=openclaw-cli\n");
            write(root, "docs/logo.png", b"openclaw");
            write(root, ".git/config", b"url = github.com/openclaw/openclaw\n");
        }

        let before = snapshot(dry.path());
        let (dry_stats, _) = run(dry.path(), true).unwrap();
        let (live_stats, _) = run(live.path(), false).unwrap();

        assert_eq!(snapshot(dry.path()), before);
        assert_eq!(dry_stats, live_stats);
        assert_eq!(live_stats.files_scanned, 4);
        assert_eq!(live_stats.files_modified, 3);
        assert_eq!(live_stats.files_renamed, 2);
        assert_eq!(live_stats.dirs_renamed, 1);
        assert_ne!(snapshot(live.path()), before);
    }

    #[test]
    fn rename_collision_aborts_the_walk() {
        let dir = tempdir().unwrap();
        write(dir.path(), "OpenClaw/a.txt", b"a");
        write(dir.path(), "ZoidbergBot/b.txt", b"b");

        for dry_run in [true, false] {
            let err = run(dir.path(), dry_run).unwrap_err();
            assert_eq!(err.code, ErrorCode::RenameCollision);
        }
        assert!(dir.path().join("OpenClaw/a.txt").exists());
        assert!(dir.path().join("ZoidbergBot/b.txt").exists());
    }

    #[test]
    fn excluded_root_is_not_walked() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("node_modules");
        write(&root, "index.js", b"openclaw.ai");

        let (stats, events) = run(&root, false).unwrap();

        assert_eq!(stats, WalkStats::default());
        assert!(events.is_empty());
    }

    #[test]
    fn nested_file_named_like_config_is_rewritten() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "packages/app/rebrand.json",
            br#"{"name": "@openclaw/app"}"#,
        );

        let (stats, _) = run(dir.path(), false).unwrap();

        assert_eq!(stats.files_scanned, 1);
        assert_eq!(stats.files_modified, 1);
        assert_eq!(
            read(dir.path(), "packages/app/rebrand.json"),
            r#"{"name": "@zoidbergbot/app"}"#
        );
    }

    #[test]
    fn excluded_file_is_matched_by_path() {
        let dir = tempdir().unwrap();
        let body = br#"{"name": "@openclaw/app"}"#;
        write(dir.path(), "rebrand.json", body);
        write(dir.path(), "packages/app/rebrand.json", body);

        let rules = RuleTable::builtin();
        let filter = FilterSet::builtin();
        let mut scanned = Vec::new();
        let mut record = |event: &WalkEvent<'_>| {
            if let WalkEvent::FileScanned { path } = event {
                scanned.push(rel(dir.path(), path));
            }
        };

        let stats = Walker::new(&rules, &filter, &mut record)
            .exclude_file(&dir.path().join("rebrand.json"))
            .walk(dir.path())
            .unwrap();

        assert_eq!(stats.files_scanned, 1);
        assert_eq!(scanned, vec!["packages/app/rebrand.json".to_string()]);
        assert_eq!(
            read(dir.path(), "rebrand.json"),
            r#"{"name": "@openclaw/app"}"#
        );
        assert_eq!(
            read(dir.path(), "packages/app/rebrand.json"),
            r#"{"name": "@zoidbergbot/app"}"#
        );
    }

    #[test]
    fn unreadable_root_is_fatal() {
        let dir = tempdir().unwrap();
        let err = run(&dir.path().join("missing"), false).unwrap_err();
        assert_eq!(err.code, ErrorCode::WalkListFailed);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        write(outside.path(), "target.txt", b"openclaw.ai");
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("target.txt"),
            dir.path().join("openclaw.mjs"),
        )
        .unwrap();

        let (stats, _) = run(dir.path(), false).unwrap();

        assert_eq!(stats, WalkStats::default());
        assert_eq!(read(outside.path(), "target.txt"), "openclaw.ai");
    }

    #[test]
    fn failure_tags() {
        let dir_err = io::Error::new(io::ErrorKind::IsADirectory, "dir");
        assert!(FileFailure::from(dir_err).is_silent());

        let data_err = io::Error::new(io::ErrorKind::InvalidData, "utf8");
        assert!(matches!(FileFailure::from(data_err), FileFailure::NotText));

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let failure = FileFailure::from(denied);
        assert!(!failure.is_silent());
        assert_eq!(failure.to_string(), "denied");
    }
}
