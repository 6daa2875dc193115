//! Name-level exclusion: skip-listed directories and files, and binary
//! extensions. Every candidate basename passes through [`FilterSet::should_skip`]
//! before it is read, written, renamed, or descended into.

use std::collections::HashSet;

/// Dependency caches, VCS metadata and build output.
pub(crate) const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    ".build",
    ".next",
    ".turbo",
    ".pnpm-store",
    "coverage",
    ".cursor",
];

/// Lockfiles and the tool's own files.
pub(crate) const SKIP_FILES: &[&str] = &[
    "pnpm-lock.yaml",
    "package-lock.json",
    "yarn.lock",
    "bun.lockb",
    ".DS_Store",
    "rebrand.ts",
];

pub(crate) const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "ico", "icns", "woff", "woff2", "ttf", "otf", "eot",
    "mp3", "mp4", "wav", "ogg", "webm", "zip", "tar", "gz", "dmg", "exe", "app", "dylib", "so",
    "dll", "pdf",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    skip_dir_names: HashSet<String>,
    skip_file_names: HashSet<String>,
    skip_extensions: HashSet<String>,
}

impl FilterSet {
    /// Build a filter set. Extensions are normalized to lowercase without a
    /// leading dot, so `".PNG"` and `"png"` are equivalent.
    pub fn new<D, F, E>(dirs: D, files: F, extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            skip_dir_names: dirs.into_iter().map(Into::into).collect(),
            skip_file_names: files.into_iter().map(Into::into).collect(),
            skip_extensions: extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            SKIP_DIRS.iter().copied(),
            SKIP_FILES.iter().copied(),
            BINARY_EXTENSIONS.iter().copied(),
        )
    }

    /// True when `name` is a skip-listed dir/file name or carries a binary
    /// extension. The same check serves files and directories.
    pub fn should_skip(&self, name: &str) -> bool {
        if self.skip_dir_names.contains(name) || self.skip_file_names.contains(name) {
            return true;
        }

        let ext = extension_of(name).to_ascii_lowercase();
        !ext.is_empty() && self.skip_extensions.contains(&ext)
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Substring after the last `.`, or empty when the name has no dot.
///
/// Unlike `Path::extension`, a leading-dot name such as `.gitignore` yields
/// `gitignore`.
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}
