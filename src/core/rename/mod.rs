//! Identity rename across a source tree.
//!
//! Walks every file under a root, applies an ordered table of literal content
//! substitutions, and renames files and directories whose basenames match the
//! exact-name rename tables. Directories are renamed only after everything
//! inside them has been processed.

pub mod filter;
pub mod rewrite;
pub mod rules;
pub mod walker;

pub use filter::FilterSet;
pub use rewrite::Rewrite;
pub use rules::{resolve_rename, ContentRule, RenameRule, RuleTable};
pub use walker::{FileFailure, WalkEvent, WalkObserver, WalkStats, Walker};
