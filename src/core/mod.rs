// Public modules
pub mod defaults;
pub mod error;
pub mod rename;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use rename::{
    ContentRule, FileFailure, FilterSet, RenameRule, RuleTable, WalkEvent, WalkObserver,
    WalkStats, Walker,
};
