use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::rename::{rules, ContentRule, FilterSet, RenameRule, RuleTable};
use crate::utils::io;

/// Config file looked up in the walk root.
pub const CONFIG_FILE_NAME: &str = "rebrand.json";

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "REBRAND_CONFIG";

/// Root configuration structure for rebrand.json.
///
/// Every section is optional. A present section replaces the built-in list
/// for that section; it is not merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebrandConfig {
    #[serde(default = "rules::builtin_content_rules")]
    pub content: Vec<ContentRule>,

    #[serde(default = "rules::builtin_file_renames")]
    pub files: Vec<RenameRule>,

    #[serde(default = "rules::builtin_dir_renames")]
    pub dirs: Vec<RenameRule>,

    #[serde(default)]
    pub skip: SkipConfig,
}

impl Default for RebrandConfig {
    fn default() -> Self {
        Self {
            content: rules::builtin_content_rules(),
            files: rules::builtin_file_renames(),
            dirs: rules::builtin_dir_renames(),
            skip: SkipConfig::default(),
        }
    }
}

/// Names and extensions excluded from all processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipConfig {
    #[serde(default = "default_skip_dirs")]
    pub dirs: Vec<String>,

    #[serde(default = "default_skip_files")]
    pub files: Vec<String>,

    #[serde(default = "default_skip_extensions")]
    pub extensions: Vec<String>,
}

impl Default for SkipConfig {
    fn default() -> Self {
        Self {
            dirs: default_skip_dirs(),
            files: default_skip_files(),
            extensions: default_skip_extensions(),
        }
    }
}

fn default_skip_dirs() -> Vec<String> {
    to_strings(crate::rename::filter::SKIP_DIRS)
}

fn default_skip_files() -> Vec<String> {
    to_strings(crate::rename::filter::SKIP_FILES)
}

fn default_skip_extensions() -> Vec<String> {
    to_strings(crate::rename::filter::BINARY_EXTENSIONS)
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Config plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: RebrandConfig,
    /// `None` when the built-in tables are in use.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    pub fn rule_table(&self) -> RuleTable {
        RuleTable {
            content: self.config.content.clone(),
            files: self.config.files.clone(),
            dirs: self.config.dirs.clone(),
        }
    }

    /// Filter set from the skip config. The loaded config file is not part of
    /// it: other files sharing its name are ordinary files. The walker excludes
    /// the loaded file by path instead (see [`crate::rename::Walker::exclude_file`]).
    pub fn filter_set(&self) -> FilterSet {
        let skip = &self.config.skip;
        FilterSet::new(
            skip.dirs.iter().cloned(),
            skip.files.iter().cloned(),
            skip.extensions.iter(),
        )
    }
}

// =============================================================================
// Loading functions
// =============================================================================

/// Resolve the config path: `$REBRAND_CONFIG` (tilde-expanded) if set,
/// otherwise `<root>/rebrand.json`.
pub fn config_path(root: &Path) -> PathBuf {
    match env::var(CONFIG_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => {
            let expanded = shellexpand::tilde(value.trim());
            let path = PathBuf::from(expanded.as_ref());
            if path.is_absolute() {
                path
            } else {
                root.join(path)
            }
        }
        _ => root.join(CONFIG_FILE_NAME),
    }
}

/// Load config for a run rooted at `root`. A missing file yields the built-in
/// tables; an unreadable or malformed one is an error.
pub fn load_config(root: &Path) -> Result<LoadedConfig> {
    load_config_from(&config_path(root))
}

pub fn load_config_from(path: &Path) -> Result<LoadedConfig> {
    if !path.exists() {
        return Ok(LoadedConfig {
            config: RebrandConfig::default(),
            source: None,
        });
    }

    let content = io::read_file(path, &format!("read {}", path.display()))?;
    let config = parse_config(&content, path)?;

    Ok(LoadedConfig {
        config,
        source: Some(path.to_path_buf()),
    })
}

fn parse_config(content: &str, path: &Path) -> Result<RebrandConfig> {
    let config: RebrandConfig = serde_json::from_str(content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    validate_rules("content", config.content.iter().map(|r| r.from.as_str()))?;
    validate_rules("files", config.files.iter().map(|r| r.from.as_str()))?;
    validate_rules("dirs", config.dirs.iter().map(|r| r.from.as_str()))?;

    for (key, table) in [("files", &config.files), ("dirs", &config.dirs)] {
        if let Some(rule) = table.iter().find(|r| !is_plain_basename(&r.to)) {
            return Err(Error::config_invalid_value(
                key,
                Some(rule.to.clone()),
                "Rename target must be a plain file name",
            ));
        }
    }

    Ok(config)
}

fn validate_rules<'a>(key: &str, froms: impl Iterator<Item = &'a str>) -> Result<()> {
    for (index, from) in froms.enumerate() {
        if from.is_empty() {
            return Err(Error::config_invalid_value(
                format!("{}[{}].from", key, index),
                None,
                "Pattern must not be empty",
            ));
        }
    }
    Ok(())
}

fn is_plain_basename(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
