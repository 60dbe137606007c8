//! Configuration loading from actiongen.toml.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ActiongenError, ActiongenResult, IoResultExt};
use crate::source::DeclarationStyle;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "actiongen.toml";
/// Root enum when none is configured.
pub const DEFAULT_ROOT: &str = "Action";
/// Source file read when none is given.
pub const DEFAULT_INPUT: &str = "action.rs";
/// Output file written when none is given.
pub const DEFAULT_OUTPUT: &str = "shortcut-actions.json";
/// JSON indent width when none is configured.
pub const DEFAULT_INDENT: usize = 2;

/// Widest accepted JSON indent.
pub const MAX_INDENT: usize = 16;

/// Main configuration structure for actiongen.toml.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ActiongenConfig {
    /// Source file to scan.
    pub input: Option<PathBuf>,
    /// JSON file (or directory, for several roots) to write.
    pub output: Option<PathBuf>,
    /// Single root enum.
    pub root: Option<String>,
    /// Several root enums; combined with `root`.
    pub roots: Option<Vec<String>>,
    /// Only count `pub enum` declarations.
    pub pub_only: Option<bool>,
    /// JSON indent width.
    pub indent: Option<usize>,
}

impl ActiongenConfig {
    /// Configured roots, `root` first, duplicates dropped.
    pub fn root_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let all = self.root.iter().chain(self.roots.iter().flatten());
        for name in all {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Declaration style implied by `pub_only`.
    pub fn declaration_style(&self) -> DeclarationStyle {
        if self.pub_only.unwrap_or(false) {
            DeclarationStyle::Public
        } else {
            DeclarationStyle::Any
        }
    }

    fn validate(&self, path: &Path) -> ActiongenResult<()> {
        if let Some(indent) = self.indent {
            check_indent(indent).map_err(|message| ActiongenError::config(path, message))?;
        }
        if self.root_names().iter().any(|r| r.trim().is_empty()) {
            return Err(ActiongenError::config(path, "root names must not be empty"));
        }
        Ok(())
    }
}

/// Checks a JSON indent width against [`MAX_INDENT`].
pub fn check_indent(indent: usize) -> Result<usize, String> {
    if indent > MAX_INDENT {
        return Err(format!(
            "indent must be at most {}, got {}",
            MAX_INDENT, indent
        ));
    }
    Ok(indent)
}

/// Loads `path` as an actiongen config file.
pub fn load_config_file(path: &Path) -> ActiongenResult<ActiongenConfig> {
    let content = fs::read_to_string(path).with_path(path)?;
    let cfg: ActiongenConfig =
        toml::from_str(&content).map_err(|e| ActiongenError::config(path, e.to_string()))?;
    cfg.validate(path)?;
    Ok(cfg)
}

/// Loads configuration from actiongen.toml in `dir` if it exists.
pub fn load_config(dir: &Path) -> ActiongenResult<Option<ActiongenConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}
