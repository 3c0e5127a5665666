use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::{CategoryConfigEntry, CategoryStore};
use crate::error::{IndexError, Result};
use crate::indexer::ErrorPolicy;

/// Config file looked up in the scan root
pub const LOCAL_CONFIG_FILE: &str = "component-index.toml";

const USER_CONFIG_DIR: &str = "component-index";
const USER_CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# component-index configuration file

[scan]
# What to do when a filesystem error hits a category
# "abort": stop the whole scan (default)
# "skip":  report the category as skipped and continue
on_error = "abort"

# Drop the builtin category table and use only [[category]] entries below
replace_builtin = false

# Override a builtin category (patterns are replaced, position is kept)
# [[category]]
# name = "Frontend"
# patterns = ["web/", "web/src/"]

# Add a new category (appended after the builtin ones)
# [[category]]
# name = "Proto"
# patterns = ["proto/**/*.proto"]
"#;

/// Scan configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryConfigEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub on_error: ErrorPolicy,

    #[serde(default)]
    pub replace_builtin: bool,
}

impl Config {
    /// Load config from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| IndexError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// First existing config: `<root>/component-index.toml`, then the user config
    pub fn discover(root: &Path) -> Option<PathBuf> {
        let local = root.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::user_path().filter(|p| p.is_file())
    }

    /// `<config dir>/component-index/config.toml`
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
    }

    /// Write the default template unless the file already exists
    pub fn init(path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| IndexError::io(parent, e))?;
        }

        if !path.exists() {
            fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| IndexError::io(path, e))?;
        }

        Ok(path.to_path_buf())
    }

    /// Builtin table (unless replaced) with configured categories applied
    pub fn category_store(&self) -> CategoryStore {
        let base = if self.scan.replace_builtin {
            CategoryStore::empty()
        } else {
            CategoryStore::builtin()
        };
        base.with_entries(&self.categories)
    }
}
