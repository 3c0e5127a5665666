//! Category scanner.
//!
//! Resolves every category's patterns under a scan root and builds an
//! [`IndexReport`]. The pass is linear and synchronous.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::category::{CategoryDef, CategoryStore, ComponentPattern};
use crate::error::{IndexError, Result};
use crate::report::{CategoryReport, EntryKind, IndexEntry, IndexReport};

/// What to do when a filesystem error hits a category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the whole scan on the first error
    #[default]
    Abort,
    /// Mark the category as skipped and continue
    Skip,
}

struct CompiledCategory {
    name: String,
    patterns: Vec<ComponentPattern>,
}

impl CompiledCategory {
    fn compile(def: &CategoryDef) -> Result<Self> {
        let patterns = def
            .patterns
            .iter()
            .map(|p| ComponentPattern::new(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: def.name.clone(),
            patterns,
        })
    }
}

pub struct Indexer {
    root: PathBuf,
    categories: Vec<CompiledCategory>,
    policy: ErrorPolicy,
}

impl Indexer {
    /// Compile the store's patterns against `root`
    ///
    /// Fails with `RootNotFound` when `root` is not an existing directory and
    /// with `InvalidPattern` before touching the filesystem otherwise.
    pub fn new(store: &CategoryStore, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(IndexError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        let root = root
            .canonicalize()
            .map_err(|e| IndexError::io(root, e))?;

        let categories = store
            .all()
            .iter()
            .map(CompiledCategory::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            root,
            categories,
            policy: ErrorPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Scan every category in table order
    pub fn scan(&self) -> Result<IndexReport> {
        let mut report = IndexReport::default();

        for category in &self.categories {
            let result = self.scan_category(category);
            let category_report = self.settle(&category.name, result)?;
            debug!(
                category = %category_report.name,
                entries = category_report.entries.len(),
                files = category_report.file_total(),
                "scanned category"
            );
            report.categories.push(category_report);
        }

        Ok(report)
    }

    /// Apply the error policy to one category's outcome
    fn settle(&self, name: &str, result: Result<Vec<IndexEntry>>) -> Result<CategoryReport> {
        match (result, self.policy) {
            (Ok(entries), _) => Ok(CategoryReport {
                name: name.to_string(),
                entries,
                skipped: None,
            }),
            (Err(e), ErrorPolicy::Abort) => Err(e),
            (Err(e), ErrorPolicy::Skip) => {
                warn!(category = %name, error = %e, "skipping category");
                Ok(CategoryReport {
                    name: name.to_string(),
                    entries: Vec::new(),
                    skipped: Some(e.to_string()),
                })
            }
        }
    }

    fn scan_category(&self, category: &CompiledCategory) -> Result<Vec<IndexEntry>> {
        // Keyed by display path: dedup + lexicographic order
        let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();
        for pattern in &category.patterns {
            for m in pattern.resolve(&self.root)? {
                found.entry(m.display).or_insert(m.path);
            }
        }

        let mut entries = Vec::with_capacity(found.len());
        for (display, path) in found {
            let kind = if path.is_dir() {
                EntryKind::Directory {
                    files: count_files(&path)?,
                }
            } else if path.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };
            entries.push(IndexEntry {
                path: display,
                kind,
            });
        }
        Ok(entries)
    }
}

/// Count files under `dir`, recursively
///
/// Directories are neither counted nor followed when reached through a
/// symlink. Any other entry, including a broken symlink, counts as a file.
pub fn count_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|e| IndexError::Walk {
            path: dir.to_path_buf(),
            source: e,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.path_is_symlink() && entry.path().is_dir() {
            continue;
        }
        count += 1;
    }
    Ok(count)
}
