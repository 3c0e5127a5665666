//! Index report model and renderers.

use std::io::{self, Write};

use serde::Serialize;

use crate::error::Result;

/// Header printed once before the first category
pub const REPORT_HEADER: &str = "=== Platform Component Index ===";

/// Line printed for a category without any resolved path
pub const NOT_FOUND_LINE: &str = "  No components found";

/// Full result of one scan, categories in table order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    pub categories: Vec<CategoryReport>,
}

/// Result for a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub name: String,
    /// Deduplicated, sorted by `path`
    pub entries: Vec<IndexEntry>,
    /// Set when the category failed and the scan kept going
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

/// A resolved path and what was found there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub path: String,
    #[serde(flatten)]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryKind {
    Directory { files: usize },
    File,
    /// Exists but is neither a directory nor a regular file (fifo, socket, ...)
    Other,
}

impl CategoryReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total files across directory entries plus plain file entries
    pub fn file_total(&self) -> usize {
        self.entries
            .iter()
            .map(|e| match e.kind {
                EntryKind::Directory { files } => files,
                EntryKind::File => 1,
                EntryKind::Other => 0,
            })
            .sum()
    }
}

impl IndexReport {
    pub fn get(&self, name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Categories that were skipped under the keep-going policy
    pub fn skipped(&self) -> impl Iterator<Item = &CategoryReport> {
        self.categories.iter().filter(|c| c.skipped.is_some())
    }

    /// Write the plain text report
    pub fn render_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", REPORT_HEADER)?;
        for category in &self.categories {
            writeln!(out)?;
            writeln!(out, "{}:", category.name)?;

            if let Some(reason) = &category.skipped {
                writeln!(out, "  Skipped: {}", reason)?;
                continue;
            }
            if category.entries.is_empty() {
                writeln!(out, "{}", NOT_FOUND_LINE)?;
                continue;
            }
            for entry in &category.entries {
                match entry.kind {
                    EntryKind::Directory { files } => {
                        writeln!(out, "  {} ({} files)", entry.path, files)?
                    }
                    EntryKind::File => writeln!(out, "  {}", entry.path)?,
                    EntryKind::Other => {}
                }
            }
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.render_text(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
