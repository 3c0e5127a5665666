//! Category Store
//!
//! カテゴリ定義のランタイムストア。
//! ビルトインと設定ファイルをマージして、定義順を保ったまま保持。

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

use super::builtin::{CategoryDef, BUILTIN_CATEGORIES};

/// カテゴリ定義のランタイムストア（順序付き）
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    categories: Vec<CategoryDef>,
}

impl CategoryStore {
    /// ビルトインカテゴリのみで初期化
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES.iter().map(CategoryDef::from).collect();
        Self { categories }
    }

    /// 空のストア（`replace_builtin = true`用）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 設定エントリでオーバーライド
    ///
    /// - 同名カテゴリはその位置のままパターンを置換
    /// - 新規カテゴリは末尾に追加
    pub fn with_entries(mut self, entries: &[CategoryConfigEntry]) -> Self {
        for entry in entries {
            match self.categories.iter_mut().find(|c| c.name == entry.name) {
                Some(existing) => existing.patterns = entry.patterns.clone(),
                None => self.categories.push(CategoryDef {
                    name: entry.name.clone(),
                    patterns: entry.patterns.clone(),
                }),
            }
        }
        self
    }

    /// 指定カテゴリのみ残す（定義順は維持）
    ///
    /// 存在しない名前が含まれていれば`UnknownCategory`。
    pub fn retain_only(mut self, names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(self);
        }
        if let Some(missing) = names.iter().find(|n| self.get(n).is_none()) {
            return Err(IndexError::UnknownCategory {
                name: missing.clone(),
            });
        }
        self.categories.retain(|c| names.contains(&c.name));
        Ok(self)
    }

    /// カテゴリ定義を取得
    pub fn get(&self, name: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// 全カテゴリを取得（定義順）
    pub fn all(&self) -> &[CategoryDef] {
        &self.categories
    }

    /// カテゴリ名一覧
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// 設定ファイルの`[[category]]`エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfigEntry {
    /// カテゴリ名
    pub name: String,
    /// Globパターン
    pub patterns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, patterns: &[&str]) -> CategoryConfigEntry {
        CategoryConfigEntry {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_category_store_builtin() {
        let store = CategoryStore::builtin();
        assert!(store.get("Frontend").is_some());
        assert!(store.get("Database").is_some());
        assert!(store.get("nonexistent").is_none());
        assert_eq!(store.len(), BUILTIN_CATEGORIES.len());
    }

    #[test]
    fn test_category_store_override_keeps_position() {
        let store = CategoryStore::builtin().with_entries(&[entry("Backend", &["server/"])]);

        assert_eq!(store.names()[1], "Backend");
        assert_eq!(store.get("Backend").unwrap().patterns, vec!["server/"]);
        assert_eq!(store.len(), BUILTIN_CATEGORIES.len());
    }

    #[test]
    fn test_category_store_appends_new() {
        let store = CategoryStore::builtin().with_entries(&[entry("Proto", &["proto/"])]);

        assert_eq!(store.names().last(), Some(&"Proto"));
        assert_eq!(store.len(), BUILTIN_CATEGORIES.len() + 1);
    }

    #[test]
    fn test_category_store_empty_with_entries() {
        let store =
            CategoryStore::empty().with_entries(&[entry("B", &["b/"]), entry("A", &["a/"])]);
        assert_eq!(store.names(), vec!["B", "A"]);
    }

    #[test]
    fn test_retain_only_preserves_table_order() {
        let store = CategoryStore::builtin()
            .retain_only(&["Database".to_string(), "Frontend".to_string()])
            .unwrap();
        assert_eq!(store.names(), vec!["Frontend", "Database"]);
    }

    #[test]
    fn test_retain_only_unknown_name() {
        let err = CategoryStore::builtin()
            .retain_only(&["Nope".to_string()])
            .unwrap_err();
        assert!(matches!(err, IndexError::UnknownCategory { ref name } if name == "Nope"));
    }

    #[test]
    fn test_retain_only_empty_keeps_all() {
        let store = CategoryStore::builtin().retain_only(&[]).unwrap();
        assert_eq!(store.len(), BUILTIN_CATEGORIES.len());
    }
}
