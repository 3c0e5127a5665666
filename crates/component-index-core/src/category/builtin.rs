//! Builtin Category Definitions
//!
//! コード内で定義されるビルトインカテゴリ。
//! 表示順はこのテーブルの定義順。

use serde::{Deserialize, Serialize};

/// ビルトインカテゴリ定義
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        name: "Frontend",
        patterns: &["frontend/", "platform/src/components/", "frontend/src/"],
    },
    BuiltinCategory {
        name: "Backend",
        patterns: &["core/backend/", "platform/modules/backend/", "apps/api/"],
    },
    BuiltinCategory {
        name: "Python Modules",
        patterns: &["platform/modules/", "platform/src/", "core/", "libs/"],
    },
    BuiltinCategory {
        name: "Rust Components",
        patterns: &[
            "platform/rust/",
            "platform/modules/agent/",
            "platform/modules/defensive_security/",
        ],
    },
    BuiltinCategory {
        name: "Go Components",
        patterns: &["platform/modules/net/", "platform/modules/cloud/"],
    },
    BuiltinCategory {
        name: "Tests",
        patterns: &[
            "tests/",
            "frontend/src/**/__tests__/",
            "platform/modules/backend/__tests__/",
        ],
    },
    BuiltinCategory {
        name: "Documentation",
        patterns: &["docs/", "README.md"],
    },
    BuiltinCategory {
        name: "Configuration",
        patterns: &["configs/", ".env*", "*.toml", "*.json", "docker-compose.yml"],
    },
    BuiltinCategory {
        name: "Infrastructure",
        patterns: &["infrastructure/", "deployments/", ".github/"],
    },
    BuiltinCategory {
        name: "Scripts",
        patterns: &["scripts/", "tools/scripts/"],
    },
    BuiltinCategory {
        name: "CLI",
        patterns: &["cli/"],
    },
    BuiltinCategory {
        name: "Database",
        patterns: &["migrations/", "*.db", "core/database/"],
    },
];

/// ビルトインカテゴリの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// カテゴリ名（レポートの見出し）
    pub name: &'static str,
    /// Globパターン（スキャンルート相対、末尾`/`はディレクトリのみ）
    pub patterns: &'static [&'static str],
}

/// ランタイムカテゴリ定義
///
/// ビルトインまたは設定ファイルの`[[category]]`から構築される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// カテゴリ名
    pub name: String,
    /// Globパターン
    pub patterns: Vec<String>,
}

impl From<&BuiltinCategory> for CategoryDef {
    fn from(builtin: &BuiltinCategory) -> Self {
        Self {
            name: builtin.name.to_string(),
            patterns: builtin.patterns.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories_order() {
        let names: Vec<&str> = BUILTIN_CATEGORIES.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "Frontend",
                "Backend",
                "Python Modules",
                "Rust Components",
                "Go Components",
                "Tests",
                "Documentation",
                "Configuration",
                "Infrastructure",
                "Scripts",
                "CLI",
                "Database",
            ]
        );
    }

    #[test]
    fn test_builtin_categories_have_patterns() {
        assert!(BUILTIN_CATEGORIES.iter().all(|c| !c.patterns.is_empty()));
    }

    #[test]
    fn test_category_def_from_builtin() {
        let builtin = &BUILTIN_CATEGORIES[6];
        let def = CategoryDef::from(builtin);
        assert_eq!(def.name, "Documentation");
        assert_eq!(def.patterns, vec!["docs/", "README.md"]);
    }
}
