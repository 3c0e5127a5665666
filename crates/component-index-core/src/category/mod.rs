//! # Category Module
//!
//! リポジトリの構成要素（Frontend, Backend, Tests...）をカテゴリとして定義し、
//! 各カテゴリのGlobパターンをファイルシステム上で解決する。
//!
//! ## モジュール構成
//!
//! - `builtin`: ビルトインカテゴリ定義（固定テーブル）
//! - `store`: カテゴリ定義のランタイムストア（設定ファイルでオーバーライド可能）
//! - `pattern`: パターンのコンパイルと展開
//!
//! ## 使用例
//!
//! ```rust
//! use component_index_core::category::{CategoryStore, BUILTIN_CATEGORIES};
//!
//! let store = CategoryStore::builtin();
//! assert!(store.get("Frontend").is_some());
//! assert_eq!(store.names()[0], "Frontend");
//! assert_eq!(store.len(), BUILTIN_CATEGORIES.len());
//! ```

mod builtin;
mod pattern;
mod store;

// Re-exports
pub use builtin::{BuiltinCategory, CategoryDef, BUILTIN_CATEGORIES};
pub use pattern::{ComponentPattern, ResolvedMatch};
pub use store::{CategoryConfigEntry, CategoryStore};
