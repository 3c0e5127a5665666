pub mod category;
pub mod config;
pub mod error;
pub mod indexer;
pub mod report;

pub use category::{
    BuiltinCategory, CategoryConfigEntry, CategoryDef, CategoryStore, ComponentPattern,
    ResolvedMatch, BUILTIN_CATEGORIES,
};
pub use config::{Config, ScanConfig, LOCAL_CONFIG_FILE};
pub use error::{IndexError, Result};
pub use indexer::{count_files, ErrorPolicy, Indexer};
pub use report::{
    CategoryReport, EntryKind, IndexEntry, IndexReport, NOT_FOUND_LINE, REPORT_HEADER,
};
