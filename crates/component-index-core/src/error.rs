use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    #[error("Scan root does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownCategory { .. } => 2,
            Self::RootNotFound { .. } => 3,
            Self::ConfigParse { .. } => 4,
            Self::InvalidPattern { .. } => 5,
            _ => 1,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = IndexError::UnknownCategory {
            name: "Nope".to_string(),
        };
        assert_eq!(err.exit_code(), 2);

        let err = IndexError::RootNotFound {
            path: PathBuf::from("/missing"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = IndexError::io("x", std::io::Error::other("boom"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("boom"));
    }
}
