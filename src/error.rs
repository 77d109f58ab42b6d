// Error types for index loading and asset resolution

use std::path::PathBuf;
use thiserror::Error;

/// A version or range expression that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid version '{0}'")]
    InvalidVersion(String),

    #[error("Invalid version range '{expr}': {reason}")]
    InvalidRange { expr: String, reason: String },
}

impl ParseError {
    pub(crate) fn range(expr: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidRange {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure to turn an index payload into an `AssetIndex`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Malformed index payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not read index at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure of a single `resolve` call. Always deterministic for the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No asset index entry covers Minecraft {version}")]
    NoMatchingIndex { version: String },

    #[error("convertFrom reference '{reference}' matches no asset index entry")]
    UnresolvedReference { reference: String },

    #[error("Index entry '{game_versions}' declares no downloads")]
    NoDownloadsDeclared { game_versions: String },
}

pub type ResolveResult<T> = Result<T, ResolveError>;
