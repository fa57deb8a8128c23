use crate::config::RootKind;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for modpath operations.
///
/// Only construction and configuration loading fail; rewriting itself never
/// returns an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read root config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse root config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Root `{kind}` must be an absolute path, got {path}")]
    RootNotAbsolute { kind: RootKind, path: PathBuf },

    #[error("Roots `{first}` ({first_path}) and `{second}` ({second_path}) overlap")]
    RootsOverlap {
        first: RootKind,
        first_path: PathBuf,
        second: RootKind,
        second_path: PathBuf,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Stable SCREAMING_SNAKE_CASE code for JSON output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO_ERROR",
            Self::ConfigRead { .. } => "CONFIG_READ_FAILED",
            Self::ConfigParse { .. } => "CONFIG_PARSE_FAILED",
            Self::RootNotAbsolute { .. } => "ROOT_NOT_ABSOLUTE",
            Self::RootsOverlap { .. } => "ROOTS_OVERLAP",
            Self::Other(_) => "OTHER",
        }
    }
}
