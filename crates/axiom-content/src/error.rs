//! Error types for content loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading skill/command/agent collections.
///
/// Per-document variants (`MissingFrontmatter`, `InvalidFrontmatter`,
/// `MissingName`) are handled inside the loaders with a skip-and-warn policy;
/// the structural variants propagate to the caller and are fatal at startup.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Document has no leading YAML frontmatter block
    #[error("{file}: no YAML frontmatter block")]
    MissingFrontmatter {
        /// Source file name
        file: String,
    },

    /// Frontmatter block is not valid YAML
    #[error("{file}: invalid frontmatter: {source}")]
    InvalidFrontmatter {
        /// Source file name
        file: String,
        /// Underlying YAML error
        source: serde_yaml::Error,
    },

    /// Frontmatter lacks a usable `name` field
    #[error("{file}: frontmatter has no usable `name` field")]
    MissingName {
        /// Source file name
        file: String,
    },

    /// A collection directory is absent or not a directory
    #[error("collection directory not found: {path:?}")]
    MissingDirectory {
        /// Expected directory path
        path: PathBuf,
    },

    /// The content bundle file is absent
    #[error("content bundle not found: {path:?}")]
    MissingBundle {
        /// Expected bundle path
        path: PathBuf,
    },

    /// The content bundle is not valid JSON
    #[error("failed to parse content bundle {path:?}: {source}")]
    InvalidBundle {
        /// Bundle path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Serialization error while writing a bundle
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient result alias
pub type Result<T, E = ContentError> = std::result::Result<T, E>;
