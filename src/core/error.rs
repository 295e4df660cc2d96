//! core/error.rs
//!
//! Error types for discovery and tag IO.
//!
//! The tag layer separates faults by where they are caught:
//! - [`OpenError`]: the container could not be loaded, the file is excluded
//! - [`TagFault`]: one tag could not be read or written
//! - [`WriteFault`]: a `TagFault` tied to the tag the operator was setting
//! - [`CommitError`]: the edited container could not be saved back to disk

use std::path::PathBuf;

use super::types::{FormatKind, SemanticTag};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Directory '{}' does not exist.", .0.display())]
    NotFound(PathBuf),
    #[error("'{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("{format} containers are not supported by the tag backend")]
    Unsupported { format: FormatKind },
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Parse failures reported by the codec crates.
    #[error("{0}")]
    Codec(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TagFault {
    #[error("invalid literal for an integer: '{0}'")]
    InvalidNumber(String),
    #[error("{0}")]
    Codec(String),
}

#[derive(Debug, thiserror::Error)]
#[error("Could not set {tag}: {fault}")]
pub struct WriteFault {
    pub tag: SemanticTag,
    #[source]
    pub fault: TagFault,
}

#[derive(Debug, thiserror::Error)]
#[error("could not save {}: {reason}", .path.display())]
pub struct CommitError {
    pub path: PathBuf,
    pub reason: String,
}

impl CommitError {
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
