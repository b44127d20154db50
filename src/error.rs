//! Error kinds produced while walking a tree and touching its tags.
//!
//! Every kind except [`TagError::TagSaveFailed`] ends the batch. A failed
//! save is reported for the one file and the walk moves on.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TagError>;

/// Underlying cause reported by a tag store.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("The path {} does not exist", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Failed to list directory {}: {source}", path.display())]
    DirectoryListFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open tags of {}: {source}", path.display())]
    TagOpenFailed {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Failed to save tags of {}: {source}", path.display())]
    TagSaveFailed {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl TagError {
    /// Whether this error aborts the remaining walk.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TagError::TagSaveFailed { .. })
    }
}
