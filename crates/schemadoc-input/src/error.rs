//! Error types for the input stage.
//!
//! [`CatalogError`] covers loading and validating the schema catalog;
//! [`ScanError`] covers walking the component source tree.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entity is missing a required field or has the wrong shape.
    #[error("malformed {entity}: {reason}")]
    Malformed { entity: String, reason: String },
}

impl CatalogError {
    pub(crate) fn malformed(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while scanning the component source tree.
///
/// Any error aborts the whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("scan root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot read {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
