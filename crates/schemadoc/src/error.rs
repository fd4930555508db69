//! Error types for Schemadoc operations.
//!
//! This module provides the main error type [`SchemadocError`] which wraps
//! the error conditions of every pipeline stage. Each variant displays as a
//! single line prefixed with the name of the [`Stage`] that failed.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use schemadoc_input::{CatalogError, ScanError};

use crate::{export, table::RenderError};

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    Scan,
    Build,
    Render,
    Serialize,
    Write,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Load => "load",
            Self::Scan => "scan",
            Self::Build => "build",
            Self::Render => "render",
            Self::Serialize => "serialize",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The main error type for Schemadoc operations.
#[derive(Debug, Error)]
pub enum SchemadocError {
    #[error("config: {0}")]
    Config(String),

    #[error("load: {0}")]
    Catalog(#[from] CatalogError),

    #[error("scan: {0}")]
    Scan(#[from] ScanError),

    /// The catalog is well-formed but cannot be turned into a report.
    #[error("build: {0}")]
    Build(String),

    #[error("render: {0}")]
    Render(#[from] RenderError),

    #[error("serialize: {0}")]
    Export(#[from] export::Error),

    #[error("write: cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SchemadocError {
    /// Create a new `Write` error for `path`.
    pub fn new_write_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns the stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Config(_) => Stage::Config,
            Self::Catalog(_) => Stage::Load,
            Self::Scan(_) => Stage::Scan,
            Self::Build(_) => Stage::Build,
            Self::Render(_) => Stage::Render,
            Self::Export(_) => Stage::Serialize,
            Self::Write { .. } => Stage::Write,
        }
    }

    /// Returns `true` if the error means a required input does not exist.
    pub fn is_input_not_found(&self) -> bool {
        matches!(
            self,
            Self::Catalog(CatalogError::NotFound(_)) | Self::Scan(ScanError::NotFound(_))
        )
    }
}
