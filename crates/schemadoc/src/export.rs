//! Export functionality for Schemadoc reports.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a built [`Document`] into an output format. It is the final
//! in-memory stage of the Schemadoc pipeline; writing the bytes to disk is
//! left to the caller.
//!
//! # Pipeline Position
//!
//! ```text
//! Catalog + Source Tree
//!     ↓ load / scan
//! Catalog + Inventory
//!     ↓ build
//! Document
//!     ↓ export (this module)
//! Output Bytes
//! ```
//!
//! # Available Backends
//!
//! - [`docx`]: Office Open XML word-processing package via [`docx::Docx`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering documents that cannot be
//! represented in the target format and XML or archive failures. [`Error`]
//! converts into [`SchemadocError::Export`] at the crate boundary.
//!
//! [`SchemadocError::Export`]: crate::SchemadocError::Export

/// DOCX export backend.
pub mod docx;

use std::{fmt, io};

use schemadoc_core::document::Document;

/// Abstraction for report export backends.
///
/// Implementors convert a [`Document`] into the complete byte content of an
/// output file. Exporting the same document twice with the same settings
/// must yield identical bytes.
pub trait Exporter {
    /// Exports a document to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the document cannot be expressed in
    /// the target format, or [`Error::Io`] if assembling the output fails.
    fn export_document(&mut self, document: &Document) -> Result<Vec<u8>, Error>;
}

/// Errors that can occur during report export.
#[derive(Debug)]
pub enum Error {
    /// The document cannot be represented, described by `message`.
    Serialization(String),
    /// An I/O error encountered while assembling output.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialization(msg) => write!(f, "{msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Serialization(format!("XML error: {err}"))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(err) => Self::Io(err),
            other => Self::Serialization(format!("archive error: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_display_is_single_line() {
        let err = Error::Serialization("table 2 has no columns".to_string());
        assert_eq!(err.to_string(), "table 2 has no columns");

        let err = Error::from(io::Error::other("disk full"));
        assert_eq!(err.to_string(), "I/O error: disk full");
        assert!(err.source().is_some());
    }
}
