//! Schemadoc - Technical design reports from database catalogs.
//!
//! Loads a catalog of tables, stored procedures and API endpoints, inventories
//! the page and component files of a UI source tree, and compiles both into a
//! single DOCX report with positional section numbering.

pub mod config;
pub mod export;
pub mod model;
pub mod table;

mod error;

pub use schemadoc_core::{catalog, document, inventory};

pub use error::{SchemadocError, Stage};

use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};

use catalog::Catalog;
use config::AppConfig;
use document::Document;
use export::{
    Exporter,
    docx::{DocumentMetadata, Docx},
};
use inventory::Inventory;
use model::DocumentModelBuilder;

/// Builder for loading inputs and rendering Schemadoc reports.
///
/// Each stage consumes the immutable output of the previous one, so stages
/// can be run and inspected separately.
///
/// # Examples
///
/// ```rust,no_run
/// use chrono::Utc;
/// use schemadoc::{ReportBuilder, config::AppConfig};
///
/// let builder = ReportBuilder::new(AppConfig::default());
///
/// let catalog = builder.load_catalog("catalog.json")
///     .expect("Failed to load catalog");
/// let inventory = builder.scan("src")
///     .expect("Failed to scan");
///
/// let document = builder.build(&catalog, &inventory)
///     .expect("Failed to build");
/// let bytes = builder.render_docx(&document, Utc::now())
///     .expect("Failed to render");
/// ```
#[derive(Default)]
pub struct ReportBuilder {
    config: AppConfig,
}

impl ReportBuilder {
    /// Create a new report builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Load and validate a catalog file.
    ///
    /// The format is chosen by extension: `.toml` is read as TOML, anything
    /// else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemadocError::Catalog`] if the file is missing, unreadable
    /// or malformed.
    pub fn load_catalog(&self, path: impl AsRef<Path>) -> Result<Catalog, SchemadocError> {
        let catalog = schemadoc_input::load_catalog(path.as_ref())?;
        debug!(
            tables = catalog.tables().len(),
            procedures = catalog.procedures().len(),
            endpoints = catalog.endpoints().len();
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Inventory the page and component files under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemadocError::Scan`] if `root` is missing, is not a
    /// directory, or cannot be walked.
    pub fn scan(&self, root: impl AsRef<Path>) -> Result<Inventory, SchemadocError> {
        let inventory = schemadoc_input::scan_inventory(root.as_ref(), self.config.scan())?;
        debug!(
            pages = inventory.pages().len(),
            components = inventory.component_count();
            "Inventory scanned"
        );
        Ok(inventory)
    }

    /// Build the report tree.
    ///
    /// # Errors
    ///
    /// Returns [`SchemadocError::Build`] for duplicate table or procedure
    /// names, or [`SchemadocError::Render`] if a table cannot be rendered.
    pub fn build(
        &self,
        catalog: &Catalog,
        inventory: &Inventory,
    ) -> Result<Document, SchemadocError> {
        DocumentModelBuilder::new(self.config.report()).build(catalog, inventory)
    }

    /// Serialize a document into DOCX bytes.
    ///
    /// `created` is written to the package properties and nowhere else, so
    /// two calls that differ only in `created` differ only in
    /// `docProps/core.xml`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemadocError::Export`] if the document cannot be encoded.
    pub fn render_docx(
        &self,
        document: &Document,
        created: DateTime<Utc>,
    ) -> Result<Vec<u8>, SchemadocError> {
        let report = self.config.report();
        let metadata = DocumentMetadata::new(report.title(), report.author(), created)
            .with_description(report.description());

        let mut exporter = Docx::new(metadata).with_page(*self.config.page());
        let bytes = exporter.export_document(document)?;

        info!(bytes = bytes.len(); "Report rendered");
        Ok(bytes)
    }
}
