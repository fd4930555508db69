//! DOCX export.
//!
//! [`Docx`] packs a [`Document`] into an Office Open XML word-processing
//! package. Parts are written with `quick-xml` and archived with `zip` in a
//! fixed order, each entry stamped with the DOS epoch. The package bytes are
//! therefore a pure function of the document, the page settings and the
//! [`DocumentMetadata`]; the creation time is confined to
//! `docProps/core.xml`.

mod body;
mod parts;
mod xml;

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use log::{debug, info};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use schemadoc_core::document::Document;

use super::{Error, Exporter};
use crate::config::PageConfig;

/// Package metadata stored in `docProps/core.xml`.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    title: String,
    author: String,
    description: String,
    created: DateTime<Utc>,
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>, author: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            description: String::new(),
            created,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

/// DOCX exporter.
#[derive(Debug, Clone)]
pub struct Docx {
    metadata: DocumentMetadata,
    page: PageConfig,
}

impl Docx {
    pub fn new(metadata: DocumentMetadata) -> Self {
        Self {
            metadata,
            page: PageConfig::default(),
        }
    }

    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }
}

impl Exporter for Docx {
    fn export_document(&mut self, document: &Document) -> Result<Vec<u8>, Error> {
        info!(nodes = document.len(); "Serializing DOCX package");

        let entries = [
            ("[Content_Types].xml", parts::content_types()?),
            ("_rels/.rels", parts::package_relationships()?),
            ("docProps/core.xml", parts::core_properties(&self.metadata)?),
            ("docProps/app.xml", parts::app_properties()?),
            ("word/document.xml", body::document_part(document, &self.page)?),
            ("word/styles.xml", parts::styles()?),
            (
                "word/_rels/document.xml.rels",
                parts::document_relationships()?,
            ),
        ];

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            debug!(part = name, bytes = content.len(); "Writing package part");
            archive.start_file(name, options)?;
            archive.write_all(&content)?;
        }

        let bytes = archive.finish()?.into_inner();
        info!(bytes = bytes.len(); "DOCX package serialized");
        Ok(bytes)
    }
}
