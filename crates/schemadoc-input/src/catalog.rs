//! Schema catalog loading and validation.
//!
//! Catalogs are authored outside Schemadoc, typically exported from the
//! application that owns the schema. JSON is the default format; files with a
//! `.toml` extension are read as TOML.
//!
//! Loading is strict. Deserialization enforces the presence and type of
//! required fields, and [`validate_catalog`] then rejects required text
//! fields that are present but empty, naming the offending entity.

use std::{fs, io, path::Path};

use log::{debug, info};

use schemadoc_core::catalog::{Catalog, ColumnDef, EndpointDef, ProcedureDef, TableDef};

use crate::error::CatalogError;

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    /// Picks the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Load and validate a catalog file.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if `path` does not exist,
/// [`CatalogError::Io`] if it cannot be read, and
/// [`CatalogError::Malformed`] if it cannot be deserialized or fails
/// validation.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading catalog");

    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => CatalogError::NotFound(path.to_path_buf()),
        _ => CatalogError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })?;

    let catalog = parse_catalog(&content, CatalogFormat::from_path(path))?;

    info!(
        tables = catalog.tables().len(),
        procedures = catalog.procedures().len(),
        endpoints = catalog.endpoints().len();
        "Catalog loaded"
    );

    Ok(catalog)
}

/// Parse and validate catalog source text.
///
/// # Errors
///
/// Returns [`CatalogError::Malformed`] if the text cannot be deserialized or
/// fails validation.
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = match format {
        CatalogFormat::Json => serde_json::from_str(content)
            .map_err(|err| CatalogError::malformed("catalog", err.to_string()))?,
        CatalogFormat::Toml => toml::from_str(content)
            .map_err(|err| CatalogError::malformed("catalog", err.message().to_string()))?,
    };

    validate_catalog(&catalog)?;
    debug!("Catalog validated");

    Ok(catalog)
}

/// Check that every entity has non-empty required fields.
///
/// # Errors
///
/// Returns [`CatalogError::Malformed`] for the first offending entity.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    for (index, table) in catalog.tables().iter().enumerate() {
        validate_table(index, table)?;
    }

    for (index, procedure) in catalog.procedures().iter().enumerate() {
        validate_procedure(index, procedure)?;
    }

    for (index, endpoint) in catalog.endpoints().iter().enumerate() {
        validate_endpoint(index, endpoint)?;
    }

    Ok(())
}

fn validate_table(index: usize, table: &TableDef) -> Result<(), CatalogError> {
    if table.name().trim().is_empty() {
        return Err(CatalogError::malformed(
            format!("table #{}", index + 1),
            "missing name",
        ));
    }

    let entity = format!("table '{}'", table.name());
    if table.module().trim().is_empty() {
        return Err(CatalogError::malformed(entity, "missing module"));
    }

    for (position, column) in table.columns().iter().enumerate() {
        validate_column(&entity, position, column)?;
    }

    for (position, fk) in table.foreign_keys().iter().enumerate() {
        let missing = [
            ("column", fk.column()),
            ("references", fk.references()),
            ("onDelete", fk.on_delete()),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        if let Some((field, _)) = missing {
            return Err(CatalogError::malformed(
                entity,
                format!("foreign key #{} has an empty {field}", position + 1),
            ));
        }
    }

    Ok(())
}

fn validate_column(entity: &str, position: usize, column: &ColumnDef) -> Result<(), CatalogError> {
    if column.name().trim().is_empty() {
        return Err(CatalogError::malformed(
            entity,
            format!("column #{} has an empty name", position + 1),
        ));
    }

    if column.data_type().trim().is_empty() {
        return Err(CatalogError::malformed(
            entity,
            format!("column '{}' has an empty type", column.name()),
        ));
    }

    Ok(())
}

fn validate_procedure(index: usize, procedure: &ProcedureDef) -> Result<(), CatalogError> {
    if procedure.name().trim().is_empty() {
        return Err(CatalogError::malformed(
            format!("procedure #{}", index + 1),
            "missing name",
        ));
    }

    let entity = format!("procedure '{}'", procedure.name());
    if procedure.module().trim().is_empty() {
        return Err(CatalogError::malformed(entity, "missing module"));
    }

    for (position, param) in procedure.parameters().iter().enumerate() {
        if param.name().trim().is_empty() || param.data_type().trim().is_empty() {
            return Err(CatalogError::malformed(
                entity,
                format!("parameter #{} needs a name and a type", position + 1),
            ));
        }
    }

    Ok(())
}

fn validate_endpoint(index: usize, endpoint: &EndpointDef) -> Result<(), CatalogError> {
    let entity = if endpoint.path().trim().is_empty() {
        format!("endpoint #{}", index + 1)
    } else {
        format!("endpoint '{}'", endpoint.key())
    };

    if endpoint.method().trim().is_empty() {
        return Err(CatalogError::malformed(entity, "missing method"));
    }
    if endpoint.path().trim().is_empty() {
        return Err(CatalogError::malformed(entity, "missing path"));
    }
    if endpoint.module().trim().is_empty() {
        return Err(CatalogError::malformed(entity, "missing module"));
    }

    Ok(())
}
