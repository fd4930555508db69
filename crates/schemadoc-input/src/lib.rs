//! Schemadoc input stage.
//!
//! This crate produces the two immutable snapshots the model builder consumes:
//!
//! - [`catalog`]: loads a [`Catalog`] from a JSON or TOML file and validates
//!   that every entity carries its required fields.
//! - [`scan`]: walks a UI source tree and partitions matching files into an
//!   [`Inventory`] of pages and component buckets.
//!
//! Both stages are all-or-nothing: any error aborts with no partial result.
//!
//! [`Catalog`]: schemadoc_core::catalog::Catalog
//! [`Inventory`]: schemadoc_core::inventory::Inventory

pub mod catalog;
pub mod error;
pub mod scan;

pub use catalog::{CatalogFormat, load_catalog, parse_catalog, validate_catalog};
pub use error::{CatalogError, ScanError};
pub use scan::{ScanConfig, scan_inventory};
