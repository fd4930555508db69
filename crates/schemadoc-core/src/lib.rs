//! Schemadoc Core Types and Definitions
//!
//! This crate provides the foundational types shared by every Schemadoc
//! stage. It includes:
//!
//! - **Catalog**: Database tables, stored procedures and API endpoints ([`catalog`] module)
//! - **Inventory**: Scanned UI source files partitioned into buckets ([`inventory`] module)
//! - **Document**: The closed set of report nodes produced by the model builder ([`document`] module)

pub mod catalog;
pub mod document;
pub mod inventory;
