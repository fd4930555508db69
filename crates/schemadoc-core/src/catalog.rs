//! Schema catalog entities.
//!
//! A [`Catalog`] is the externally authored description of everything the
//! report documents: database tables, stored procedures and API endpoints.
//! All types implement [`serde::Deserialize`] with camelCase field names so
//! catalogs exported from JavaScript tooling load without conversion.
//!
//! Entities are immutable once constructed. The order of every list is
//! significant: the report preserves it when grouping by module.
//!
//! # Example
//!
//! ```
//! # use schemadoc_core::catalog::{Catalog, TableDef};
//! let catalog: Catalog = serde_json::from_str(r#"{
//!     "tables": [{
//!         "name": "users",
//!         "module": "Core",
//!         "description": "Registered accounts",
//!         "columns": [{ "name": "id", "type": "BIGINT", "nullable": false, "key": "PRIMARY KEY" }]
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(catalog.tables()[0].name(), "users");
//! assert!(catalog.procedures().is_empty());
//! ```

use std::fmt;

use serde::Deserialize;

/// The complete schema catalog handed to the model builder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    tables: Vec<TableDef>,

    #[serde(default)]
    procedures: Vec<ProcedureDef>,

    #[serde(default)]
    endpoints: Vec<EndpointDef>,
}

impl Catalog {
    /// Creates a catalog from already ordered entity lists.
    pub fn new(
        tables: Vec<TableDef>,
        procedures: Vec<ProcedureDef>,
        endpoints: Vec<EndpointDef>,
    ) -> Self {
        Self {
            tables,
            procedures,
            endpoints,
        }
    }

    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    pub fn procedures(&self) -> &[ProcedureDef] {
        &self.procedures
    }

    pub fn endpoints(&self) -> &[EndpointDef] {
        &self.endpoints
    }

    /// Returns `true` if the catalog describes nothing at all.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.procedures.is_empty() && self.endpoints.is_empty()
    }
}

/// A database table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDef {
    name: String,
    module: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    columns: Vec<ColumnDef>,
    #[serde(default)]
    indexes: Vec<String>,
    #[serde(default)]
    foreign_keys: Vec<ForeignKeyDef>,
}

impl TableDef {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            description: String::new(),
            columns: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.indexes.push(index.into());
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: ForeignKeyDef) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn indexes(&self) -> &[String] {
        &self.indexes
    }

    pub fn foreign_keys(&self) -> &[ForeignKeyDef] {
        &self.foreign_keys
    }
}

/// A single table column.
///
/// `key` and `default` are optional; the report joins them into a single
/// "Key/Default" cell.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDef {
    name: String,
    #[serde(rename = "type")]
    data_type: String,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    default: Option<DefaultValue>,
    #[serde(default)]
    description: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: false,
            key: None,
            default: None,
            description: None,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the key constraint, treating an empty string as absent.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.is_empty())
    }

    /// Returns the default value unless it is falsy.
    ///
    /// See [`DefaultValue::is_falsy`].
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref().filter(|value| !value.is_falsy())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|desc| !desc.is_empty())
    }
}

/// A column default as written in the catalog.
///
/// Catalog authors write defaults as strings (`"CURRENT_TIMESTAMP"`), booleans
/// or numbers. The falsy values `false`, `0`, `0.0` and `""` are treated as
/// "no default".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Flag(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DefaultValue {
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Flag(flag) => !flag,
            Self::Integer(value) => *value == 0,
            Self::Float(value) => *value == 0.0 || value.is_nan(),
            Self::Text(text) => text.is_empty(),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A foreign-key constraint declared on a table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyDef {
    column: String,
    references: String,
    on_delete: String,
}

impl ForeignKeyDef {
    pub fn new(
        column: impl Into<String>,
        references: impl Into<String>,
        on_delete: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            references: references.into(),
            on_delete: on_delete.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn references(&self) -> &str {
        &self.references
    }

    pub fn on_delete(&self) -> &str {
        &self.on_delete
    }
}

impl fmt::Display for ForeignKeyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} (ON DELETE: {})",
            self.column, self.references, self.on_delete
        )
    }
}

/// A stored procedure.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcedureDef {
    name: String,
    module: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parameters: Vec<ParamDef>,
    #[serde(default)]
    returns: String,
    #[serde(default)]
    logic: String,
}

impl ProcedureDef {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            description: String::new(),
            parameters: Vec::new(),
            returns: String::new(),
            logic: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parameter(mut self, parameter: ParamDef) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_returns(mut self, returns: impl Into<String>) -> Self {
        self.returns = returns.into();
        self
    }

    pub fn with_logic(mut self, logic: impl Into<String>) -> Self {
        self.logic = logic.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[ParamDef] {
        &self.parameters
    }

    pub fn returns(&self) -> &str {
        &self.returns
    }

    pub fn logic(&self) -> &str {
        &self.logic
    }
}

/// A stored procedure parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDef {
    name: String,
    #[serde(rename = "type")]
    data_type: String,
    #[serde(default)]
    description: Option<String>,
}

impl ParamDef {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|desc| !desc.is_empty())
    }
}

/// An HTTP API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointDef {
    method: String,
    path: String,
    #[serde(default)]
    description: String,
    module: String,
}

impl EndpointDef {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            description: String::new(),
            module: module.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the `"METHOD path"` key identifying this endpoint.
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}
