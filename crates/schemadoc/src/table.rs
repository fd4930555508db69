//! Record tables.
//!
//! A [`TableLayout`] declares, for one call site, the ordered columns of a
//! table and how each cell is composed from a record. Rendering a layout over
//! `N` records yields a [`TableNode`] with a bold header row and `N` body rows,
//! cells in declared order. A cell that composes to nothing, or to an empty
//! string, is rendered as [`PLACEHOLDER`].
//!
//! The report uses three layouts: [`column_layout`], [`parameter_layout`] and
//! [`endpoint_layout`]. Their cell rules are plain functions and can be
//! tested without building a document.
//!
//! # Example
//!
//! ```
//! # use schemadoc::table::column_layout;
//! # use schemadoc_core::catalog::ColumnDef;
//! let columns = vec![
//!     ColumnDef::new("id", "BIGINT").with_key("PRIMARY KEY"),
//!     ColumnDef::new("bio", "TEXT").nullable(true),
//! ];
//!
//! let table = column_layout().render(&columns).unwrap();
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.rows()[1][3].text(), "-");
//! ```

use thiserror::Error;

use schemadoc_core::{
    catalog::{ColumnDef, EndpointDef, ParamDef},
    document::{TableCell, TableNode},
};

/// Text rendered for missing or empty values.
pub const PLACEHOLDER: &str = "-";

/// Errors raised while rendering a table.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("table layout '{0}' declares no columns")]
    EmptyLayout(&'static str),
}

/// Composes one cell from a record. `None` renders as [`PLACEHOLDER`].
pub type CellFn<R> = fn(&R) -> Option<String>;

/// One declared column.
pub struct Column<R> {
    field: &'static str,
    header: &'static str,
    cell: CellFn<R>,
}

impl<R> Column<R> {
    /// Record field this column presents.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Header row text.
    pub fn header(&self) -> &'static str {
        self.header
    }

    /// Composes the display text for `record`.
    pub fn compose(&self, record: &R) -> String {
        (self.cell)(record)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

/// Ordered column declarations for one kind of record.
pub struct TableLayout<R> {
    name: &'static str,
    columns: Vec<Column<R>>,
}

impl<R> TableLayout<R> {
    /// Creates an empty layout; `name` identifies it in errors.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    pub fn column(mut self, field: &'static str, header: &'static str, cell: CellFn<R>) -> Self {
        self.columns.push(Column {
            field,
            header,
            cell,
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Declared field names, in column order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.columns.iter().map(Column::field).collect()
    }

    /// Render `records` into a table node.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyLayout`] if the layout declares no columns.
    pub fn render(&self, records: &[R]) -> Result<TableNode, RenderError> {
        if self.columns.is_empty() {
            return Err(RenderError::EmptyLayout(self.name));
        }

        let header = self
            .columns
            .iter()
            .map(|column| TableCell::header(column.header))
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|column| TableCell::new(column.compose(record)))
                    .collect()
            })
            .collect();

        Ok(TableNode::new(header, rows))
    }
}

/// Layout of a table's column list.
pub fn column_layout() -> TableLayout<ColumnDef> {
    TableLayout::<ColumnDef>::new("columns")
        .column("name", "Column Name", |column| {
            Some(column.name().to_string())
        })
        .column("type", "Data Type", |column| {
            Some(column.data_type().to_string())
        })
        .column("nullable", "Nullable", nullable_cell)
        .column("key_default", "Key/Default", key_default_cell)
        .column("description", "Description", |column| {
            column.description().map(str::to_string)
        })
}

/// Layout of a stored procedure's parameter list.
pub fn parameter_layout() -> TableLayout<ParamDef> {
    TableLayout::<ParamDef>::new("parameters")
        .column("name", "Parameter Name", |param| Some(param.name().to_string()))
        .column("type", "Data Type", |param| {
            Some(param.data_type().to_string())
        })
        .column("description", "Description", |param| {
            param.description().map(str::to_string)
        })
}

/// Layout of one module's endpoint list.
pub fn endpoint_layout() -> TableLayout<EndpointDef> {
    TableLayout::<EndpointDef>::new("endpoints")
        .column("method", "Method", |endpoint| {
            Some(endpoint.method().to_string())
        })
        .column("path", "Endpoint", |endpoint| {
            Some(endpoint.path().to_string())
        })
        .column("description", "Description", |endpoint| {
            Some(endpoint.description().to_string())
        })
}

/// `Yes` for nullable columns, `No` otherwise.
pub fn nullable_cell(column: &ColumnDef) -> Option<String> {
    let text = if column.is_nullable() { "Yes" } else { "No" };
    Some(text.to_string())
}

/// Joins the key constraint and the default value into one cell.
///
/// Produces `"KEY"`, `"DEFAULT: x"` or `"KEY, DEFAULT: x"`; `None` when the
/// column has neither.
pub fn key_default_cell(column: &ColumnDef) -> Option<String> {
    let parts: Vec<String> = column
        .key()
        .map(str::to_string)
        .into_iter()
        .chain(column.default_value().map(|value| format!("DEFAULT: {value}")))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use schemadoc_core::catalog::DefaultValue;

    use super::*;

    #[test]
    fn test_key_default_cell_joins_parts() {
        let both = ColumnDef::new("status", "ENUM")
            .with_key("INDEX")
            .with_default(DefaultValue::from("pending"));
        assert_eq!(
            key_default_cell(&both).as_deref(),
            Some("INDEX, DEFAULT: pending")
        );

        let key_only = ColumnDef::new("id", "BIGINT").with_key("PRIMARY KEY AUTO_INCREMENT");
        assert_eq!(
            key_default_cell(&key_only).as_deref(),
            Some("PRIMARY KEY AUTO_INCREMENT")
        );

        let default_only =
            ColumnDef::new("count", "INT").with_default(DefaultValue::Integer(5));
        assert_eq!(
            key_default_cell(&default_only).as_deref(),
            Some("DEFAULT: 5")
        );
    }

    #[test]
    fn test_key_default_cell_ignores_falsy_default() {
        let column = ColumnDef::new("verified", "BOOLEAN").with_default(DefaultValue::Flag(false));
        assert_eq!(key_default_cell(&column), None);

        let enabled = ColumnDef::new("active", "BOOLEAN").with_default(DefaultValue::Flag(true));
        assert_eq!(key_default_cell(&enabled).as_deref(), Some("DEFAULT: true"));
    }

    #[test]
    fn test_nullable_cell() {
        assert_eq!(
            nullable_cell(&ColumnDef::new("a", "INT").nullable(true)).as_deref(),
            Some("Yes")
        );
        assert_eq!(
            nullable_cell(&ColumnDef::new("a", "INT")).as_deref(),
            Some("No")
        );
    }

    #[test]
    fn test_render_uses_declared_order_and_placeholder() {
        let columns = vec![
            ColumnDef::new("id", "BIGINT").with_key("PRIMARY KEY"),
            ColumnDef::new("bio", "TEXT")
                .nullable(true)
                .with_description("Biography"),
        ];

        let table = column_layout().render(&columns).unwrap();

        let header: Vec<&str> = table.header().iter().map(TableCell::text).collect();
        assert_eq!(
            header,
            vec!["Column Name", "Data Type", "Nullable", "Key/Default", "Description"]
        );
        assert!(table.header().iter().all(TableCell::is_bold));

        let first: Vec<&str> = table.rows()[0].iter().map(TableCell::text).collect();
        assert_eq!(first, vec!["id", "BIGINT", "No", "PRIMARY KEY", "-"]);

        let second: Vec<&str> = table.rows()[1].iter().map(TableCell::text).collect();
        assert_eq!(second, vec!["bio", "TEXT", "Yes", "-", "Biography"]);
    }

    #[test]
    fn test_render_empty_records_has_header_only() {
        let table = endpoint_layout().render(&[]).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.width(), 3);
    }

    #[test]
    fn test_empty_string_renders_placeholder() {
        let endpoint = EndpointDef::new("GET", "/api/ping", "Health");
        let table = endpoint_layout().render(&[endpoint]).unwrap();
        assert_eq!(table.rows()[0][2].text(), PLACEHOLDER);
    }

    #[test]
    fn test_parameter_layout_fields() {
        assert_eq!(parameter_layout().fields(), vec!["name", "type", "description"]);

        let params = vec![ParamDef::new("p_email", "VARCHAR(255)")];
        let table = parameter_layout().render(&params).unwrap();
        let row: Vec<&str> = table.rows()[0].iter().map(TableCell::text).collect();
        assert_eq!(row, vec!["p_email", "VARCHAR(255)", "-"]);
    }

    #[test]
    fn test_empty_layout_is_an_error() {
        let layout: TableLayout<ParamDef> = TableLayout::new("nothing");
        assert!(matches!(
            layout.render(&[]),
            Err(RenderError::EmptyLayout("nothing"))
        ));
    }
}
