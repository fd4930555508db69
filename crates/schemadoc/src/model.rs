//! Document model building.
//!
//! [`DocumentModelBuilder`] combines a [`Catalog`] and an [`Inventory`] into
//! one [`Document`]. The report has front matter (title page and table of
//! contents) followed by seven numbered sections:
//!
//! ```text
//! 1. Executive Summary
//! 2. Database Overview
//! 3. Entity Relationships
//! 4. Database Tables        4.{i} {module} Module / {i}.{j} {table}
//! 5. Stored Procedures      {k}. {procedure}
//! 6. Components             6.{x} Page Components / 6.{y} Reusable Components
//! 7. API Endpoints          7.{m} {module} Endpoints
//! ```
//!
//! Numbering is positional. Numbers are drawn from a [`SectionCounter`] only
//! for groups that emit at least one member, so a group whose members are all
//! excluded leaves no gap. The table of contents is collected from the built
//! body, so it always matches the headings that were actually emitted.

mod grouping;

use std::collections::HashSet;

use log::{debug, info, trace};

use schemadoc_core::{
    catalog::{Catalog, EndpointDef, ProcedureDef, TableDef},
    document::{
        Alignment, Document, DocumentNode, HeadingLevel, HeadingNode, ParagraphNode, Run,
        SectionCounter, SectionNumber, TitleNode,
    },
    inventory::Inventory,
};

use crate::{
    config::ReportConfig,
    error::SchemadocError,
    table::{PLACEHOLDER, column_layout, endpoint_layout, parameter_layout},
};

use grouping::group_by_key;

/// Builds the report tree from the catalog and the component inventory.
pub struct DocumentModelBuilder<'a> {
    config: &'a ReportConfig,
    excluded: HashSet<&'a str>,
}

impl<'a> DocumentModelBuilder<'a> {
    /// Create a builder for the given report settings.
    pub fn new(config: &'a ReportConfig) -> Self {
        let excluded = config.exclude().iter().map(String::as_str).collect();
        Self { config, excluded }
    }

    /// Build the complete document.
    ///
    /// The result depends only on the order and content of the inputs.
    ///
    /// # Errors
    ///
    /// Returns [`SchemadocError::Build`] if two tables or two procedures share
    /// a name, and [`SchemadocError::Render`] if a table cannot be rendered.
    pub fn build(&self, catalog: &Catalog, inventory: &Inventory) -> Result<Document, SchemadocError> {
        info!("Building document model");
        check_unique_names(catalog)?;

        let content = Content {
            tables: self.retain(catalog.tables(), |table| table.name().to_string()),
            procedures: self.retain(catalog.procedures(), |procedure| {
                procedure.name().to_string()
            }),
            endpoints: self.retain(catalog.endpoints(), EndpointDef::key),
            catalog,
            inventory,
        };

        let mut body = Vec::new();
        let mut sections = SectionCounter::root();

        self.executive_summary(&mut body, sections.next_number(), &content);
        self.database_overview(&mut body, sections.next_number(), &content);
        self.entity_relationships(&mut body, sections.next_number(), &content);

        body.push(DocumentNode::PageBreak);
        self.database_tables(&mut body, sections.next_number(), &content)?;

        body.push(DocumentNode::PageBreak);
        self.stored_procedures(&mut body, sections.next_number(), &content)?;

        body.push(DocumentNode::PageBreak);
        self.components(&mut body, sections.next_number(), &content);

        body.push(DocumentNode::PageBreak);
        self.api_endpoints(&mut body, sections.next_number(), &content)?;

        let mut nodes = self.front_matter(&content);
        nodes.extend(self.table_of_contents(&body));
        nodes.push(DocumentNode::PageBreak);
        nodes.extend(body);

        let document = Document::new(nodes);
        info!(nodes = document.len(); "Document model built");
        trace!(document:?; "Built document");

        Ok(document)
    }

    fn is_excluded(&self, key: &str) -> bool {
        self.excluded.contains(key)
    }

    /// Drop excluded entities, keeping input order.
    fn retain<'c, T>(&self, items: &'c [T], key: impl Fn(&T) -> String) -> Vec<&'c T> {
        items
            .iter()
            .filter(|item| {
                let entity = key(*item);
                let keep = !self.is_excluded(&entity);
                if !keep {
                    debug!(entity = entity.as_str(); "Excluded from report");
                }
                keep
            })
            .collect()
    }

    fn front_matter(&self, content: &Content<'_>) -> Vec<DocumentNode> {
        let mut title = TitleNode::new(self.config.title());
        if let Some(subtitle) = self.config.subtitle() {
            title = title.with_subtitle(subtitle);
        }

        let counts = format!(
            "{} tables · {} stored procedures · {} API endpoints · {} component files",
            content.tables.len(),
            content.procedures.len(),
            content.endpoints.len(),
            content.inventory.total_files(),
        );

        vec![
            title.into(),
            ParagraphNode::new(vec![Run::italic(format!(
                "Prepared by {}",
                self.config.author()
            ))])
            .with_alignment(Alignment::Center)
            .into(),
            ParagraphNode::plain(counts)
                .with_alignment(Alignment::Center)
                .into(),
            DocumentNode::PageBreak,
        ]
    }

    /// Table of contents collected from the numbered headings of `body`.
    fn table_of_contents(&self, body: &[DocumentNode]) -> Vec<DocumentNode> {
        let depth = self.config.toc_depth();

        let entries = body.iter().filter_map(|node| match node {
            DocumentNode::Heading(heading)
                if heading.number().is_numbered() && heading.level().depth() <= depth =>
            {
                Some(DocumentNode::from(
                    ParagraphNode::plain(heading.text()).with_indent(heading.level().depth() - 1),
                ))
            }
            _ => None,
        });

        let title = HeadingNode::unnumbered(HeadingLevel::H1, "Table of Contents");
        std::iter::once(DocumentNode::from(title))
            .chain(entries)
            .collect()
    }

    fn executive_summary(
        &self,
        out: &mut Vec<DocumentNode>,
        number: SectionNumber,
        content: &Content<'_>,
    ) {
        out.push(section_heading(number, "Executive Summary"));

        if !self.config.summary().is_empty() {
            out.push(ParagraphNode::plain(self.config.summary()).into());
        }

        out.push(label("Database Statistics:"));
        let inventory = content.inventory;
        let lines = [
            format!("Total Tables: {}", content.tables.len()),
            format!("Total Stored Procedures: {}", content.procedures.len()),
            format!("Total API Endpoints: {}", content.endpoints.len()),
            format!(
                "Components: {} pages, {} reusable components in {} categories",
                inventory.pages().len(),
                inventory.component_count(),
                inventory.components().len(),
            ),
        ];
        out.extend(
            lines
                .into_iter()
                .map(|line| DocumentNode::from(ParagraphNode::plain(line))),
        );
    }

    fn database_overview(
        &self,
        out: &mut Vec<DocumentNode>,
        number: SectionNumber,
        content: &Content<'_>,
    ) {
        out.push(section_heading(number, "Database Overview"));

        out.extend(
            self.config
                .overview()
                .iter()
                .map(|line| DocumentNode::from(ParagraphNode::plain(line.as_str()))),
        );

        let modules = group_by_key(content.tables.iter().copied(), TableDef::module);
        if modules.is_empty() {
            out.push(ParagraphNode::plain("No tables are documented.").into());
            return;
        }

        out.push(label("Core Modules:"));
        for (index, (module, tables)) in modules.iter().enumerate() {
            let line = format!("{}. {module} ({} tables)", index + 1, tables.len());
            out.push(ParagraphNode::plain(line).into());
        }
    }

    fn entity_relationships(
        &self,
        out: &mut Vec<DocumentNode>,
        number: SectionNumber,
        content: &Content<'_>,
    ) {
        out.push(section_heading(number, "Entity Relationships"));

        let mut any = false;
        for table in &content.tables {
            for fk in table.foreign_keys() {
                any = true;
                out.push(ParagraphNode::plain(format!("{}.{fk}", table.name())).into());
            }
        }

        if !any {
            out.push(ParagraphNode::plain("No foreign-key relationships are declared.").into());
        }
    }

    fn database_tables(
        &self,
        out: &mut Vec<DocumentNode>,
        number: SectionNumber,
        content: &Content<'_>,
    ) -> Result<(), SchemadocError> {
        out.push(section_heading(number.clone(), "Database Tables"));

        let mut modules = SectionCounter::under(number);
        for (module, tables) in group_by_key(content.catalog.tables(), TableDef::module) {
            let tables: Vec<&TableDef> = tables
                .into_iter()
                .filter(|table| !self.is_excluded(table.name()))
                .collect();
            if tables.is_empty() {
                debug!(module; "Skipping module without tables");
                continue;
            }

            let module_number = modules.next_number();
            out.push(heading(
                HeadingLevel::H2,
                module_number.clone(),
                format!("{module_number} {module} Module"),
            ));

            let mut table_numbers = SectionCounter::under(module_number);
            for table in tables {
                self.table_section(out, table_numbers.next_number(), table)?;
            }
        }

        if modules.allocated() == 0 {
            out.push(ParagraphNode::plain("No tables are documented.").into());
        }

        Ok(())
    }

    fn table_section(
        &self,
        out: &mut Vec<DocumentNode>,
        number: SectionNumber,
        table: &TableDef,
    ) -> Result<(), SchemadocError> {
        let text = format!("{} {}", number.display_tail(2), table.name());
        out.push(heading(HeadingLevel::H3, number, text));
        out.push(labelled("Description: ", table.description()));
        out.push(column_layout().render(table.columns())?.into());

        if !table.foreign_keys().is_empty() {
            out.push(label("Foreign Keys:"));
            out.extend(
                table
                    .foreign_keys()
                    .iter()
                    .map(|fk| DocumentNode::from(ParagraphNode::plain(fk.to_string()))),
            );
        }

        if !table.indexes().is_empty() {
            out.push(
                ParagraphNode::new(vec![
                    Run::bold("Indexes: "),
                    Run::plain(table.indexes().join(", ")),
                ])
                .into(),
            );
        }

        Ok(())
    }

    fn stored_procedures(
        &self,
        out: &mut Vec<DocumentNode>,
        number: SectionNumber,
        content: &Content<'_>,
    ) -> Result<(), SchemadocError> {
        out.push(section_heading(number.clone(), "Stored Procedures"));

        let mut counter = SectionCounter::under(number);
        for procedure in &content.procedures {
            self.procedure_section(out, counter.next_number(), procedure)?;
        }

        if counter.allocated() == 0 {
            out.push(ParagraphNode::plain("No stored procedures are documented.").into());
        }

        Ok(())
    }

    fn procedure_section(
        &self,
        out: &mut Vec<DocumentNode>,
        number: SectionNumber,
        procedure: &ProcedureDef,
    ) -> Result<(), SchemadocError> {
        let text = format!("{}. {}", number.display_tail(1), procedure.name());
        out.push(heading(HeadingLevel::H2, number, text));
        out.push(
            ParagraphNode::new(vec![Run::italic(format!("Module: {}", procedure.module()))]).into(),
        );
        out.push(labelled("Description: ", procedure.description()));
        out.push(labelled("Returns: ", procedure.returns()));

        if !procedure.parameters().is_empty() {
            out.push(label("Parameters:"));
            out.push(parameter_layout().render(procedure.parameters())?.into());
        }

        out.push(labelled("Business Logic: ", procedure.logic()));
        Ok(())
    }

    fn components(&self, out: &mut Vec<DocumentNode>, number: SectionNumber, content: &Content<'_>) {
        out.push(section_heading(number.clone(), "Components"));

        let inventory = content.inventory;
        if inventory.is_empty() {
            out.push(ParagraphNode::plain("No component files were found.").into());
            return;
        }

        out.push(
            ParagraphNode::plain(format!(
                "{} page files and {} reusable component files in {} categories.",
                inventory.pages().len(),
                inventory.component_count(),
                inventory.components().len(),
            ))
            .into(),
        );

        let mut groups = SectionCounter::under(number);

        if !inventory.pages().is_empty() {
            let group_number = groups.next_number();
            let text = format!(
                "{group_number} Page Components ({} Pages)",
                inventory.pages().len()
            );
            out.push(heading(HeadingLevel::H2, group_number.clone(), text));

            let mut pages = SectionCounter::under(group_number);
            for page in inventory.pages() {
                let page_number = pages.next_number();
                let text = format!("{}. {}", page_number.display_tail(1), page.stem());
                out.push(heading(HeadingLevel::H3, page_number, text));
                out.push(
                    ParagraphNode::new(vec![Run::italic(format!("File Path: {page}"))]).into(),
                );
            }
        } else {
            debug!("No page files, omitting page components heading");
        }

        let buckets: Vec<_> = inventory
            .components()
            .iter()
            .filter(|(_, files)| !files.is_empty())
            .collect();

        if buckets.is_empty() {
            debug!("No component files, omitting reusable components heading");
            return;
        }

        let group_number = groups.next_number();
        let text = format!("{group_number} Reusable Components");
        out.push(heading(HeadingLevel::H2, group_number.clone(), text));

        let mut categories = SectionCounter::under(group_number);
        for (bucket, files) in buckets {
            out.push(heading(
                HeadingLevel::H3,
                categories.next_number(),
                format!("Category: {bucket}"),
            ));
            out.extend(
                files
                    .iter()
                    .map(|file| DocumentNode::from(ParagraphNode::plain(file.relative_path()))),
            );
        }
    }

    fn api_endpoints(
        &self,
        out: &mut Vec<DocumentNode>,
        number: SectionNumber,
        content: &Content<'_>,
    ) -> Result<(), SchemadocError> {
        out.push(section_heading(number.clone(), "API Endpoints"));

        let groups = group_by_key(content.catalog.endpoints(), EndpointDef::module);
        if content.endpoints.is_empty() {
            out.push(ParagraphNode::plain("No API endpoints are documented.").into());
            return Ok(());
        }

        out.push(
            ParagraphNode::plain("The following API endpoints support the frontend functionality:")
                .into(),
        );

        let mut modules = SectionCounter::under(number);
        for (module, endpoints) in groups {
            let records: Vec<EndpointDef> = endpoints
                .into_iter()
                .filter(|endpoint| !self.is_excluded(&endpoint.key()))
                .cloned()
                .collect();
            if records.is_empty() {
                debug!(module; "Skipping module without endpoints");
                continue;
            }

            let module_number = modules.next_number();
            out.push(heading(
                HeadingLevel::H2,
                module_number.clone(),
                format!("{module_number} {module} Endpoints"),
            ));

            out.push(endpoint_layout().render(&records)?.into());
        }

        Ok(())
    }
}

/// Build inputs. The entity lists hold only what survives exclusion.
struct Content<'c> {
    tables: Vec<&'c TableDef>,
    procedures: Vec<&'c ProcedureDef>,
    endpoints: Vec<&'c EndpointDef>,
    catalog: &'c Catalog,
    inventory: &'c Inventory,
}

fn check_unique_names(catalog: &Catalog) -> Result<(), SchemadocError> {
    let mut seen = HashSet::new();
    for table in catalog.tables() {
        if !seen.insert(table.name()) {
            return Err(SchemadocError::Build(format!(
                "table '{}' is defined more than once",
                table.name()
            )));
        }
    }

    let mut seen = HashSet::new();
    for procedure in catalog.procedures() {
        if !seen.insert(procedure.name()) {
            return Err(SchemadocError::Build(format!(
                "procedure '{}' is defined more than once",
                procedure.name()
            )));
        }
    }

    Ok(())
}

fn section_heading(number: SectionNumber, title: &str) -> DocumentNode {
    let text = format!("{number}. {title}");
    heading(HeadingLevel::H1, number, text)
}

fn heading(level: HeadingLevel, number: SectionNumber, text: String) -> DocumentNode {
    HeadingNode::new(level, number, text).into()
}

fn label(text: &str) -> DocumentNode {
    ParagraphNode::new(vec![Run::bold(text)]).into()
}

/// A paragraph `"{prefix}{value}"`, with [`PLACEHOLDER`] for an empty value.
fn labelled(prefix: &str, value: &str) -> DocumentNode {
    let value = if value.is_empty() { PLACEHOLDER } else { value };
    ParagraphNode::plain(format!("{prefix}{value}")).into()
}

#[cfg(test)]
mod tests {
    use schemadoc_core::catalog::{ColumnDef, ForeignKeyDef};

    use super::*;

    fn heading_texts(document: &Document, level: HeadingLevel) -> Vec<String> {
        document
            .headings()
            .filter(|heading| heading.level() == level)
            .map(|heading| heading.text().to_string())
            .collect()
    }

    #[test]
    fn test_top_level_sections_are_numbered_in_order() {
        let config = ReportConfig::default();
        let document = DocumentModelBuilder::new(&config)
            .build(&Catalog::default(), &Inventory::new())
            .unwrap();

        assert_eq!(
            heading_texts(&document, HeadingLevel::H1),
            vec![
                "Table of Contents",
                "1. Executive Summary",
                "2. Database Overview",
                "3. Entity Relationships",
                "4. Database Tables",
                "5. Stored Procedures",
                "6. Components",
                "7. API Endpoints",
            ]
        );
    }

    #[test]
    fn test_duplicate_table_name_is_build_error() {
        let catalog = Catalog::new(
            vec![TableDef::new("users", "Core"), TableDef::new("users", "Auth")],
            Vec::new(),
            Vec::new(),
        );
        let config = ReportConfig::default();

        let err = DocumentModelBuilder::new(&config)
            .build(&catalog, &Inventory::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "build: table 'users' is defined more than once"
        );
    }

    #[test]
    fn test_relationships_list_every_foreign_key() {
        let catalog = Catalog::new(
            vec![
                TableDef::new("sessions", "Core")
                    .with_column(ColumnDef::new("user_id", "BIGINT"))
                    .with_foreign_key(ForeignKeyDef::new("user_id", "users(id)", "CASCADE")),
            ],
            Vec::new(),
            Vec::new(),
        );
        let config = ReportConfig::default();

        let document = DocumentModelBuilder::new(&config)
            .build(&catalog, &Inventory::new())
            .unwrap();

        assert!(
            document
                .text_lines()
                .contains(&"sessions.user_id → users(id) (ON DELETE: CASCADE)".to_string())
        );
    }

    #[test]
    fn test_labelled_uses_placeholder() {
        let DocumentNode::Paragraph(paragraph) = labelled("Returns: ", "") else {
            panic!("expected a paragraph");
        };
        assert_eq!(paragraph.text(), "Returns: -");
    }
}
