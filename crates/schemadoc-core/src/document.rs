//! Document node model.
//!
//! This module contains the intermediate representation that sits between the
//! model builder and the serializer. A [`Document`] is an ordered list of
//! [`DocumentNode`]s; node order is output order.
//!
//! # Pipeline Position
//!
//! ```text
//! Catalog + Inventory
//!     ↓ model builder
//! Document (these types)
//!     ↓ export
//! DOCX package
//! ```
//!
//! [`DocumentNode`] is a closed sum type. Serializers match on it without a
//! wildcard arm, so adding a variant is a compile error in every backend
//! until the backend handles it.

mod section;

pub use section::{SectionCounter, SectionNumber};

/// The root of a generated report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    nodes: Vec<DocumentNode>,
}

impl Document {
    pub fn new(nodes: Vec<DocumentNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[DocumentNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every heading in document order.
    pub fn headings(&self) -> impl Iterator<Item = &HeadingNode> {
        self.nodes.iter().filter_map(|node| match node {
            DocumentNode::Heading(heading) => Some(heading),
            _ => None,
        })
    }

    /// Iterates over every table in document order.
    pub fn tables(&self) -> impl Iterator<Item = &TableNode> {
        self.nodes.iter().filter_map(|node| match node {
            DocumentNode::Table(table) => Some(table),
            _ => None,
        })
    }

    /// Returns the plain text of every node that carries text, in order.
    ///
    /// Table cells are included row by row. Page breaks contribute nothing.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for node in &self.nodes {
            match node {
                DocumentNode::Title(title) => {
                    lines.push(title.title().to_string());
                    if let Some(subtitle) = title.subtitle() {
                        lines.push(subtitle.to_string());
                    }
                }
                DocumentNode::Heading(heading) => lines.push(heading.text().to_string()),
                DocumentNode::Paragraph(paragraph) => lines.push(paragraph.text()),
                DocumentNode::Table(table) => {
                    for row in table.all_rows() {
                        lines.extend(row.iter().map(|cell| cell.text().to_string()));
                    }
                }
                DocumentNode::PageBreak => {}
            }
        }
        lines
    }
}

/// One element of the report.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Title(TitleNode),
    Heading(HeadingNode),
    Paragraph(ParagraphNode),
    Table(TableNode),
    PageBreak,
}

impl DocumentNode {
    /// Returns a short name for the variant, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Heading(_) => "heading",
            Self::Paragraph(_) => "paragraph",
            Self::Table(_) => "table",
            Self::PageBreak => "page break",
        }
    }
}

impl From<TitleNode> for DocumentNode {
    fn from(node: TitleNode) -> Self {
        Self::Title(node)
    }
}

impl From<HeadingNode> for DocumentNode {
    fn from(node: HeadingNode) -> Self {
        Self::Heading(node)
    }
}

impl From<ParagraphNode> for DocumentNode {
    fn from(node: ParagraphNode) -> Self {
        Self::Paragraph(node)
    }
}

impl From<TableNode> for DocumentNode {
    fn from(node: TableNode) -> Self {
        Self::Table(node)
    }
}

/// The report title block on the first page.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleNode {
    title: String,
    subtitle: Option<String>,
}

impl TitleNode {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }
}

/// Heading depth. Reports use at most three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Returns the numeric depth, starting at 1.
    pub fn depth(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

/// A section heading.
///
/// `number` is the full positional path of the section; `text` is what the
/// reader sees, which may show only part of that path.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingNode {
    level: HeadingLevel,
    number: SectionNumber,
    text: String,
}

impl HeadingNode {
    pub fn new(level: HeadingLevel, number: SectionNumber, text: impl Into<String>) -> Self {
        Self {
            level,
            number,
            text: text.into(),
        }
    }

    /// Creates a heading that takes no part in numbering.
    pub fn unnumbered(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self::new(level, SectionNumber::default(), text)
    }

    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    pub fn number(&self) -> &SectionNumber {
        &self.number
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// A run of uniformly formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    text: String,
    bold: bool,
    italic: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(text)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }
}

/// A paragraph of one or more runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphNode {
    runs: Vec<Run>,
    alignment: Alignment,
    indent: u8,
}

impl ParagraphNode {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            alignment: Alignment::Left,
            indent: 0,
        }
    }

    /// Creates a paragraph holding a single unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Run::plain(text)])
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the indentation step; each step is rendered as a fixed width.
    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn indent(&self) -> u8 {
        self.indent
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    text: String,
    bold: bool,
}

impl TableCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }
}

/// A table with one header row and zero or more body rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableNode {
    header: Vec<TableCell>,
    rows: Vec<Vec<TableCell>>,
}

impl TableNode {
    pub fn new(header: Vec<TableCell>, rows: Vec<Vec<TableCell>>) -> Self {
        Self { header, rows }
    }

    pub fn header(&self) -> &[TableCell] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<TableCell>] {
        &self.rows
    }

    /// Number of columns, taken from the header row.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Number of rows including the header row.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Iterates over the header row followed by every body row.
    pub fn all_rows(&self) -> impl Iterator<Item = &[TableCell]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> TableNode {
        TableNode::new(
            vec![TableCell::header("Method"), TableCell::header("Endpoint")],
            vec![
                vec![TableCell::new("GET"), TableCell::new("/api/a")],
                vec![TableCell::new("POST"), TableCell::new("/api/b")],
            ],
        )
    }

    #[test]
    fn test_table_row_count_includes_header() {
        let table = sample_table();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.all_rows().count(), 3);
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_paragraph_text_joins_runs() {
        let paragraph = ParagraphNode::new(vec![Run::bold("Indexes: "), Run::plain("a, b")]);
        assert_eq!(paragraph.text(), "Indexes: a, b");
    }

    #[test]
    fn test_document_text_lines_in_order() {
        let document = Document::new(vec![
            DocumentNode::from(TitleNode::new("Report").with_subtitle("Design")),
            DocumentNode::PageBreak,
            HeadingNode::new(HeadingLevel::H1, SectionNumber::new(vec![1]), "1. Intro").into(),
            ParagraphNode::plain("Body").into(),
            sample_table().into(),
        ]);

        let lines = document.text_lines();
        assert_eq!(
            lines,
            vec![
                "Report", "Design", "1. Intro", "Body", "Method", "Endpoint", "GET", "/api/a",
                "POST", "/api/b",
            ]
        );
        assert_eq!(document.headings().count(), 1);
        assert_eq!(document.tables().count(), 1);
    }

    #[test]
    fn test_heading_level_depth() {
        assert_eq!(HeadingLevel::H1.depth(), 1);
        assert_eq!(HeadingLevel::H3.depth(), 3);
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
    }
}
