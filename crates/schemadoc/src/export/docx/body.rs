//! `word/document.xml`: the report body.

use log::trace;

use schemadoc_core::document::{
    Alignment, Document, DocumentNode, HeadingLevel, HeadingNode, ParagraphNode, Run, TableNode,
    TitleNode,
};

use super::{
    parts::NS_MAIN,
    xml::{PartWriter, disallowed_char},
};
use crate::{config::PageConfig, export::Error};

/// Left indent per paragraph indent step, in twips.
const INDENT_STEP: u32 = 360;

/// Serializes `document` in node order, closing with the page section.
pub(super) fn document_part(document: &Document, page: &PageConfig) -> Result<Vec<u8>, Error> {
    let mut body = BodyWriter {
        part: PartWriter::new()?,
        page,
        tables: 0,
        position: 0,
        kind: "",
    };

    body.part.start("w:document", &[("xmlns:w", NS_MAIN)])?;
    body.part.start("w:body", &[])?;

    for node in document.nodes() {
        body.node(node)?;
    }

    body.section_properties()?;
    body.part.end("w:body")?;
    body.part.end("w:document")?;

    Ok(body.part.finish())
}

struct BodyWriter<'a> {
    part: PartWriter,
    page: &'a PageConfig,
    /// Tables written so far, used to name a failing table.
    tables: usize,
    /// One-based position and kind of the node being written.
    position: usize,
    kind: &'static str,
}

impl BodyWriter<'_> {
    fn node(&mut self, node: &DocumentNode) -> Result<(), Error> {
        self.position += 1;
        self.kind = node.kind();
        trace!(position = self.position, kind = self.kind; "Writing node");
        match node {
            DocumentNode::Title(title) => self.title(title),
            DocumentNode::Heading(heading) => self.heading(heading),
            DocumentNode::Paragraph(paragraph) => self.paragraph(paragraph),
            DocumentNode::Table(table) => self.table(table),
            DocumentNode::PageBreak => self.page_break(),
        }
    }

    fn title(&mut self, title: &TitleNode) -> Result<(), Error> {
        self.styled_paragraph("Title", title.title())?;
        if let Some(subtitle) = title.subtitle() {
            self.styled_paragraph("Subtitle", subtitle)?;
        }
        Ok(())
    }

    fn heading(&mut self, heading: &HeadingNode) -> Result<(), Error> {
        let style = match heading.level() {
            HeadingLevel::H1 => "Heading1",
            HeadingLevel::H2 => "Heading2",
            HeadingLevel::H3 => "Heading3",
        };
        self.styled_paragraph(style, heading.text())
    }

    fn styled_paragraph(&mut self, style: &str, text: &str) -> Result<(), Error> {
        self.part.start("w:p", &[])?;
        self.part.start("w:pPr", &[])?;
        self.part.empty("w:pStyle", &[("w:val", style)])?;
        self.part.end("w:pPr")?;
        self.run(&Run::plain(text))?;
        self.part.end("w:p")
    }

    fn paragraph(&mut self, paragraph: &ParagraphNode) -> Result<(), Error> {
        self.part.start("w:p", &[])?;

        let centered = paragraph.alignment() == Alignment::Center;
        if centered || paragraph.indent() > 0 {
            self.part.start("w:pPr", &[])?;
            if paragraph.indent() > 0 {
                let left = (u32::from(paragraph.indent()) * INDENT_STEP).to_string();
                self.part.empty("w:ind", &[("w:left", left.as_str())])?;
            }
            if centered {
                self.part.empty("w:jc", &[("w:val", "center")])?;
            }
            self.part.end("w:pPr")?;
        }

        for run in paragraph.runs() {
            self.run(run)?;
        }

        self.part.end("w:p")
    }

    fn run(&mut self, run: &Run) -> Result<(), Error> {
        if let Some(c) = disallowed_char(run.text()) {
            return Err(Error::Serialization(format!(
                "{} node {} contains U+{:04X}, which XML does not allow",
                self.kind,
                self.position,
                u32::from(c)
            )));
        }
        self.part.start("w:r", &[])?;
        if run.is_bold() || run.is_italic() {
            self.part.start("w:rPr", &[])?;
            if run.is_bold() {
                self.part.empty("w:b", &[])?;
            }
            if run.is_italic() {
                self.part.empty("w:i", &[])?;
            }
            self.part.end("w:rPr")?;
        }
        self.part
            .element("w:t", &[("xml:space", "preserve")], run.text())?;
        self.part.end("w:r")
    }

    fn table(&mut self, table: &TableNode) -> Result<(), Error> {
        self.tables += 1;
        let width = table.width();
        if width == 0 {
            return Err(Error::Serialization(format!(
                "table {} has no columns",
                self.tables
            )));
        }
        if let Some((index, row)) = table
            .rows()
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(Error::Serialization(format!(
                "table {} row {} has {} cells, expected {width}",
                self.tables,
                index + 1,
                row.len()
            )));
        }

        let column_width = (self.page.content_width() / width as u32).to_string();
        let table_width = self.page.content_width().to_string();

        self.part.start("w:tbl", &[])?;
        self.part.start("w:tblPr", &[])?;
        self.part.empty("w:tblStyle", &[("w:val", "TableGrid")])?;
        self.part
            .empty("w:tblW", &[("w:w", table_width.as_str()), ("w:type", "dxa")])?;
        self.part.end("w:tblPr")?;

        self.part.start("w:tblGrid", &[])?;
        for _ in 0..width {
            self.part.empty("w:gridCol", &[("w:w", column_width.as_str())])?;
        }
        self.part.end("w:tblGrid")?;

        for (index, row) in table.all_rows().enumerate() {
            self.part.start("w:tr", &[])?;
            if index == 0 {
                self.part.start("w:trPr", &[])?;
                self.part.empty("w:tblHeader", &[])?;
                self.part.end("w:trPr")?;
            }
            for cell in row {
                self.part.start("w:tc", &[])?;
                self.part.start("w:tcPr", &[])?;
                self.part
                    .empty("w:tcW", &[("w:w", column_width.as_str()), ("w:type", "dxa")])?;
                self.part.end("w:tcPr")?;
                self.part.start("w:p", &[])?;
                let run = if cell.is_bold() {
                    Run::bold(cell.text())
                } else {
                    Run::plain(cell.text())
                };
                self.run(&run)?;
                self.part.end("w:p")?;
                self.part.end("w:tc")?;
            }
            self.part.end("w:tr")?;
        }

        self.part.end("w:tbl")
    }

    fn page_break(&mut self) -> Result<(), Error> {
        self.part.start("w:p", &[])?;
        self.part.start("w:r", &[])?;
        self.part.empty("w:br", &[("w:type", "page")])?;
        self.part.end("w:r")?;
        self.part.end("w:p")
    }

    fn section_properties(&mut self) -> Result<(), Error> {
        let width = self.page.width().to_string();
        let height = self.page.height().to_string();
        let margin = self.page.margin().to_string();

        self.part.start("w:sectPr", &[])?;
        self.part
            .empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
        self.part.empty(
            "w:pgMar",
            &[
                ("w:top", margin.as_str()),
                ("w:right", margin.as_str()),
                ("w:bottom", margin.as_str()),
                ("w:left", margin.as_str()),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        )?;
        self.part.end("w:sectPr")
    }
}

#[cfg(test)]
mod tests {
    use schemadoc_core::document::{SectionNumber, TableCell};

    use super::*;

    fn render(nodes: Vec<DocumentNode>) -> Result<String, Error> {
        let bytes = document_part(&Document::new(nodes), &PageConfig::default())?;
        Ok(String::from_utf8(bytes).unwrap())
    }

    #[test]
    fn test_nodes_are_written_in_order() {
        let xml = render(vec![
            HeadingNode::new(HeadingLevel::H1, SectionNumber::top(1), "1. First").into(),
            ParagraphNode::plain("between").into(),
            HeadingNode::new(HeadingLevel::H2, SectionNumber::new(vec![1, 1]), "1.1 Second")
                .into(),
        ])
        .unwrap();

        let first = xml.find("1. First").unwrap();
        let between = xml.find("between").unwrap();
        let second = xml.find("1.1 Second").unwrap();
        assert!(first < between && between < second);
        assert!(xml.contains("<w:pStyle w:val=\"Heading2\"/>"));
    }

    #[test]
    fn test_page_geometry_comes_from_config() {
        let xml = render(Vec::new()).unwrap();
        assert!(xml.contains("<w:pgSz w:w=\"12240\" w:h=\"15840\"/>"));
        assert!(xml.contains("w:top=\"1440\""));
    }

    #[test]
    fn test_runs_preserve_space_and_formatting() {
        let xml = render(vec![
            ParagraphNode::new(vec![Run::bold("Indexes: "), Run::plain("idx_a")])
                .with_alignment(Alignment::Center)
                .into(),
        ])
        .unwrap();

        assert!(xml.contains(
            "<w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">Indexes: </w:t></w:r>"
        ));
        assert!(xml.contains("<w:jc w:val=\"center\"/>"));
    }

    #[test]
    fn test_ragged_table_is_rejected() {
        let table = TableNode::new(
            vec![TableCell::header("A"), TableCell::header("B")],
            vec![vec![TableCell::new("only one")]],
        );

        let err = render(vec![table.into()]).unwrap_err();
        assert_eq!(err.to_string(), "table 1 row 1 has 1 cells, expected 2");
    }

    #[test]
    fn test_table_without_columns_is_rejected() {
        let table = TableNode::new(Vec::new(), Vec::new());

        let err = render(vec![ParagraphNode::plain("x").into(), table.into()]).unwrap_err();
        assert_eq!(err.to_string(), "table 1 has no columns");
    }

    #[test]
    fn test_control_character_in_text_is_rejected() {
        let err = render(vec![
            HeadingNode::new(HeadingLevel::H1, SectionNumber::top(1), "1. Tables").into(),
            ParagraphNode::plain("Description: bell\u{7}here").into(),
        ])
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "paragraph node 2 contains U+0007, which XML does not allow"
        );
    }

    #[test]
    fn test_control_character_in_table_cell_is_rejected() {
        let table = TableNode::new(
            vec![TableCell::header("Description")],
            vec![vec![TableCell::new("nul\u{0}byte")]],
        );

        let err = render(vec![table.into()]).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert_eq!(
            err.to_string(),
            "table node 1 contains U+0000, which XML does not allow"
        );
    }

    #[test]
    fn test_tabs_and_newlines_are_kept() {
        let xml = render(vec![ParagraphNode::plain("a\tb\nc").into()]).unwrap();
        assert!(xml.contains("a\tb\nc"));
    }
}
