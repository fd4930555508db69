//! Package parts whose shape does not depend on the document body.

use super::{DocumentMetadata, xml::PartWriter};
use crate::export::Error;

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CORE: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const NS_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";
pub(super) const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const APPLICATION: &str = "Schemadoc";

pub(super) fn content_types() -> Result<Vec<u8>, Error> {
    let mut part = PartWriter::new()?;
    part.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    part.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    part.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;

    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];
    for (name, content_type) in overrides {
        part.empty(
            "Override",
            &[("PartName", name), ("ContentType", content_type)],
        )?;
    }

    part.end("Types")?;
    Ok(part.finish())
}

pub(super) fn package_relationships() -> Result<Vec<u8>, Error> {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
        ("rId2", REL_CORE, "docProps/core.xml"),
        ("rId3", REL_EXTENDED, "docProps/app.xml"),
    ])
}

pub(super) fn document_relationships() -> Result<Vec<u8>, Error> {
    relationships(&[("rId1", REL_STYLES, "styles.xml")])
}

fn relationships(entries: &[(&str, &str, &str)]) -> Result<Vec<u8>, Error> {
    let mut part = PartWriter::new()?;
    part.start("Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    for &(id, kind, target) in entries {
        part.empty(
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    part.end("Relationships")?;
    Ok(part.finish())
}

/// Core properties. The creation time appears only here.
pub(super) fn core_properties(metadata: &DocumentMetadata) -> Result<Vec<u8>, Error> {
    let timestamp = metadata
        .created()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string();

    let mut part = PartWriter::new()?;
    part.start(
        "cp:coreProperties",
        &[
            ("xmlns:cp", NS_CORE),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    part.element("dc:title", &[], metadata.title())?;
    part.element("dc:creator", &[], metadata.author())?;
    part.element("dc:description", &[], metadata.description())?;
    part.element(
        "dcterms:created",
        &[("xsi:type", "dcterms:W3CDTF")],
        &timestamp,
    )?;
    part.element(
        "dcterms:modified",
        &[("xsi:type", "dcterms:W3CDTF")],
        &timestamp,
    )?;
    part.end("cp:coreProperties")?;
    Ok(part.finish())
}

pub(super) fn app_properties() -> Result<Vec<u8>, Error> {
    let mut part = PartWriter::new()?;
    part.start("Properties", &[("xmlns", NS_EXTENDED)])?;
    part.element("Application", &[], APPLICATION)?;
    part.element("DocSecurity", &[], "0")?;
    part.end("Properties")?;
    Ok(part.finish())
}

/// A paragraph style: id, display name, size in half-points, bold, italic,
/// centered, outline level.
struct ParagraphStyle {
    id: &'static str,
    name: &'static str,
    size: &'static str,
    bold: bool,
    italic: bool,
    centered: bool,
    outline: Option<&'static str>,
}

const PARAGRAPH_STYLES: [ParagraphStyle; 5] = [
    ParagraphStyle {
        id: "Title",
        name: "Title",
        size: "56",
        bold: true,
        italic: false,
        centered: true,
        outline: None,
    },
    ParagraphStyle {
        id: "Subtitle",
        name: "Subtitle",
        size: "28",
        bold: false,
        italic: true,
        centered: true,
        outline: None,
    },
    ParagraphStyle {
        id: "Heading1",
        name: "heading 1",
        size: "32",
        bold: true,
        italic: false,
        centered: false,
        outline: Some("0"),
    },
    ParagraphStyle {
        id: "Heading2",
        name: "heading 2",
        size: "28",
        bold: true,
        italic: false,
        centered: false,
        outline: Some("1"),
    },
    ParagraphStyle {
        id: "Heading3",
        name: "heading 3",
        size: "24",
        bold: true,
        italic: false,
        centered: false,
        outline: Some("2"),
    },
];

pub(super) fn styles() -> Result<Vec<u8>, Error> {
    let mut part = PartWriter::new()?;
    part.start("w:styles", &[("xmlns:w", NS_MAIN)])?;

    part.start("w:docDefaults", &[])?;
    part.start("w:rPrDefault", &[])?;
    part.start("w:rPr", &[])?;
    part.empty(
        "w:rFonts",
        &[
            ("w:ascii", "Calibri"),
            ("w:hAnsi", "Calibri"),
            ("w:cs", "Calibri"),
        ],
    )?;
    part.empty("w:sz", &[("w:val", "22")])?;
    part.end("w:rPr")?;
    part.end("w:rPrDefault")?;
    part.start("w:pPrDefault", &[])?;
    part.start("w:pPr", &[])?;
    part.empty("w:spacing", &[("w:after", "120")])?;
    part.end("w:pPr")?;
    part.end("w:pPrDefault")?;
    part.end("w:docDefaults")?;

    part.start(
        "w:style",
        &[
            ("w:type", "paragraph"),
            ("w:default", "1"),
            ("w:styleId", "Normal"),
        ],
    )?;
    part.empty("w:name", &[("w:val", "Normal")])?;
    part.end("w:style")?;

    for style in &PARAGRAPH_STYLES {
        paragraph_style(&mut part, style)?;
    }

    part.start(
        "w:style",
        &[("w:type", "table"), ("w:styleId", "TableGrid")],
    )?;
    part.empty("w:name", &[("w:val", "Table Grid")])?;
    part.start("w:tblPr", &[])?;
    part.start("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        part.empty(
            edge,
            &[
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:space", "0"),
                ("w:color", "auto"),
            ],
        )?;
    }
    part.end("w:tblBorders")?;
    part.end("w:tblPr")?;
    part.end("w:style")?;

    part.end("w:styles")?;
    Ok(part.finish())
}

fn paragraph_style(part: &mut PartWriter, style: &ParagraphStyle) -> Result<(), Error> {
    part.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:styleId", style.id)],
    )?;
    part.empty("w:name", &[("w:val", style.name)])?;
    part.empty("w:basedOn", &[("w:val", "Normal")])?;
    part.empty("w:next", &[("w:val", "Normal")])?;
    part.empty("w:qFormat", &[])?;

    part.start("w:pPr", &[])?;
    part.empty("w:keepNext", &[])?;
    part.empty("w:spacing", &[("w:before", "240"), ("w:after", "120")])?;
    if style.centered {
        part.empty("w:jc", &[("w:val", "center")])?;
    }
    if let Some(level) = style.outline {
        part.empty("w:outlineLvl", &[("w:val", level)])?;
    }
    part.end("w:pPr")?;

    part.start("w:rPr", &[])?;
    if style.bold {
        part.empty("w:b", &[])?;
    }
    if style.italic {
        part.empty("w:i", &[])?;
    }
    part.empty("w:sz", &[("w:val", style.size)])?;
    part.end("w:rPr")?;

    part.end("w:style")
}
