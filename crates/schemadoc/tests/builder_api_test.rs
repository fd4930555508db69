//! Integration tests for the ReportBuilder API
//!
//! These tests drive the public builder from catalog to DOCX bytes and check
//! the numbering and layout rules of the built report.

use std::{io::Cursor, io::Read, path::PathBuf};

use chrono::{TimeZone, Utc};
use zip::ZipArchive;

use schemadoc::{
    ReportBuilder,
    catalog::{Catalog, ColumnDef, EndpointDef, ForeignKeyDef, ParamDef, ProcedureDef, TableDef},
    config::{AppConfig, PageConfig, ReportConfig, ScanConfig},
    document::{Document, DocumentNode, HeadingLevel},
    inventory::{ComponentFileRef, Inventory},
};

fn demo_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
        .join("catalog.json")
}

fn builder_with_report(report: ReportConfig) -> ReportBuilder {
    ReportBuilder::new(AppConfig::new(
        report,
        ScanConfig::default(),
        PageConfig::default(),
    ))
}

fn table(name: &str, module: &str) -> TableDef {
    TableDef::new(name, module).with_column(ColumnDef::new("id", "BIGINT").with_key("PRIMARY KEY"))
}

fn heading_texts(document: &Document) -> Vec<String> {
    document
        .headings()
        .map(|heading| heading.text().to_string())
        .collect()
}

/// Headings at `level` that are children of the top-level section `section`.
fn headings_under(document: &Document, section: u32, level: HeadingLevel) -> Vec<String> {
    document
        .headings()
        .filter(|heading| heading.level() == level)
        .filter(|heading| heading.number().parts().first() == Some(&section))
        .map(|heading| heading.text().to_string())
        .collect()
}

fn position(texts: &[String], wanted: &str) -> usize {
    texts
        .iter()
        .position(|text| text == wanted)
        .unwrap_or_else(|| panic!("heading '{wanted}' not found in {texts:?}"))
}

#[test]
fn test_builder_api_exists() {
    let _builder = ReportBuilder::default();
}

#[test]
fn test_module_and_table_headings_in_order() {
    let catalog = Catalog::new(
        vec![table("users", "Core"), table("sessions", "Core")],
        Vec::new(),
        Vec::new(),
    );

    let document = ReportBuilder::default()
        .build(&catalog, &Inventory::new())
        .expect("Failed to build");

    let texts = heading_texts(&document);
    let module = position(&texts, "4.1 Core Module");
    let users = position(&texts, "1.1 users");
    let sessions = position(&texts, "1.2 sessions");
    assert!(module < users && users < sessions);
}

#[test]
fn test_non_adjacent_modules_are_coalesced() {
    let catalog = Catalog::new(
        vec![
            table("a", "Core"),
            table("b", "Auth"),
            table("c", "Core"),
        ],
        Vec::new(),
        Vec::new(),
    );

    let document = ReportBuilder::default()
        .build(&catalog, &Inventory::new())
        .unwrap();

    assert_eq!(
        headings_under(&document, 4, HeadingLevel::H2),
        vec!["4.1 Core Module", "4.2 Auth Module"]
    );
    assert_eq!(
        headings_under(&document, 4, HeadingLevel::H3),
        vec!["1.1 a", "1.2 c", "2.1 b"]
    );
}

#[test]
fn test_excluded_module_leaves_no_numbering_gap() {
    let catalog = Catalog::new(
        vec![
            table("t1", "Alpha"),
            table("t2", "Beta"),
            table("t3", "Gamma"),
        ],
        vec![ProcedureDef::new("sp_one", "Alpha"), ProcedureDef::new("sp_two", "Alpha")],
        vec![
            EndpointDef::new("GET", "/a", "Alpha"),
            EndpointDef::new("GET", "/b", "Beta"),
            EndpointDef::new("GET", "/c", "Gamma"),
        ],
    );
    let builder = builder_with_report(
        ReportConfig::default().with_exclude(["t2", "sp_one", "GET /b"]),
    );

    let document = builder.build(&catalog, &Inventory::new()).unwrap();

    let modules = headings_under(&document, 4, HeadingLevel::H2);
    assert_eq!(modules, vec!["4.1 Alpha Module", "4.2 Gamma Module"]);
    assert_eq!(
        headings_under(&document, 4, HeadingLevel::H3),
        vec!["1.1 t1", "2.1 t3"]
    );
    assert_eq!(
        headings_under(&document, 5, HeadingLevel::H2),
        vec!["1. sp_two"]
    );
    assert_eq!(
        headings_under(&document, 7, HeadingLevel::H2),
        vec!["7.1 Alpha Endpoints", "7.2 Gamma Endpoints"]
    );

    let numbers: Vec<u32> = document
        .headings()
        .filter(|heading| heading.level() == HeadingLevel::H2)
        .filter(|heading| heading.number().parts().first() == Some(&4))
        .filter_map(|heading| heading.number().last())
        .collect();
    assert!(numbers.windows(2).all(|pair| pair[1] == pair[0] + 1));
}

#[test]
fn test_foreign_key_block_iff_declared() {
    let catalog = Catalog::new(
        vec![
            table("users", "Core"),
            table("sessions", "Core")
                .with_column(ColumnDef::new("user_id", "BIGINT"))
                .with_foreign_key(ForeignKeyDef::new("user_id", "users(id)", "CASCADE")),
            table("tokens", "Core"),
        ],
        Vec::new(),
        Vec::new(),
    );

    let document = ReportBuilder::default()
        .build(&catalog, &Inventory::new())
        .unwrap();
    let lines = document.text_lines();

    let labels = lines.iter().filter(|line| *line == "Foreign Keys:").count();
    assert_eq!(labels, 1);

    let label = position(&lines, "Foreign Keys:");
    assert!(position(&lines, "1.2 sessions") < label);
    assert!(label < position(&lines, "1.3 tokens"));
    assert_eq!(lines[label + 1], "user_id → users(id) (ON DELETE: CASCADE)");
}

#[test]
fn test_empty_indexes_emit_no_indexes_paragraph() {
    let catalog = Catalog::new(
        vec![
            table("plain", "Core"),
            table("indexed", "Core").with_index("email").with_index("status"),
        ],
        Vec::new(),
        Vec::new(),
    );

    let document = ReportBuilder::default()
        .build(&catalog, &Inventory::new())
        .unwrap();

    let indexes: Vec<String> = document
        .text_lines()
        .into_iter()
        .filter(|line| line.starts_with("Indexes:"))
        .collect();
    assert_eq!(indexes, vec!["Indexes: email, status"]);
}

#[test]
fn test_parameter_table_only_when_parameters_exist() {
    let without = Catalog::new(
        Vec::new(),
        vec![ProcedureDef::new("sp_cleanup", "Jobs").with_returns("INT")],
        Vec::new(),
    );
    let document = ReportBuilder::default()
        .build(&without, &Inventory::new())
        .unwrap();
    assert_eq!(document.tables().count(), 0);
    assert!(!document.text_lines().contains(&"Parameters:".to_string()));

    let with = Catalog::new(
        Vec::new(),
        vec![
            ProcedureDef::new("sp_login", "Auth")
                .with_parameter(ParamDef::new("p_email", "VARCHAR(255)"))
                .with_parameter(ParamDef::new("p_password", "VARCHAR(255)")),
        ],
        Vec::new(),
    );
    let document = ReportBuilder::default()
        .build(&with, &Inventory::new())
        .unwrap();
    let tables: Vec<_> = document.tables().collect();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].row_count(), 3);
}

#[test]
fn test_column_table_has_header_plus_one_row_per_column() {
    let users = TableDef::new("users", "Core")
        .with_column(ColumnDef::new("id", "BIGINT"))
        .with_column(ColumnDef::new("email", "VARCHAR(255)"))
        .with_column(ColumnDef::new("bio", "TEXT").nullable(true));
    let catalog = Catalog::new(vec![users], Vec::new(), Vec::new());

    let document = ReportBuilder::default()
        .build(&catalog, &Inventory::new())
        .unwrap();

    let tables: Vec<_> = document.tables().collect();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].row_count(), 4);
}

#[test]
fn test_component_sections_number_contiguously() {
    let mut inventory = Inventory::new();
    inventory.push_page(ComponentFileRef::new("pages/Home.jsx"));
    inventory.push_component("layout", ComponentFileRef::new("components/layout/Header.jsx"));
    inventory.push_component("layout", ComponentFileRef::new("components/layout/Footer.jsx"));
    inventory.push_component("forms", ComponentFileRef::new("components/forms/Input.jsx"));

    let document = ReportBuilder::default()
        .build(&Catalog::default(), &inventory)
        .unwrap();

    assert_eq!(
        headings_under(&document, 6, HeadingLevel::H2),
        vec!["6.1 Page Components (1 Pages)", "6.2 Reusable Components"]
    );
    assert_eq!(
        headings_under(&document, 6, HeadingLevel::H3),
        vec!["1. Home", "Category: layout", "Category: forms"]
    );

    let mut components_only = Inventory::new();
    components_only.push_component("root", ComponentFileRef::new("components/Button.jsx"));
    let document = ReportBuilder::default()
        .build(&Catalog::default(), &components_only)
        .unwrap();
    assert_eq!(
        headings_under(&document, 6, HeadingLevel::H2),
        vec!["6.1 Reusable Components"]
    );
}

#[test]
fn test_table_of_contents_matches_numbered_headings() {
    let catalog = Catalog::new(
        vec![table("users", "Core")],
        vec![ProcedureDef::new("sp_login", "Auth")],
        vec![EndpointDef::new("POST", "/api/login", "Auth")],
    );

    for depth in 1..=3u8 {
        let builder = builder_with_report(ReportConfig::default().with_toc_depth(depth));
        let document = builder.build(&catalog, &Inventory::new()).unwrap();

        let toc: Vec<String> = document
            .nodes()
            .iter()
            .skip_while(|node| {
                !matches!(node, DocumentNode::Heading(heading) if heading.text() == "Table of Contents")
            })
            .skip(1)
            .take_while(|node| !matches!(node, DocumentNode::PageBreak))
            .filter_map(|node| match node {
                DocumentNode::Paragraph(paragraph) => Some(paragraph.text()),
                _ => None,
            })
            .collect();

        let expected: Vec<String> = document
            .headings()
            .filter(|heading| heading.number().is_numbered())
            .filter(|heading| heading.level().depth() <= depth)
            .map(|heading| heading.text().to_string())
            .collect();

        assert!(!toc.is_empty());
        assert_eq!(toc, expected, "toc_depth = {depth}");
    }
}

#[test]
fn test_duplicate_procedure_is_build_error() {
    let catalog = Catalog::new(
        Vec::new(),
        vec![ProcedureDef::new("sp_a", "X"), ProcedureDef::new("sp_a", "Y")],
        Vec::new(),
    );

    let err = ReportBuilder::default()
        .build(&catalog, &Inventory::new())
        .unwrap_err();
    assert_eq!(err.stage(), schemadoc::Stage::Build);
}

#[test]
fn test_control_character_in_catalog_text_fails_serialization() {
    let catalog = Catalog::new(
        vec![table("users", "Core").with_description("bell\u{7}here")],
        Vec::new(),
        Vec::new(),
    );

    let builder = ReportBuilder::default();
    let document = builder.build(&catalog, &Inventory::new()).unwrap();
    let created = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let err = builder.render_docx(&document, created).unwrap_err();

    assert_eq!(err.stage(), schemadoc::Stage::Serialize);
    assert!(err.to_string().starts_with("serialize: paragraph node "));
    assert!(err.to_string().ends_with("contains U+0007, which XML does not allow"));
}

#[test]
fn test_demo_catalog_renders_deterministically() {
    let builder = ReportBuilder::default();
    let catalog = builder
        .load_catalog(demo_catalog_path())
        .expect("Failed to load demo catalog");

    let first = builder.build(&catalog, &Inventory::new()).unwrap();
    let second = builder.build(&catalog, &Inventory::new()).unwrap();
    assert_eq!(first, second);

    assert_eq!(
        headings_under(&first, 7, HeadingLevel::H2),
        vec![
            "7.1 Authentication Endpoints",
            "7.2 User Management Endpoints",
            "7.3 Project Management Endpoints",
        ]
    );

    let created = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let bytes = builder.render_docx(&first, created).unwrap();
    assert_eq!(bytes, builder.render_docx(&second, created).unwrap());

    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    assert!(xml.contains("4.1 User Management Module"));
    assert!(xml.contains("sp_authenticate_user"));
}
