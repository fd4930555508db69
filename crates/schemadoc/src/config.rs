//! Configuration types for Schemadoc report generation.
//!
//! This module provides configuration structures that control what the
//! report says and how it is laid out. All types implement
//! [`serde::Deserialize`] for loading from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining report, scan and page settings.
//! - [`ReportConfig`] - Title page text, front matter prose, table of contents depth and exclusions.
//! - [`ScanConfig`] - Which source files are inventoried (re-exported from `schemadoc-input`).
//! - [`PageConfig`] - Fixed page dimensions and margins, in twentieths of a point.
//!
//! # Example
//!
//! ```
//! # use schemadoc::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.page().margin(), 1440);
//! assert_eq!(config.report().toc_depth(), 2);
//! ```

use serde::Deserialize;

pub use schemadoc_input::ScanConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report content section.
    #[serde(default)]
    report: ReportConfig,

    /// Component scan section.
    #[serde(default)]
    scan: ScanConfig,

    /// Page layout section.
    #[serde(default)]
    page: PageConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(report: ReportConfig, scan: ScanConfig, page: PageConfig) -> Self {
        Self { report, scan, page }
    }

    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    pub fn scan(&self) -> &ScanConfig {
        &self.scan
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }
}

/// Report content settings.
///
/// Everything here is prose or presentation; the documented entities always
/// come from the catalog and the inventory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title shown on the first page and stored in the package properties.
    title: String,

    /// Optional line under the title.
    subtitle: Option<String>,

    /// Author stored in the package properties.
    author: String,

    /// Description stored in the package properties.
    description: String,

    /// Executive summary paragraph.
    summary: String,

    /// Lines listed at the top of the database overview.
    overview: Vec<String>,

    /// Deepest heading level listed in the table of contents (1-3).
    toc_depth: u8,

    /// Entity keys left out of the report: table names, procedure names, or
    /// `"METHOD path"` for endpoints.
    exclude: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Technical Design".to_string(),
            subtitle: Some("Database, Components & API Reference".to_string()),
            author: "Schemadoc".to_string(),
            description: "Database tables, stored procedures, components and API endpoints"
                .to_string(),
            summary: String::new(),
            overview: Vec::new(),
            toc_depth: 2,
            exclude: Vec::new(),
        }
    }
}

impl ReportConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_subtitle(mut self, subtitle: Option<String>) -> Self {
        self.subtitle = subtitle;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_overview(mut self, overview: Vec<String>) -> Self {
        self.overview = overview;
        self
    }

    pub fn with_toc_depth(mut self, toc_depth: u8) -> Self {
        self.toc_depth = toc_depth;
        self
    }

    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = exclude.into_iter().map(Into::into).collect();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref().filter(|subtitle| !subtitle.is_empty())
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn overview(&self) -> &[String] {
        &self.overview
    }

    /// Returns the table of contents depth clamped to 1-3.
    pub fn toc_depth(&self) -> u8 {
        self.toc_depth.clamp(1, 3)
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }
}

/// Page geometry in twips (1/1440 inch).
///
/// These values are fixed configuration; the serializer never derives them
/// from content. The default is US Letter with one-inch margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 12240,
            height: 15840,
            margin: 1440,
        }
    }
}

impl PageConfig {
    pub fn new(width: u32, height: u32, margin: u32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Usable width between the left and right margins.
    pub fn content_width(&self) -> u32 {
        self.width.saturating_sub(self.margin.saturating_mul(2))
    }
}
