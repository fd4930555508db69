//! Component inventory types.
//!
//! An [`Inventory`] is the deterministic result of scanning a UI source tree:
//! page files in one list, reusable component files grouped into buckets
//! keyed by their immediate parent directory. Bucket order is the order in
//! which each key was first encountered, which for a sorted scan is lexical.

use std::fmt;

use indexmap::IndexMap;

/// Bucket key used for component files that sit directly in the components root.
pub const ROOT_BUCKET: &str = "root";

/// A source file path relative to the scan root, always `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentFileRef {
    relative_path: String,
}

impl ComponentFileRef {
    /// Creates a file reference, normalizing `\` separators to `/`.
    pub fn new(relative_path: impl Into<String>) -> Self {
        let relative_path: String = relative_path.into();
        Self {
            relative_path: relative_path.replace('\\', "/"),
        }
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Returns the file name without its directory or extension.
    pub fn stem(&self) -> &str {
        let file_name = self
            .relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path);

        match file_name.rfind('.') {
            Some(0) | None => file_name,
            Some(dot) => &file_name[..dot],
        }
    }
}

impl fmt::Display for ComponentFileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_path)
    }
}

/// Scanned UI source files, partitioned into pages and component buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pages: Vec<ComponentFileRef>,
    components: IndexMap<String, Vec<ComponentFileRef>>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page file.
    pub fn push_page(&mut self, file: ComponentFileRef) {
        self.pages.push(file);
    }

    /// Appends a component file to `bucket`, creating the bucket on first use.
    pub fn push_component(&mut self, bucket: impl Into<String>, file: ComponentFileRef) {
        self.components.entry(bucket.into()).or_default().push(file);
    }

    pub fn pages(&self) -> &[ComponentFileRef] {
        &self.pages
    }

    /// Returns the component buckets in first-seen order.
    pub fn components(&self) -> &IndexMap<String, Vec<ComponentFileRef>> {
        &self.components
    }

    /// Returns the number of component files across all buckets.
    pub fn component_count(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    /// Returns the number of page and component files.
    pub fn total_files(&self) -> usize {
        self.pages.len() + self.component_count()
    }

    pub fn is_empty(&self) -> bool {
        self.total_files() == 0
    }
}
