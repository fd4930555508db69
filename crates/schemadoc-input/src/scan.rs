//! Component inventory scanning.
//!
//! [`scan_inventory`] walks a UI source tree depth-first and returns an
//! [`Inventory`]. Files whose extension matches [`ScanConfig::extensions`]
//! are partitioned into:
//!
//! - the page bucket, for files under [`ScanConfig::pages_dir`];
//! - component buckets keyed by the immediate parent directory name, for
//!   files under [`ScanConfig::components_dir`]. Files directly inside the
//!   components directory use the key [`ROOT_BUCKET`].
//!
//! Other matching files are not documented.
//!
//! The result does not depend on traversal order or platform: relative paths
//! are normalized to `/` and sorted lexically before partitioning. The scan
//! only reads the tree and aborts on the first error.

use std::path::{Component, Path, PathBuf};

use log::{debug, info, trace};
use serde::Deserialize;
use walkdir::{DirEntry, WalkDir};

use schemadoc_core::inventory::{ComponentFileRef, Inventory, ROOT_BUCKET};

use crate::error::ScanError;

/// Options controlling which files are inventoried and how they are bucketed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to include, without the leading dot.
    extensions: Vec<String>,

    /// Directory, relative to the scan root, holding page files.
    pages_dir: String,

    /// Directory, relative to the scan root, holding reusable components.
    components_dir: String,

    /// Directory names pruned from the walk wherever they occur.
    exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["js", "jsx", "ts", "tsx"].map(String::from).to_vec(),
            pages_dir: "pages".to_string(),
            components_dir: "components".to_string(),
            exclude_dirs: ["node_modules", ".git"].map(String::from).to_vec(),
        }
    }
}

impl ScanConfig {
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pages_dir(mut self, pages_dir: impl Into<String>) -> Self {
        self.pages_dir = pages_dir.into();
        self
    }

    pub fn with_components_dir(mut self, components_dir: impl Into<String>) -> Self {
        self.components_dir = components_dir.into();
        self
    }

    pub fn with_exclude_dirs<I, S>(mut self, exclude_dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = exclude_dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn pages_dir(&self) -> &str {
        &self.pages_dir
    }

    pub fn components_dir(&self) -> &str {
        &self.components_dir
    }

    pub fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted == ext))
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude_dirs.iter().any(|excluded| excluded == name))
    }
}

/// Walk `root` and build the component inventory.
///
/// # Errors
///
/// Returns [`ScanError::NotFound`] if `root` does not exist,
/// [`ScanError::NotADirectory`] if it is a file, and [`ScanError::Walk`] for
/// the first unreadable entry. No partial inventory is returned.
pub fn scan_inventory(root: impl AsRef<Path>, config: &ScanConfig) -> Result<Inventory, ScanError> {
    let root = root.as_ref();
    info!(root = root.display().to_string(); "Scanning component tree");

    if !root.exists() {
        return Err(ScanError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let paths = collect_matching_paths(root, config)?;
    let inventory = partition(&paths, config);

    info!(
        files = paths.len(),
        pages = inventory.pages().len(),
        components = inventory.component_count(),
        buckets = inventory.components().len();
        "Component tree scanned"
    );

    Ok(inventory)
}

/// Collect `/`-separated relative paths of matching files, sorted lexically.
fn collect_matching_paths(root: &Path, config: &ScanConfig) -> Result<Vec<String>, ScanError> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !config.is_excluded_dir(entry));

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| walk_error(root, err))?;
        if !entry.file_type().is_file() || !config.matches_extension(entry.path()) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative = normalize(relative);
        trace!(path = relative; "Matched file");
        paths.push(relative);
    }

    paths.sort();
    Ok(paths)
}

fn walk_error(root: &Path, err: walkdir::Error) -> ScanError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));

    ScanError::Walk { path, source }
}

/// Join the normal components of `path` with `/`.
fn normalize(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Split sorted relative paths into the page list and component buckets.
fn partition(paths: &[String], config: &ScanConfig) -> Inventory {
    let pages_prefix = dir_prefix(config.pages_dir());
    let components_prefix = dir_prefix(config.components_dir());

    let mut inventory = Inventory::new();
    let mut skipped = 0usize;

    for path in paths {
        if path.starts_with(&pages_prefix) {
            inventory.push_page(ComponentFileRef::new(path.as_str()));
        } else if let Some(rest) = path.strip_prefix(&components_prefix) {
            let bucket = bucket_key(rest);
            inventory.push_component(bucket, ComponentFileRef::new(path.as_str()));
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        debug!(skipped; "Files outside the pages and components directories were not inventoried");
    }

    inventory
}

fn dir_prefix(dir: &str) -> String {
    let trimmed = normalize(&PathBuf::from(dir));
    format!("{trimmed}/")
}

/// Immediate parent directory name of a path relative to the components root.
fn bucket_key(relative_to_components: &str) -> &str {
    let mut parts = relative_to_components.rsplit('/');
    parts.next();
    parts.next().unwrap_or(ROOT_BUCKET)
}
