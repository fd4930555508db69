//! CLI logic for the Schemadoc report generator.
//!
//! [`run`] drives one report through every stage: configuration, catalog
//! load, source scan, model build, DOCX serialization, and the final write.

mod args;
mod config;

pub use args::Args;

use std::{
    fmt,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use log::{debug, info};
use tempfile::NamedTempFile;

use schemadoc::{ReportBuilder, SchemadocError};

/// Counts and destination of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub tables: usize,
    pub procedures: usize,
    pub endpoints: usize,
    pub components: usize,
    pub output: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report written to {}", self.output.display())?;
        writeln!(f, "  Tables:            {}", self.tables)?;
        writeln!(f, "  Stored procedures: {}", self.procedures)?;
        writeln!(f, "  API endpoints:     {}", self.endpoints)?;
        write!(f, "  Component files:   {}", self.components)
    }
}

/// Run the Schemadoc CLI application
///
/// Loads the catalog named by `args.schema`, scans `args.src`, and writes the
/// report to `args.out`. The output is written to a temporary file beside the
/// destination and renamed into place, so `args.out` is either the complete
/// report or untouched.
///
/// # Errors
///
/// Returns `SchemadocError` for:
/// - Configuration loading errors
/// - Missing or malformed catalog
/// - Missing or unreadable source tree
/// - Build, render and serialization errors
/// - Output write errors
pub fn run(args: &Args) -> Result<RunSummary, SchemadocError> {
    info!(
        schema_path = args.schema,
        src_path = args.src,
        output_path = args.out;
        "Generating report"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = ReportBuilder::new(app_config);

    let catalog = builder.load_catalog(&args.schema)?;
    let inventory = builder.scan(&args.src)?;

    let document = builder.build(&catalog, &inventory)?;
    let bytes = builder.render_docx(&document, Utc::now())?;

    let output = PathBuf::from(&args.out);
    write_atomically(&output, &bytes)?;

    info!(output_file = args.out; "Report exported successfully");

    Ok(RunSummary {
        tables: catalog.tables().len(),
        procedures: catalog.procedures().len(),
        endpoints: catalog.endpoints().len(),
        components: inventory.total_files(),
        output,
    })
}

/// Write `bytes` to `path` through a temporary file in the same directory.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), SchemadocError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)
        .map_err(|err| SchemadocError::new_write_error(path, err))?;
    debug!(temp_path = temp_file.path().display().to_string(); "Writing to temporary file");

    temp_file
        .write_all(bytes)
        .and_then(|()| temp_file.as_file().sync_all())
        .map_err(|err| SchemadocError::new_write_error(path, err))?;

    temp_file
        .persist(path)
        .map_err(|err| SchemadocError::new_write_error(path, err.error))?;

    Ok(())
}
