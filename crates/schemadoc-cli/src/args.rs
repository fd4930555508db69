//! Command-line argument definitions for the Schemadoc CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the catalog and source tree inputs, the
//! output path, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Schemadoc report generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the catalog file (JSON, or TOML by extension)
    #[arg(short, long, default_value = "catalog.json")]
    pub schema: String,

    /// Root of the UI source tree to inventory
    #[arg(long, default_value = "src")]
    pub src: String,

    /// Path to the output DOCX file
    #[arg(short, long, default_value = "report.docx")]
    pub out: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["schemadoc"]);

        assert_eq!(args.schema, "catalog.json");
        assert_eq!(args.src, "src");
        assert_eq!(args.out, "report.docx");
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_explicit_paths() {
        let args = Args::parse_from([
            "schemadoc",
            "--schema",
            "db/catalog.toml",
            "--src",
            "frontend/src",
            "-o",
            "out/design.docx",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.schema, "db/catalog.toml");
        assert_eq!(args.src, "frontend/src");
        assert_eq!(args.out, "out/design.docx");
        assert_eq!(args.log_level, "debug");
    }
}
