//! Command-line argument definitions for the orgchart CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, and logging verbosity.

use std::path::Path;

use clap::{Parser, ValueEnum};

/// Image format written by the CLI.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Picks the format from a file extension: `.svg` is SVG, anything else PNG.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_svg = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if is_svg { Self::Svg } else { Self::Png }
    }
}

/// Command-line arguments for the orgchart tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON file (array or one record per line)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output image [default: configured file name, organizational-chart.png]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format [default: inferred from the output extension]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

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
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("chart.svg"), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path("chart.SVG"), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path("chart.png"), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path("chart"), OutputFormat::Png);
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["orgchart", "team.json"]).unwrap();
        assert_eq!(args.input, "team.json");
        assert!(args.output.is_none());
        assert!(args.format.is_none());
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_parse_all_options() {
        let args = Args::try_parse_from([
            "orgchart",
            "team.json",
            "-o",
            "out.img",
            "-f",
            "svg",
            "-c",
            "orgchart.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.output.as_deref(), Some("out.img"));
        assert_eq!(args.format, Some(OutputFormat::Svg));
        assert_eq!(args.config.as_deref(), Some("orgchart.toml"));
        assert_eq!(args.log_level, "debug");
    }
}
