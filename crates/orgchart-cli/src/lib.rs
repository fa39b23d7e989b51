//! orgchart CLI library
//!
//! This module contains the core CLI logic for the orgchart tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::{info, warn};

use orgchart::{ChartBuilder, OrgChartError};

/// Run the orgchart CLI application
///
/// This function reads the input records, renders the chart and writes the
/// image to the output file. Nothing is written if any stage fails.
///
/// # Errors
///
/// Returns `OrgChartError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input decoding errors
/// - Duplicate ids and cyclic reporting lines
/// - Rendering and rasterization errors
pub fn run(args: &Args) -> Result<(), OrgChartError> {
    let app_config = config::load_config(args.config.as_ref())?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| app_config.export().file_name().to_string());
    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&output));

    info!(
        input_path = args.input,
        output_path = output,
        format:?;
        "Processing chart"
    );

    let source = fs::read_to_string(&args.input)?;

    let builder = ChartBuilder::new(app_config);
    let records = builder.parse(&source)?;
    if records.is_empty() {
        warn!(input_path = args.input; "No positions in input, writing empty chart");
    }

    let bytes = match format {
        OutputFormat::Svg => builder.render_svg(&records)?.into_bytes(),
        OutputFormat::Png => builder.render_png(&records)?,
    };

    fs::write(&output, bytes)?;

    info!(output_file = output, format:?; "Chart exported successfully");

    Ok(())
}
