//! Decoding position records from JSON text.
//!
//! Two shapes are accepted:
//!
//! - a JSON array of record objects;
//! - line-delimited JSON with one record object per non-blank line.
//!
//! The shape is chosen by the first non-whitespace character: `[` selects the
//! array form, anything else the line-delimited form.
//!
//! Every decoded record is validated with [`PositionRecord::validate`], so a
//! blank name or title is reported here rather than surfacing later as an
//! empty box.

use log::{debug, trace};
use thiserror::Error;

use orgchart_core::record::{PositionRecord, RecordError};

/// Errors produced while decoding records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The text is not valid JSON or does not have the record shape.
    ///
    /// `line` and `column` are 1-based and refer to the whole input.
    #[error("{message} at line {line} column {column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// A record decoded but failed field validation.
    #[error("invalid record #{index} (id `{id}`): {source}")]
    InvalidRecord {
        index: usize,
        id: String,
        source: RecordError,
    },
}

impl InputError {
    fn from_json(err: &serde_json::Error, line_offset: usize) -> Self {
        let message = err.to_string();
        // serde_json appends its own " at line L column C" suffix
        let message = match message.rfind(" at line ") {
            Some(cut) => message[..cut].to_string(),
            None => message,
        };

        Self::Syntax {
            message,
            line: err.line() + line_offset,
            column: err.column(),
        }
    }
}

/// Decodes and validates position records.
///
/// A leading byte order mark is ignored. Blank input yields an empty list.
///
/// # Errors
///
/// - [`InputError::Syntax`] for malformed JSON or a value that is not a record.
/// - [`InputError::InvalidRecord`] for a record with a blank id, name or title.
///
/// # Examples
///
/// ```
/// use orgchart::input::parse_records;
///
/// let array = r#"[{"id":"1","name":"Mansoor Ahmad","title":"CEO","parentId":null}]"#;
/// let lines = "{\"id\":\"1\",\"name\":\"Mansoor Ahmad\",\"title\":\"CEO\"}\n";
///
/// assert_eq!(parse_records(array).unwrap(), parse_records(lines).unwrap());
/// ```
pub fn parse_records(source: &str) -> Result<Vec<PositionRecord>, InputError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let trimmed = source.trim_start();

    let records = if trimmed.starts_with('[') {
        debug!("Decoding records as a JSON array");
        serde_json::from_str::<Vec<PositionRecord>>(source)
            .map_err(|err| InputError::from_json(&err, 0))?
    } else {
        debug!("Decoding records as line-delimited JSON");
        parse_lines(source)?
    };

    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|source| InputError::InvalidRecord {
                index,
                id: record.id().to_string(),
                source,
            })?;
    }

    debug!(records_count = records.len(); "Records decoded");
    trace!(records:?; "Decoded records");

    Ok(records)
}

fn parse_lines(source: &str) -> Result<Vec<PositionRecord>, InputError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_index, line)| {
            serde_json::from_str::<PositionRecord>(line)
                .map_err(|err| InputError::from_json(&err, line_index))
        })
        .collect()
}
