//! Error adapter for converting OrgChartError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Input errors are rendered against the input text, with a label at the
//! location the JSON decoder reported. Structure errors get an error code and
//! a hint on how to fix the reporting lines.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use orgchart::{OrgChartError, input::InputError, structure::StructureError};

/// Adapter for an input error together with the text it was found in.
pub struct DiagnosticAdapter<'a> {
    err: &'a InputError,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(err: &'a InputError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.err {
            InputError::Syntax { message, .. } => write!(f, "{message}"),
            InputError::InvalidRecord { .. } => fmt::Display::fmt(self.err, f),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            InputError::Syntax { .. } => "orgchart::syntax",
            InputError::InvalidRecord { .. } => "orgchart::invalid_record",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            InputError::Syntax { .. } => {
                "expected a JSON array of records, or one record object per line"
            }
            InputError::InvalidRecord { .. } => "every position needs a non-empty id, name and title",
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self.err {
            InputError::Syntax { .. } => Some(&self.src as &dyn miette::SourceCode),
            InputError::InvalidRecord { .. } => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let InputError::Syntax { line, column, .. } = self.err else {
            return None;
        };

        let span = location_to_span(self.src, *line, *column);
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for [`OrgChartError`] variants without a source location.
pub struct ErrorAdapter<'a>(pub &'a OrgChartError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            OrgChartError::Io(_) => "orgchart::io",
            OrgChartError::Input { .. } => "orgchart::input",
            OrgChartError::Structure(StructureError::CyclicReference { .. }) => "orgchart::cycle",
            OrgChartError::Structure(StructureError::DuplicateId { .. }) => {
                "orgchart::duplicate_id"
            }
            OrgChartError::Config(_) => "orgchart::config",
            OrgChartError::Export(_) => "orgchart::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            OrgChartError::Structure(StructureError::CyclicReference { .. }) => {
                "a position cannot report to itself, directly or through others; remove or change one parentId on the loop"
            }
            OrgChartError::Structure(StructureError::DuplicateId { .. }) => {
                "every position needs a unique id"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An input error with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a 1-based line and column into a one-character [`SourceSpan`].
///
/// Positions past the end of the text point at its end with an empty span.
fn location_to_span(src: &str, line: usize, column: usize) -> SourceSpan {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();

    let mut offset = (line_start + column.saturating_sub(1)).min(src.len());
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }

    let len = src[offset..].chars().next().map_or(0, char::len_utf8);
    SourceSpan::new(offset.into(), len)
}

/// Convert an [`OrgChartError`] into a reportable error.
pub fn to_reportable(err: &OrgChartError) -> Reportable<'_> {
    match err {
        OrgChartError::Input { err, src } => Reportable::Diagnostic(DiagnosticAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use orgchart::{ChartBuilder, record::RecordError};

    use super::*;

    #[test]
    fn test_syntax_error_is_labeled() {
        let src = "[\n  {\"id\": \"1\" \"name\": \"A\"}\n]";
        let err = ChartBuilder::default().parse(src).unwrap_err();

        let reportable = to_reportable(&err);
        let Reportable::Diagnostic(adapter) = &reportable else {
            panic!("Expected Diagnostic");
        };

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        let line_two = 2..src.rfind('\n').unwrap();
        assert!(line_two.contains(&labels[0].offset()), "{:?}", labels[0]);
        assert!(reportable.source_code().is_some());
        assert_eq!(reportable.code().unwrap().to_string(), "orgchart::syntax");
    }

    #[test]
    fn test_invalid_record_has_no_label() {
        let err = OrgChartError::new_input_error(
            InputError::InvalidRecord {
                index: 0,
                id: "1".to_string(),
                source: RecordError::EmptyField(orgchart::record::RecordField::Name),
            },
            "[]",
        );

        let reportable = to_reportable(&err);
        assert!(reportable.labels().is_none());
        assert_eq!(
            reportable.to_string(),
            "invalid record #0 (id `1`): field `name` must not be empty"
        );
    }

    #[test]
    fn test_structure_error_codes() {
        let cycle = OrgChartError::from(StructureError::CyclicReference {
            cycle: vec!["a".to_string(), "b".to_string()],
        });
        let reportable = to_reportable(&cycle);
        assert_eq!(reportable.code().unwrap().to_string(), "orgchart::cycle");
        assert!(reportable.help().is_some());
        assert_eq!(reportable.to_string(), "cyclic reporting line: a -> b -> a");

        let duplicate = OrgChartError::from(StructureError::DuplicateId {
            id: "7".to_string(),
            first: 0,
            second: 3,
        });
        let reportable = to_reportable(&duplicate);
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "orgchart::duplicate_id"
        );
    }

    #[test]
    fn test_location_past_end_is_clamped() {
        let span = location_to_span("[", 4, 10);
        assert_eq!(span.offset(), 1);
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn test_location_on_multibyte_text() {
        let src = "é\nab";
        let span = location_to_span(src, 2, 2);
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "b");
    }
}
