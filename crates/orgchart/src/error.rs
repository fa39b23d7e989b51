//! Error types for chart operations.
//!
//! This module provides the main error type [`OrgChartError`], which wraps the
//! errors of every pipeline stage.

use std::io;

use thiserror::Error;

use crate::{export, input::InputError, structure::StructureError};

/// The main error type for chart operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant keeps the decoded source next to the error so that
/// syntax errors can be reported with a labeled span. `Structure` errors carry
/// the offending ids.
#[derive(Debug, Error)]
pub enum OrgChartError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Input { err: InputError, src: String },

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

impl OrgChartError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: InputError, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_error_is_transparent() {
        let err = OrgChartError::from(StructureError::CyclicReference {
            cycle: vec!["1".to_string()],
        });
        assert_eq!(err.to_string(), "cyclic reporting line: 1 -> 1");
    }

    #[test]
    fn test_input_error_keeps_source() {
        let err = OrgChartError::new_input_error(
            InputError::Syntax {
                message: "EOF while parsing a list".to_string(),
                line: 1,
                column: 2,
            },
            "[{",
        );

        let OrgChartError::Input { src, .. } = &err else {
            panic!("expected input error");
        };
        assert_eq!(src, "[{");
        assert_eq!(err.to_string(), "EOF while parsing a list at line 1 column 2");
    }
}
