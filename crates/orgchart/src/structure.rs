//! Hierarchy structure built from flat position records.
//!
//! This module turns the ordered list of [`PositionRecord`]s into a
//! [`Forest`]: zero or more disjoint trees where every record appears exactly
//! once, either under the parent it declares or as a root.
//!
//! Construction is strict. Duplicate ids and reporting lines that loop back on
//! themselves are rejected with a [`StructureError`] before any node is
//! linked, so the layout engine can rely on an acyclic input.
//!
//! [`PositionRecord`]: orgchart_core::record::PositionRecord

mod forest;

pub use forest::{Forest, NodeIndex, Preorder, TreeNode, build_forest};

use thiserror::Error;

/// Errors raised while assembling a [`Forest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// A record's chain of parent references leads back to itself.
    ///
    /// `cycle` lists the ids on the loop in parent-chain order, starting with
    /// the first record (in input order) that was found on it.
    #[error("cyclic reporting line: {}", describe_cycle(.cycle))]
    CyclicReference { cycle: Vec<String> },

    /// Two records share the same id.
    ///
    /// `first` and `second` are the zero-based input positions of the records.
    #[error("duplicate position id `{id}` (records {first} and {second})")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },
}

/// Formats a cycle as `a -> b -> a`.
fn describe_cycle(cycle: &[String]) -> String {
    let mut ids: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        ids.push(first);
    }
    ids.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_reference_display() {
        let err = StructureError::CyclicReference {
            cycle: vec!["1".to_string()],
        };
        assert_eq!(err.to_string(), "cyclic reporting line: 1 -> 1");

        let err = StructureError::CyclicReference {
            cycle: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        assert_eq!(err.to_string(), "cyclic reporting line: a -> b -> c -> a");
    }

    #[test]
    fn test_duplicate_id_display() {
        let err = StructureError::DuplicateId {
            id: "7".to_string(),
            first: 2,
            second: 5,
        };
        assert_eq!(
            err.to_string(),
            "duplicate position id `7` (records 2 and 5)"
        );
    }
}
