//! The flat position record that charts are built from.
//!
//! A chart is described by an ordered list of [`PositionRecord`]s. Each record
//! names one position in the organization and optionally points at the record
//! it reports to through `parent_id`. Records are immutable for the duration of
//! a layout pass; the tree and layout structures only borrow them.
//!
//! The serialized form uses camel-case field names so the records round-trip
//! with the JSON the chart editor produces:
//!
//! ```
//! # use orgchart_core::record::PositionRecord;
//! let record: PositionRecord =
//!     serde_json::from_str(r#"{"id":"2","name":"Bashart Gill","title":"HRO","parentId":"1"}"#)
//!         .unwrap();
//! assert_eq!(record.parent_id(), Some("1"));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fields of a [`PositionRecord`] that are subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Id,
    Name,
    Title,
}

impl RecordField {
    /// Returns the serialized field name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Title => "title",
        }
    }
}

/// A record failed field validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("field `{}` must not be empty", .0.name())]
    EmptyField(RecordField),
}

/// One position in the organization.
///
/// Uniqueness of `id` is not checked here; the tree builder rejects
/// duplicates when the forest is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    id: String,
    name: String,
    title: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_parent_id"
    )]
    parent_id: Option<String>,
}

impl PositionRecord {
    /// Creates a record without a parent.
    pub fn new(id: impl Into<String>, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: title.into(),
            parent_id: None,
        }
    }

    /// Sets the parent reference (builder style).
    ///
    /// An empty string is treated as "no parent".
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        let parent_id = parent_id.into();
        self.parent_id = (!parent_id.is_empty()).then_some(parent_id);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the declared parent id, if any.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Checks that the id, name and title are non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), RecordError> {
        [
            (RecordField::Id, &self.id),
            (RecordField::Name, &self.name),
            (RecordField::Title, &self.title),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |(field, _)| Err(RecordError::EmptyField(field)))
    }
}

/// `null`, a missing field and `""` all mean the record has no parent.
fn deserialize_parent_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let parent_id = Option::<String>::deserialize(deserializer)?;
    Ok(parent_id.filter(|id| !id.is_empty()))
}
