//! Document domain model.
//!
//! # Responsibility
//! - Define the record shown in the document list and edited by the form.
//! - Enforce field rules on construction and deserialization.
//!
//! # Invariants
//! - `id` is stable and never reused for another document.
//! - `id` is never the nil UUID.
//! - `title`/`description` are stored trimmed and satisfy the rule set.
//! - `is_edited` only ever moves from `false` to `true`.

use crate::model::validation::{validate, DocumentFields, Field, FieldError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a document.
pub type DocumentId = Uuid;

/// Reason a document value cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    /// Nil UUID is reserved and never identifies a document.
    NilId,
    /// One field violates its rule.
    Field(FieldError),
    /// A field carries leading or trailing whitespace.
    Untrimmed(Field),
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "document id must not be nil"),
            Self::Field(err) => write!(f, "{err}"),
            Self::Untrimmed(field) => write!(f, "{} must be stored trimmed", field.label()),
        }
    }
}

impl Error for DocumentValidationError {}

/// User-managed document record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRecord")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub description: String,
    /// Set once the document has been updated after creation.
    pub is_edited: bool,
}

/// Unchecked wire shape used as the deserialization intermediate.
#[derive(Deserialize)]
struct DocumentRecord {
    id: DocumentId,
    title: String,
    description: String,
    #[serde(default)]
    is_edited: bool,
}

impl TryFrom<DocumentRecord> for Document {
    type Error = DocumentValidationError;

    fn try_from(value: DocumentRecord) -> Result<Self, Self::Error> {
        let mut document = Self::with_id(value.id, value.title, value.description)?;
        document.is_edited = value.is_edited;
        Ok(document)
    }
}

impl Document {
    /// Creates a fresh, never-edited document with a generated id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DocumentValidationError> {
        Self::with_id(Uuid::new_v4(), title, description)
    }

    /// Creates a never-edited document with a caller-provided id.
    ///
    /// Fields are trimmed before validation.
    pub fn with_id(
        id: DocumentId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DocumentValidationError> {
        let fields = DocumentFields::new(title, description).trimmed();
        let document = Self {
            id,
            title: fields.title,
            description: fields.description,
            is_edited: false,
        };
        document.validate()?;
        Ok(document)
    }

    /// Checks id and field invariants.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        if self.id.is_nil() {
            return Err(DocumentValidationError::NilId);
        }
        if self.title.trim() != self.title {
            return Err(DocumentValidationError::Untrimmed(Field::Title));
        }
        if self.description.trim() != self.description {
            return Err(DocumentValidationError::Untrimmed(Field::Description));
        }
        let result = validate(&self.fields());
        let first = result.errors().next().cloned();
        match first {
            Some(err) => Err(DocumentValidationError::Field(err)),
            None => Ok(()),
        }
    }

    /// Editable fields as form values.
    pub fn fields(&self) -> DocumentFields {
        DocumentFields::new(self.title.clone(), self.description.clone())
    }

    /// Returns the replacement produced by an update: same id, new fields,
    /// edited flag raised.
    pub fn edited(&self, fields: &DocumentFields) -> Self {
        let trimmed = fields.trimmed();
        Self {
            id: self.id,
            title: trimmed.title,
            description: trimmed.description,
            is_edited: true,
        }
    }
}
