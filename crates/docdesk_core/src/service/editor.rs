//! Document editor use-case.
//!
//! # Responsibility
//! - Turn raw form input into validated add/update actions.
//! - Gate deletion behind an explicit confirmation step.
//!
//! # Invariants
//! - Input is trimmed before validation and before it reaches an action.
//! - A failed validation never produces an action.
//! - Create always yields `is_edited=false`; update always `is_edited=true`.

use crate::model::document::{Document, DocumentId};
use crate::model::validation::{validate, DocumentFields, ValidationError};
use crate::store::action::Action;
use uuid::Uuid;

/// Source of fresh document ids.
pub trait IdGenerator {
    fn next_id(&self) -> DocumentId;
}

/// Random v4 UUID generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> DocumentId {
        Uuid::new_v4()
    }
}

/// Whether the form creates a new document or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Update(DocumentId),
}

impl EditorMode {
    pub fn from_existing(existing_id: Option<DocumentId>) -> Self {
        existing_id.map_or(Self::Create, Self::Update)
    }

    /// Heading/button verb for the form.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "Add",
            Self::Update(_) => "Update",
        }
    }
}

/// Pending "are you sure" step of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a delete request does nothing until it is confirmed"]
pub struct DeleteConfirmation {
    target: DocumentId,
}

impl DeleteConfirmation {
    pub fn target(&self) -> DocumentId {
        self.target
    }

    /// Yields the delete action only for an affirmative answer.
    pub fn resolve(self, confirmed: bool) -> Option<Action> {
        confirmed.then_some(Action::DeleteDocument(self.target))
    }
}

/// Form defaults: the selected document's fields, or blanks.
pub fn initial_values(selected: Option<&Document>) -> DocumentFields {
    selected.map(Document::fields).unwrap_or_default()
}

/// Validates form input and packages store actions.
#[derive(Debug, Clone, Default)]
pub struct DocumentEditor<G: IdGenerator = UuidGenerator> {
    ids: G,
}

impl DocumentEditor<UuidGenerator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: IdGenerator> DocumentEditor<G> {
    /// Creates an editor using the provided id generator.
    pub fn with_generator(ids: G) -> Self {
        Self { ids }
    }

    /// Validates `input` and emits the add or update action.
    ///
    /// # Errors
    /// - Returns `ValidationError` with per-field messages when any rule fails.
    pub fn submit(
        &self,
        input: &DocumentFields,
        existing_id: Option<DocumentId>,
    ) -> Result<Action, ValidationError> {
        let fields = input.trimmed();
        validate(&fields).into_result()?;

        let action = match EditorMode::from_existing(existing_id) {
            EditorMode::Create => Action::AddDocument(Document {
                id: self.ids.next_id(),
                title: fields.title,
                description: fields.description,
                is_edited: false,
            }),
            EditorMode::Update(id) => Action::UpdateDocument(Document {
                id,
                title: fields.title,
                description: fields.description,
                is_edited: true,
            }),
        };
        Ok(action)
    }

    /// First phase of a delete; nothing happens until it is resolved.
    pub fn request_delete(&self, id: DocumentId) -> DeleteConfirmation {
        DeleteConfirmation { target: id }
    }
}

#[cfg(test)]
mod tests {
    use super::{initial_values, DocumentEditor, EditorMode, IdGenerator};
    use crate::model::document::{Document, DocumentId};
    use crate::model::validation::{DocumentFields, Field};
    use crate::store::action::Action;
    use uuid::Uuid;

    struct FixedId(DocumentId);

    impl IdGenerator for FixedId {
        fn next_id(&self) -> DocumentId {
            self.0
        }
    }

    #[test]
    fn create_trims_and_uses_generated_id() {
        let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        let editor = DocumentEditor::with_generator(FixedId(id));
        let action = editor
            .submit(
                &DocumentFields::new("  Doc A  ", " A sufficiently long description. "),
                None,
            )
            .unwrap();
        let doc = match action {
            Action::AddDocument(doc) => doc,
            other => panic!("expected add action, got {other:?}"),
        };
        assert_eq!(doc.id, id);
        assert_eq!(doc.title, "Doc A");
        assert_eq!(doc.description, "A sufficiently long description.");
        assert!(!doc.is_edited);
    }

    #[test]
    fn invalid_title_blocks_submission_and_keeps_description_valid() {
        let editor = DocumentEditor::new();
        let err = editor
            .submit(&DocumentFields::new("abc", "long enough description"), None)
            .unwrap_err();
        assert!(err.result.error_for(Field::Title).is_some());
        assert!(err.result.error_for(Field::Description).is_none());
    }

    #[test]
    fn delete_requires_affirmative_answer() {
        let editor = DocumentEditor::new();
        let id = Uuid::new_v4();
        assert_eq!(editor.request_delete(id).resolve(false), None);
        assert_eq!(
            editor.request_delete(id).resolve(true),
            Some(Action::DeleteDocument(id))
        );
    }

    #[test]
    fn initial_values_follow_selection() {
        let doc = Document::new("Selected doc", "selected description").unwrap();
        let fields = initial_values(Some(&doc));
        assert_eq!(fields.title, "Selected doc");
        assert_eq!(initial_values(None), DocumentFields::default());
        assert_eq!(EditorMode::from_existing(Some(doc.id)).verb(), "Update");
    }
}
