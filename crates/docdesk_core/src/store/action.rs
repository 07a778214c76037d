//! Typed store actions and the dispatcher seam.

use crate::model::document::{Document, DocumentId};
use std::borrow::Borrow;

/// Typed intent to mutate the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a new document. Ignored when the id already exists.
    AddDocument(Document),
    /// Replace the document with the same id and mark it edited.
    UpdateDocument(Document),
    /// Remove the document with this id.
    DeleteDocument(DocumentId),
    /// Select the document with this id, or nothing when it is unknown.
    SetSelected(DocumentId),
    ClearSelected,
    SortAsc,
    SortDesc,
}

impl Action {
    /// Stable name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddDocument(_) => "add_document",
            Self::UpdateDocument(_) => "update_document",
            Self::DeleteDocument(_) => "delete_document",
            Self::SetSelected(_) => "set_selected",
            Self::ClearSelected => "clear_selected",
            Self::SortAsc => "sort_asc",
            Self::SortDesc => "sort_desc",
        }
    }

    /// Document targeted by this action, if any.
    pub fn target(&self) -> Option<DocumentId> {
        match self {
            Self::AddDocument(doc) | Self::UpdateDocument(doc) => Some(doc.id),
            Self::DeleteDocument(id) | Self::SetSelected(id) => Some(*id),
            Self::ClearSelected | Self::SortAsc | Self::SortDesc => None,
        }
    }
}

/// Single channel through which UI intents reach the store.
///
/// Fire-and-forget: callers never observe a failure.
pub trait ActionDispatcher {
    fn dispatch(&mut self, action: Action);
}

/// Title sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Store action that applies this direction.
    pub fn action(self) -> Action {
        match self {
            Self::Ascending => Action::SortAsc,
            Self::Descending => Action::SortDesc,
        }
    }
}

/// Stable in-place reorder by title.
///
/// Ties keep their relative order in both directions.
pub fn order_by_title<T: Borrow<Document>>(items: &mut [T], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => {
            items.sort_by(|a, b| a.borrow().title.cmp(&b.borrow().title));
        }
        SortDirection::Descending => {
            items.sort_by(|a, b| b.borrow().title.cmp(&a.borrow().title));
        }
    }
}
