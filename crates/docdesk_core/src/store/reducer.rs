//! Document store state and its reducer.
//!
//! # Responsibility
//! - Hold the ordered document collection and the current selection.
//! - Reduce one action into a fresh state value.
//!
//! # Invariants
//! - Document ids are unique within `documents`.
//! - Every stored document passes `Document::validate()`.
//! - Actions with unmet preconditions leave the state untouched.
//! - `selected` never points at a removed document.

use crate::model::document::{Document, DocumentId, DocumentValidationError};
use crate::store::action::{order_by_title, Action, ActionDispatcher, SortDirection};
use log::{debug, warn};

/// Why an action left the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// `AddDocument` carried an id that already exists.
    DuplicateId(DocumentId),
    /// `UpdateDocument`/`DeleteDocument` targeted an unknown id.
    UnknownId(DocumentId),
    /// Add/update carried a document violating the field rules.
    InvalidDocument(DocumentValidationError),
}

/// Result classification for one reduced action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Ignored(IgnoreReason),
}

/// New state produced by one action, with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduced {
    pub state: StoreState,
    pub outcome: ActionOutcome,
}

/// Immutable snapshot of the document store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    documents: Vec<Document>,
    selected: Option<DocumentId>,
}

impl StoreState {
    /// Empty store, as at session start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents in current order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Currently selected document resolved by id.
    pub fn selected(&self) -> Option<&Document> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<DocumentId> {
        self.selected
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Applies one action and returns the next state.
    ///
    /// Never panics; unmet preconditions yield an unchanged copy and an
    /// `Ignored` outcome.
    pub fn reduce(&self, action: &Action) -> Reduced {
        let mut next = self.clone();
        let outcome = next.apply(action);
        if let ActionOutcome::Ignored(_) = outcome {
            next = self.clone();
        }
        Reduced {
            state: next,
            outcome,
        }
    }

    fn apply(&mut self, action: &Action) -> ActionOutcome {
        match action {
            Action::AddDocument(doc) => {
                if let Err(err) = doc.validate() {
                    return ActionOutcome::Ignored(IgnoreReason::InvalidDocument(err));
                }
                if self.contains(doc.id) {
                    return ActionOutcome::Ignored(IgnoreReason::DuplicateId(doc.id));
                }
                self.documents.push(doc.clone());
            }
            Action::UpdateDocument(doc) => {
                if let Err(err) = doc.validate() {
                    return ActionOutcome::Ignored(IgnoreReason::InvalidDocument(err));
                }
                let Some(index) = self.position(doc.id) else {
                    return ActionOutcome::Ignored(IgnoreReason::UnknownId(doc.id));
                };
                let replacement = self.documents[index].edited(&doc.fields());
                self.documents[index] = replacement;
            }
            Action::DeleteDocument(id) => {
                let Some(index) = self.position(*id) else {
                    return ActionOutcome::Ignored(IgnoreReason::UnknownId(*id));
                };
                self.documents.remove(index);
                if self.selected == Some(*id) {
                    self.selected = None;
                }
            }
            Action::SetSelected(id) => {
                self.selected = self.contains(*id).then_some(*id);
            }
            Action::ClearSelected => self.selected = None,
            Action::SortAsc => order_by_title(&mut self.documents, SortDirection::Ascending),
            Action::SortDesc => order_by_title(&mut self.documents, SortDirection::Descending),
        }
        ActionOutcome::Applied
    }

    fn position(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|doc| doc.id == id)
    }
}

/// Session-lifetime store container; the only writer of `StoreState`.
#[derive(Debug, Default)]
pub struct DocumentStore {
    state: StoreState,
    last_outcome: Option<ActionOutcome>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state snapshot.
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Outcome of the most recently dispatched action.
    pub fn last_outcome(&self) -> Option<&ActionOutcome> {
        self.last_outcome.as_ref()
    }
}

impl ActionDispatcher for DocumentStore {
    fn dispatch(&mut self, action: Action) {
        let Reduced { state, outcome } = self.state.reduce(&action);
        match &outcome {
            ActionOutcome::Applied => debug!(
                "event=store_dispatch module=store status=ok action={} count={}",
                action.name(),
                state.len()
            ),
            ActionOutcome::Ignored(reason) => warn!(
                "event=store_dispatch module=store status=ignored action={} reason={:?}",
                action.name(),
                reason
            ),
        }
        self.state = state;
        self.last_outcome = Some(outcome);
    }
}
