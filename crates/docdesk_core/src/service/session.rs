//! Document screen session.
//!
//! # Responsibility
//! - Own the store, list view and editor for one client session.
//! - Run CRUD commands as two-phase commands: issue, pending, resolve.
//! - Notify the surrounding UI through `SessionHooks`.
//!
//! # Invariants
//! - At most one command is pending; issuing another fails with `Busy`.
//! - A pending command is applied exactly once and cannot be cancelled.
//! - Loading start/end signals are always paired around a pending command.
//! - Selection, sort and paging changes apply immediately.

use crate::config::{ConfigError, DeskConfig};
use crate::model::document::DocumentId;
use crate::model::validation::{DocumentFields, ValidationError};
use crate::service::editor::{
    initial_values, DeleteConfirmation, DocumentEditor, EditorMode, IdGenerator, UuidGenerator,
};
use crate::store::action::{Action, ActionDispatcher};
use crate::store::reducer::{ActionOutcome, DocumentStore, StoreState};
use crate::view::list_view::ListView;
use crate::view::projection::{PageSize, Projection};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Confirmation shown after a command resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toast {
    DocumentAdded,
    DocumentUpdated,
    DocumentDeleted,
}

impl Toast {
    pub fn message(self) -> &'static str {
        match self {
            Self::DocumentAdded => "Document Added",
            Self::DocumentUpdated => "Document Updated",
            Self::DocumentDeleted => "Document Deleted",
        }
    }

    fn for_mode(mode: EditorMode) -> Self {
        match mode {
            EditorMode::Create => Self::DocumentAdded,
            EditorMode::Update(_) => Self::DocumentUpdated,
        }
    }
}

/// UI-side collaborators notified by the session.
///
/// Every method defaults to doing nothing.
pub trait SessionHooks {
    /// A command was issued; the UI should block interaction.
    fn loading_started(&mut self) {}
    /// The pending command resolved; the UI may unblock.
    fn loading_ended(&mut self) {}
    /// Return the user to the document list.
    fn navigate_to_list(&mut self) {}
    fn toast(&mut self, _toast: Toast) {}
}

/// Hooks that ignore every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {}

/// Errors from session commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Another command is still pending.
    Busy { pending: &'static str },
    /// Form input failed validation; nothing was issued.
    Validation(ValidationError),
    /// `confirm_delete` was called without a prior `request_delete`.
    NoDeleteRequested,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Busy { pending } => write!(f, "command `{pending}` is still pending"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoDeleteRequested => write!(f, "no delete awaiting confirmation"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// CRUD command waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    action: Action,
    toast: Toast,
    due_at: Instant,
}

impl PendingCommand {
    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn due_at(&self) -> Instant {
        self.due_at
    }

    pub fn target(&self) -> Option<DocumentId> {
        self.action.target()
    }
}

/// Result of resolving a pending command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub action: Action,
    pub toast: Toast,
    pub outcome: ActionOutcome,
}

/// Explicit state container for the document screen.
pub struct Session<H: SessionHooks = NoopHooks, G: IdGenerator = UuidGenerator> {
    config: DeskConfig,
    store: DocumentStore,
    list: ListView,
    editor: DocumentEditor<G>,
    pending: Option<PendingCommand>,
    delete_request: Option<DeleteConfirmation>,
    hooks: H,
}

impl<H: SessionHooks> Session<H, UuidGenerator> {
    /// Creates an empty session with random document ids.
    pub fn new(config: DeskConfig, hooks: H) -> Self {
        Self::with_editor(config, hooks, DocumentEditor::new())
    }
}

impl<H: SessionHooks, G: IdGenerator> Session<H, G> {
    /// Creates an empty session around a custom editor.
    pub fn with_editor(config: DeskConfig, hooks: H, editor: DocumentEditor<G>) -> Self {
        let list = ListView::new(&config);
        Self {
            config,
            store: DocumentStore::new(),
            list,
            editor,
            pending: None,
            delete_request: None,
            hooks,
        }
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn state(&self) -> &StoreState {
        self.store.state()
    }

    pub fn list_view(&self) -> &ListView {
        &self.list
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Visible list rows for the current pager/sort state.
    pub fn projection(&self) -> Projection<'_> {
        self.list.project(self.store.state())
    }

    /// True while a command is pending.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingCommand> {
        self.pending.as_ref()
    }

    /// Time left before the pending command may resolve.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|command| command.due_at.saturating_duration_since(now))
    }

    /// Opens the form: selects `existing_id` and returns initial values.
    pub fn open_editor(&mut self, existing_id: Option<DocumentId>) -> DocumentFields {
        match existing_id {
            Some(id) => self.store.dispatch(Action::SetSelected(id)),
            None => self.store.dispatch(Action::ClearSelected),
        }
        initial_values(self.store.state().selected())
    }

    /// Closes the form and drops the selection.
    pub fn close_editor(&mut self) {
        self.store.dispatch(Action::ClearSelected);
    }

    /// Validates form input and issues an add or update command.
    ///
    /// # Errors
    /// - `Busy` when a command is already pending.
    /// - `Validation` when any field rule fails; the store is untouched.
    pub fn submit(
        &mut self,
        input: &DocumentFields,
        existing_id: Option<DocumentId>,
        now: Instant,
    ) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let action = self.editor.submit(input, existing_id)?;
        let toast = Toast::for_mode(EditorMode::from_existing(existing_id));
        self.issue(action, toast, now)
    }

    /// First phase of a delete: remembers the target until answered.
    pub fn request_delete(&mut self, id: DocumentId) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.delete_request = Some(self.editor.request_delete(id));
        Ok(())
    }

    /// Document awaiting delete confirmation.
    pub fn delete_requested(&self) -> Option<DocumentId> {
        self.delete_request.map(|request| request.target())
    }

    /// Answers the pending delete question.
    ///
    /// Returns `true` when a delete command was issued.
    pub fn answer_delete(&mut self, confirmed: bool, now: Instant) -> Result<bool, SessionError> {
        self.ensure_idle()?;
        let request = self
            .delete_request
            .take()
            .ok_or(SessionError::NoDeleteRequested)?;
        match request.resolve(confirmed) {
            Some(action) => {
                self.issue(action, Toast::DocumentDeleted, now)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Advances the title sort header and applies the resulting sort.
    pub fn toggle_title_sort(&mut self) {
        let action = self.list.toggle_title_sort();
        self.store.dispatch(action);
    }

    pub fn set_page(&mut self, page: usize) {
        self.list.set_page(page);
    }

    /// Changes rows per page; see `ListView::set_page_size`.
    pub fn set_page_size(&mut self, page_size: PageSize) -> Result<(), ConfigError> {
        self.list.set_page_size(page_size)
    }

    /// Resolves the pending command when its delay has elapsed.
    ///
    /// Returns `None` when nothing is pending or it is not yet due.
    pub fn resolve_due(&mut self, now: Instant) -> Option<Resolved> {
        if self.pending.as_ref()?.due_at > now {
            return None;
        }
        let PendingCommand { action, toast, .. } = self.pending.take()?;

        self.hooks.loading_ended();
        self.store.dispatch(action.clone());
        let outcome = self
            .store
            .last_outcome()
            .cloned()
            .unwrap_or(ActionOutcome::Applied);
        if self.store.state().selected_id().is_some() {
            self.store.dispatch(Action::ClearSelected);
        }
        self.hooks.navigate_to_list();
        self.hooks.toast(toast);

        info!(
            "event=command_resolved module=session status=ok action={} count={}",
            action.name(),
            self.store.state().len()
        );
        Some(Resolved {
            action,
            toast,
            outcome,
        })
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        match &self.pending {
            Some(command) => Err(SessionError::Busy {
                pending: command.action.name(),
            }),
            None => Ok(()),
        }
    }

    fn issue(&mut self, action: Action, toast: Toast, now: Instant) -> Result<(), SessionError> {
        self.ensure_idle()?;
        info!(
            "event=command_issued module=session status=pending action={} delay_ms={}",
            action.name(),
            self.config.pending_delay().as_millis()
        );
        self.hooks.loading_started();
        self.pending = Some(PendingCommand {
            action,
            toast,
            due_at: now + self.config.pending_delay(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{NoopHooks, Session, SessionError, Toast};
    use crate::config::{ConfigError, DeskConfig};
    use crate::model::validation::DocumentFields;
    use crate::service::editor::EditorMode;
    use crate::view::projection::PageSize;
    use std::time::{Duration, Instant};
    use uuid::Uuid;

    #[test]
    fn toast_follows_editor_mode() {
        assert_eq!(Toast::for_mode(EditorMode::Create), Toast::DocumentAdded);
        assert_eq!(
            Toast::for_mode(EditorMode::Update(Uuid::new_v4())),
            Toast::DocumentUpdated
        );
        assert_eq!(Toast::DocumentAdded.message(), "Document Added");
        assert_eq!(Toast::DocumentUpdated.message(), "Document Updated");
        assert_eq!(Toast::DocumentDeleted.message(), "Document Deleted");
    }

    #[test]
    fn unoffered_page_size_leaves_pager_alone() {
        let mut session = Session::new(DeskConfig::default(), NoopHooks);
        let err = session.set_page_size(PageSize::from_raw(7)).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedPageSize { value: 7, .. }));
        assert_eq!(session.list_view().page_size(), PageSize::from_raw(2));
    }

    #[test]
    fn second_command_while_pending_is_busy() {
        let mut session = Session::new(DeskConfig::default(), NoopHooks);
        let now = Instant::now();
        let input = DocumentFields::new("First doc", "first description");
        session.submit(&input, None, now).unwrap();

        let err = session.submit(&input, None, now).unwrap_err();
        assert_eq!(
            err,
            SessionError::Busy {
                pending: "add_document"
            }
        );
        assert_eq!(session.time_until_due(now), Some(Duration::from_secs(1)));
    }

    #[test]
    fn answer_without_request_is_rejected() {
        let mut session = Session::new(DeskConfig::default(), NoopHooks);
        let err = session.answer_delete(true, Instant::now()).unwrap_err();
        assert_eq!(err, SessionError::NoDeleteRequested);
    }
}
