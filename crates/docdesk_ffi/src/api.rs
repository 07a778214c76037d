//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the document screen session to Dart via FRB.
//! - Flatten core results into plain envelopes with UTF-8 messages.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One session exists per process; the core itself holds no globals.
//! - Ids cross the boundary as hyphenated UUID strings.

use docdesk_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DeskConfig, DocumentFields, DocumentId, EditorMode, Field, PageSize, ProjectionStatus, Session,
    SessionError, SessionHooks, SortState, Toast,
};
use log::warn;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

static SESSION: OnceLock<Mutex<Session<BridgeHooks>>> = OnceLock::new();

/// Collects UI signals until the next `doc_poll`.
#[derive(Debug, Default)]
struct BridgeHooks {
    toasts: Vec<Toast>,
    navigate_to_list: bool,
}

impl SessionHooks for BridgeHooks {
    fn navigate_to_list(&mut self) {
        self.navigate_to_list = true;
    }

    fn toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Creates the process session with an explicit pending delay.
///
/// Environment overrides apply first; `pending_delay_ms` wins when set.
///
/// # FFI contract
/// - Must run before any other `doc_*` call to take effect.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_session(pending_delay_ms: Option<u32>) -> String {
    let config = match session_config(pending_delay_ms) {
        Ok(config) => config,
        Err(message) => return message,
    };
    let requested_delay = config.pending_delay();
    if SESSION
        .set(Mutex::new(Session::new(config, BridgeHooks::default())))
        .is_ok()
    {
        return String::new();
    }

    match with_session(|session| session.config().pending_delay()) {
        Ok(active) if active == requested_delay => String::new(),
        Ok(active) => format!(
            "session already initialized with delay {}ms",
            active.as_millis()
        ),
        Err(err) => err,
    }
}

/// One row of the document list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocListItem {
    pub doc_id: String,
    /// 1-based position in the full list.
    pub ordinal: u32,
    pub title: String,
    pub description: String,
    pub is_edited: bool,
}

/// Document list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocListResponse {
    pub items: Vec<DocListItem>,
    pub total_count: u32,
    pub page: u32,
    /// `-1` means show all.
    pub page_size: i64,
    pub page_count: u32,
    pub page_size_options: Vec<u32>,
    /// `none|asc|desc`.
    pub title_sort: String,
    /// `empty|out_of_range|rows`.
    pub status: String,
    pub is_loading: bool,
    pub message: String,
}

/// Form values for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFormResponse {
    pub title: String,
    pub description: String,
    /// `Add|Update`.
    pub verb: String,
    pub message: String,
}

/// Result of a command issued from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocActionResponse {
    /// Whether the command was accepted.
    pub ok: bool,
    /// Target document id, when known.
    pub doc_id: Option<String>,
    pub title_error: Option<String>,
    pub description_error: Option<String>,
    pub message: String,
}

impl DocActionResponse {
    fn accepted(message: impl Into<String>, doc_id: Option<DocumentId>) -> Self {
        Self {
            ok: true,
            doc_id: doc_id.map(|id| id.to_string()),
            title_error: None,
            description_error: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            doc_id: None,
            title_error: None,
            description_error: None,
            message: message.into(),
        }
    }
}

/// Pending command status for the UI timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPollResponse {
    /// A command resolved during this poll.
    pub resolved: bool,
    pub is_loading: bool,
    /// Milliseconds left before the pending command may resolve.
    pub remaining_ms: u64,
    pub toasts: Vec<String>,
    pub navigate_to_list: bool,
    pub message: String,
}

/// Returns the current list page.
#[flutter_rust_bridge::frb(sync)]
pub fn doc_list() -> DocListResponse {
    list_or_failure(|_| Ok(()))
}

/// Moves the pager to `page` (0-based).
#[flutter_rust_bridge::frb(sync)]
pub fn doc_set_page(page: u32) -> DocListResponse {
    list_or_failure(|session| {
        session.set_page(to_usize(page));
        Ok(())
    })
}

/// Changes rows per page; `<= 0` shows all rows. Resets to the first page.
///
/// Sizes outside the offered options keep the current page and report the
/// rejection in `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn doc_set_page_size(page_size: i64) -> DocListResponse {
    list_or_failure(|session| {
        session
            .set_page_size(PageSize::from_raw(page_size))
            .map_err(|err| format!("doc_set_page_size failed: {err}"))
    })
}

/// Activates the title sort header.
#[flutter_rust_bridge::frb(sync)]
pub fn doc_toggle_title_sort() -> DocListResponse {
    list_or_failure(|session| {
        session.toggle_title_sort();
        Ok(())
    })
}

/// Opens the form for a new document (`None`) or an existing one.
#[flutter_rust_bridge::frb(sync)]
pub fn doc_open(doc_id: Option<String>) -> DocFormResponse {
    let parsed = match doc_id.as_deref().map(parse_doc_id).transpose() {
        Ok(parsed) => parsed,
        Err(message) => return form_failure(message),
    };
    match with_session(|session| {
        let fields = session.open_editor(parsed);
        let verb = EditorMode::from_existing(session.state().selected_id()).verb();
        (fields, verb)
    }) {
        Ok((fields, verb)) => DocFormResponse {
            title: fields.title,
            description: fields.description,
            verb: verb.to_string(),
            message: String::new(),
        },
        Err(message) => form_failure(message),
    }
}

/// Closes the form and clears the selection.
#[flutter_rust_bridge::frb(sync)]
pub fn doc_close() -> String {
    match with_session(|session| session.close_editor()) {
        Ok(()) => String::new(),
        Err(message) => message,
    }
}

/// Submits the form; `existing_id` selects update over create.
///
/// # FFI contract
/// - Validation failures return `ok=false` with per-field messages.
/// - Accepted commands resolve through `doc_poll`.
#[flutter_rust_bridge::frb(sync)]
pub fn doc_submit(
    title: String,
    description: String,
    existing_id: Option<String>,
) -> DocActionResponse {
    let existing = match existing_id.as_deref().map(parse_doc_id).transpose() {
        Ok(existing) => existing,
        Err(message) => return DocActionResponse::failure(message),
    };
    let input = DocumentFields::new(title, description);
    let result = with_session(|session| {
        session
            .submit(&input, existing, Instant::now())
            .map(|()| session.pending().and_then(|command| command.target()))
    });

    match result {
        Ok(Ok(target)) => DocActionResponse::accepted("Command pending.", target),
        Ok(Err(SessionError::Validation(err))) => DocActionResponse {
            ok: false,
            doc_id: existing.map(|id| id.to_string()),
            title_error: err.result.error_for(Field::Title).map(|e| e.message()),
            description_error: err.result.error_for(Field::Description).map(|e| e.message()),
            message: err.to_string(),
        },
        Ok(Err(err)) => DocActionResponse::failure(format!("doc_submit failed: {err}")),
        Err(message) => DocActionResponse::failure(message),
    }
}

/// First phase of a delete: asks for confirmation.
#[flutter_rust_bridge::frb(sync)]
pub fn doc_request_delete(doc_id: String) -> DocActionResponse {
    let id = match parse_doc_id(&doc_id) {
        Ok(id) => id,
        Err(message) => return DocActionResponse::failure(message),
    };
    match with_session(|session| session.request_delete(id)) {
        Ok(Ok(())) => DocActionResponse::accepted(
            "Are you sure you want to delete this document?",
            Some(id),
        ),
        Ok(Err(err)) => DocActionResponse::failure(format!("doc_request_delete failed: {err}")),
        Err(message) => DocActionResponse::failure(message),
    }
}

/// Second phase of a delete: `true` issues it, `false` drops the request.
#[flutter_rust_bridge::frb(sync)]
pub fn doc_answer_delete(confirmed: bool) -> DocActionResponse {
    let result = with_session(|session| {
        let target = session.delete_requested();
        session
            .answer_delete(confirmed, Instant::now())
            .map(|issued| (issued, target))
    });
    match result {
        Ok(Ok((true, target))) => DocActionResponse::accepted("Command pending.", target),
        Ok(Ok((false, target))) => DocActionResponse::accepted("Delete cancelled.", target),
        Ok(Err(err)) => DocActionResponse::failure(format!("doc_answer_delete failed: {err}")),
        Err(message) => DocActionResponse::failure(message),
    }
}

/// Resolves the pending command once due and drains UI signals.
#[flutter_rust_bridge::frb(sync)]
pub fn doc_poll() -> DocPollResponse {
    let result = with_session(|session| {
        let now = Instant::now();
        let resolved = session.resolve_due(now).is_some();
        let remaining = session.time_until_due(now).unwrap_or(Duration::ZERO);
        let is_loading = session.is_loading();
        let hooks = session.hooks_mut();
        let toasts = hooks
            .toasts
            .drain(..)
            .map(|toast| toast.message().to_string())
            .collect::<Vec<_>>();
        let navigate_to_list = std::mem::take(&mut hooks.navigate_to_list);
        DocPollResponse {
            resolved,
            is_loading,
            remaining_ms: u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
            toasts,
            navigate_to_list,
            message: String::new(),
        }
    });
    result.unwrap_or_else(|message| DocPollResponse {
        resolved: false,
        is_loading: false,
        remaining_ms: 0,
        toasts: Vec::new(),
        navigate_to_list: false,
        message,
    })
}

fn session_config(pending_delay_ms: Option<u32>) -> Result<DeskConfig, String> {
    let config = DeskConfig::from_env().map_err(|err| format!("invalid session config: {err}"))?;
    match pending_delay_ms {
        Some(millis) => config
            .with_pending_delay(Duration::from_millis(u64::from(millis)))
            .map_err(|err| format!("invalid session config: {err}")),
        None => Ok(config),
    }
}

fn with_session<T>(f: impl FnOnce(&mut Session<BridgeHooks>) -> T) -> Result<T, String> {
    let session = SESSION.get_or_init(|| {
        let config = DeskConfig::from_env().unwrap_or_else(|err| {
            warn!("event=session_config module=ffi status=fallback reason={err}");
            DeskConfig::default()
        });
        Mutex::new(Session::new(config, BridgeHooks::default()))
    });
    let mut guard = session
        .lock()
        .map_err(|_| "document session lock poisoned".to_string())?;
    Ok(f(&mut guard))
}

fn list_or_failure(
    change: impl FnOnce(&mut Session<BridgeHooks>) -> Result<(), String>,
) -> DocListResponse {
    with_session(|session| {
        let rejected = change(session).err();
        let mut response = to_list_response(session);
        if let Some(message) = rejected {
            response.message = message;
        }
        response
    })
    .unwrap_or_else(|message| DocListResponse {
        items: Vec::new(),
        total_count: 0,
        page: 0,
        page_size: 0,
        page_count: 0,
        page_size_options: Vec::new(),
        title_sort: sort_label(SortState::Unsorted).to_string(),
        status: status_label(ProjectionStatus::Empty).to_string(),
        is_loading: false,
        message,
    })
}

fn to_list_response(session: &Session<BridgeHooks>) -> DocListResponse {
    let view = session.list_view();
    let projection = session.projection();
    let items = projection
        .rows
        .iter()
        .map(|row| DocListItem {
            doc_id: row.document.id.to_string(),
            ordinal: to_u32(row.ordinal),
            title: row.document.title.clone(),
            description: row.document.description.clone(),
            is_edited: row.document.is_edited,
        })
        .collect::<Vec<_>>();
    let message = match projection.status {
        ProjectionStatus::Empty => "No document found".to_string(),
        ProjectionStatus::OutOfRange => "Page is out of range.".to_string(),
        ProjectionStatus::Rows => format!("Document List ({})", projection.total_count),
    };

    DocListResponse {
        items,
        total_count: to_u32(projection.total_count),
        page: to_u32(view.page()),
        page_size: view.page_size().as_raw(),
        page_count: to_u32(projection.page_count),
        page_size_options: view.page_size_options().iter().copied().map(to_u32).collect(),
        title_sort: sort_label(view.sort_state()).to_string(),
        status: status_label(projection.status).to_string(),
        is_loading: session.is_loading(),
        message,
    }
}

fn form_failure(message: String) -> DocFormResponse {
    DocFormResponse {
        title: String::new(),
        description: String::new(),
        verb: "Add".to_string(),
        message,
    }
}

fn parse_doc_id(raw: &str) -> Result<DocumentId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid document id `{raw}`"))
}

fn sort_label(state: SortState) -> &'static str {
    match state {
        SortState::Unsorted => "none",
        SortState::Ascending => "asc",
        SortState::Descending => "desc",
    }
}

fn status_label(status: ProjectionStatus) -> &'static str {
    match status {
        ProjectionStatus::Empty => "empty",
        ProjectionStatus::OutOfRange => "out_of_range",
        ProjectionStatus::Rows => "rows",
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
