//! Core state and logic for the DocDesk document screen.
//! This crate is the single source of truth for document invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, DeskConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document::{Document, DocumentId, DocumentValidationError};
pub use model::validation::{
    validate, validate_field, DocumentFields, Field, FieldError, Rule, ValidationError,
    ValidationResult,
};
pub use service::editor::{
    initial_values, DeleteConfirmation, DocumentEditor, EditorMode, IdGenerator, UuidGenerator,
};
pub use service::session::{
    NoopHooks, PendingCommand, Resolved, Session, SessionError, SessionHooks, Toast,
};
pub use store::action::{order_by_title, Action, ActionDispatcher, SortDirection};
pub use store::reducer::{ActionOutcome, DocumentStore, IgnoreReason, Reduced, StoreState};
pub use view::list_view::ListView;
pub use view::projection::{
    page_count, project, PageSize, ProjectedRow, Projection, ProjectionStatus, SortState,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
