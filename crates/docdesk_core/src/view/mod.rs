//! List presentation logic.
//!
//! # Responsibility
//! - Derive the paginated, sorted slice shown by the document list.
//! - Track pager and sort-header state between UI events.

pub mod list_view;
pub mod projection;
