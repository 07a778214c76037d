//! Core use-case services.
//!
//! # Responsibility
//! - Turn form input into validated store actions.
//! - Orchestrate the store, list view and pending commands for one session.
//! - Keep UI/FFI layers decoupled from store internals.

pub mod editor;
pub mod session;
