//! Document domain model and field rules.
//!
//! # Responsibility
//! - Define the canonical document record used by store, editor and list.
//! - Own the title/description validation rule set.
//!
//! # Invariants
//! - Every document is identified by a stable `DocumentId`.
//! - Deletion removes the record; there are no tombstones.

pub mod document;
pub mod validation;
