//! Client-side document store.
//!
//! # Responsibility
//! - Define the typed action set and the dispatcher seam.
//! - Reduce actions into new store states under a single-writer container.
//!
//! # Invariants
//! - Only `DocumentStore::dispatch` replaces the live state.
//! - Actions against missing ids are benign no-ops, never errors.

pub mod action;
pub mod reducer;
