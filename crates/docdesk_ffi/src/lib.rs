//! Flutter-facing bridge for the DocDesk core.

pub mod api;
