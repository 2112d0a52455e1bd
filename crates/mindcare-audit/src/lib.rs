//! mindcare-audit
//!
//! Structured audit events and the best-effort activity tracker.

pub mod events;
pub mod tracker;
