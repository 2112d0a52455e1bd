//! mindcare-assessment
//!
//! The mood questionnaire, its scoring rules, and the analytics shown on the
//! wellness dashboard. Operates on records handed in by the caller.

pub mod analytics;
pub mod error;
pub mod questionnaire;
pub mod scoring;
