//! mindcare-companion
//!
//! The conversational companion: lexical sentiment, distress and crisis
//! detection, canned replies, and the coordinator that escalates a session
//! to counselor referral.

pub mod config;
pub mod counselor;
pub mod crisis;
pub mod distress;
pub mod error;
pub mod escalation;
pub mod navigation;
pub mod replies;
pub mod sentiment;
pub mod session;
pub mod voice;
