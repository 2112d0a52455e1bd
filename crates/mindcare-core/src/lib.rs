//! mindcare-core
//!
//! Domain records, chat and referral types, and the key names they are
//! stored under. Nothing in here touches storage or the network.

pub mod error;
pub mod models;
pub mod storage_keys;
