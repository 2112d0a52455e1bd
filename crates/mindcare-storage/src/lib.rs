//! mindcare-storage
//!
//! The two persistence collaborators: an append-only remote record store
//! (S3 or in-memory) and local ephemeral storage for JSON blobs under fixed
//! keys (file-backed or in-memory).

pub mod client;
pub mod error;
pub mod local;
pub mod objects;
pub mod records;
pub mod state;
