use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompanionError {
    #[error("session is closed")]
    SessionClosed,

    #[error("invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: crate::session::SessionState,
        to: crate::session::SessionState,
    },

    #[error("no async runtime available to schedule escalation")]
    NoRuntime,

    #[error("invalid input: {0}")]
    Invalid(#[from] mindcare_core::error::CoreError),

    #[error("storage error: {0}")]
    Storage(#[from] mindcare_storage::error::StorageError),
}

/// Failure of a speech side channel. Never surfaced to the user.
#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("speech is not supported on this device")]
    Unsupported,

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("speech recognition failed: {0}")]
    Recognition(String),
}
