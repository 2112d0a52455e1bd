use std::time::Duration;

/// Delay between a distress trigger and the hand-off to the referral screen.
pub const DEFAULT_ESCALATION_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct CompanionConfig {
    pub escalation_delay: Duration,
    pub speech_enabled: bool,
    /// Display name used in the welcome message.
    pub user_name: Option<String>,
    /// Opaque identifier of the signed-in user, if any.
    pub user_id: Option<String>,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            escalation_delay: DEFAULT_ESCALATION_DELAY,
            speech_enabled: true,
            user_name: None,
            user_id: None,
        }
    }
}
