use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    AssessmentCompleted,
    ChatStarted,
    DistressDetected,
    CrisisKeywordMatched,
    ReferralSubmitted,
    FeedbackSubmitted,
    SessionClosed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AssessmentCompleted => "assessment_completed",
            AuditAction::ChatStarted => "chat_started",
            AuditAction::DistressDetected => "distress_detected",
            AuditAction::CrisisKeywordMatched => "crisis_keyword_matched",
            AuditAction::ReferralSubmitted => "referral_submitted",
            AuditAction::FeedbackSubmitted => "feedback_submitted",
            AuditAction::SessionClosed => "session_closed",
        }
    }
}

/// A structured audit event for user-facing actions.
///
/// These events are logged via `tracing` and never carry message text, only
/// identifiers, so transcripts stay out of the log stream.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub user_id: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_id,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = self.action.as_str(),
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.user_id = self.user_id.as_deref().unwrap_or("anonymous"),
            audit.details = %details,
            "audit event"
        );
    }
}
