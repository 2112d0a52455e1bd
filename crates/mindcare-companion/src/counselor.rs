//! Counselor referral screen: the referral form and the live-support panel.

use std::sync::Arc;

use tracing::info;

use mindcare_audit::events::{AuditAction, AuditEvent};
use mindcare_core::models::distress::DistressLogEntry;
use mindcare_core::models::referral::{
    CounselorChat, CounselorMessage, CounselorSender, ReferralForm, ReferralRequest,
};
use mindcare_core::storage_keys;
use mindcare_storage::local::LocalStore;
use mindcare_storage::state;

use crate::error::CompanionError;

pub const COUNSELOR_GREETING: &str = "Hello, I'm here to listen and support you. \
Please take your time and share what's on your mind. You can speak or type your message.";

pub const COUNSELOR_ACKNOWLEDGEMENT: &str = "Thank you for sharing that with me. \
I hear you, and your feelings are completely valid. Can you tell me more about what led to \
these feelings?";

/// Validate and store a referral request under the `counselorReferral` key.
pub fn submit_referral(
    local: &dyn LocalStore,
    form: ReferralForm,
    user_id: Option<String>,
) -> Result<ReferralRequest, CompanionError> {
    let request = ReferralRequest::submit(form)?;
    state::save_json(local, storage_keys::COUNSELOR_REFERRAL, &request)?;

    AuditEvent::new(
        AuditAction::ReferralSubmitted,
        "counselor_referral",
        request.id.to_string(),
        user_id,
    )
    .with_details(serde_json::json!({ "urgency": request.form.urgency }))
    .emit();

    Ok(request)
}

/// Whether a crisis keyword flagged this user for the referral call-to-action.
pub fn needs_counselor(local: &dyn LocalStore) -> Result<bool, CompanionError> {
    Ok(state::load_json::<bool>(local, storage_keys::NEEDS_COUNSELOR)?.unwrap_or(false))
}

/// Live chat with a counselor. Replies are a fixed acknowledgement until a
/// real counselor backend exists.
pub struct LiveSupportPanel {
    local: Arc<dyn LocalStore>,
    messages: Vec<CounselorMessage>,
    open: bool,
}

impl LiveSupportPanel {
    /// Load the panel and any stored transcript, opening it immediately if
    /// the user arrived here after a distress detection.
    pub fn load(local: Arc<dyn LocalStore>) -> Result<Self, CompanionError> {
        let logs: Vec<DistressLogEntry> =
            state::load_list(local.as_ref(), storage_keys::DISTRESS_LOGS)?;
        let chat: Option<CounselorChat> =
            state::load_json(local.as_ref(), storage_keys::COUNSELOR_CHAT)?;

        let messages = chat.map(|c| c.messages).unwrap_or_default();
        let mut panel = Self {
            local,
            open: !messages.is_empty(),
            messages,
        };
        if !logs.is_empty() {
            info!(distress_logs = logs.len(), "opening live support after distress");
            panel.open();
        }
        Ok(panel)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn messages(&self) -> &[CounselorMessage] {
        &self.messages
    }

    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        if self.messages.is_empty() {
            self.messages
                .push(CounselorMessage::new(COUNSELOR_GREETING, CounselorSender::Counselor));
        }
    }

    /// Send a message and store the updated transcript under `counselorChat`.
    /// Blank messages are ignored and return `None`.
    pub fn send(&mut self, text: &str) -> Result<Option<&CounselorMessage>, CompanionError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.open();

        self.messages
            .push(CounselorMessage::new(text, CounselorSender::User));
        self.messages.push(CounselorMessage::new(
            COUNSELOR_ACKNOWLEDGEMENT,
            CounselorSender::Counselor,
        ));

        let chat = CounselorChat {
            messages: self.messages.clone(),
            timestamp: Some(jiff::Timestamp::now()),
        };
        state::save_json(self.local.as_ref(), storage_keys::COUNSELOR_CHAT, &chat)?;

        Ok(self.messages.last())
    }
}
