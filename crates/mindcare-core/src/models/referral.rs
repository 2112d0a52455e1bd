use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Normal,
    Urgent,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredTime {
    #[default]
    Unspecified,
    /// 8 AM - 12 PM
    Morning,
    /// 12 PM - 5 PM
    Afternoon,
    /// 5 PM - 8 PM
    Evening,
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralStatus {
    #[default]
    Pending,
}

/// Contact form fields as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub preferred_time: PreferredTime,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub message: String,
}

/// A submitted referral request. Write-once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub form: ReferralForm,
    pub timestamp: jiff::Timestamp,
    pub status: ReferralStatus,
}

/// Shown after a referral is accepted.
pub const REFERRAL_ACKNOWLEDGEMENT: &str = "A professional counselor will contact you within 24 hours. \
     If this is an emergency, please call 988 (Suicide & Crisis Lifeline).";

impl ReferralRequest {
    /// Validate the form and stamp it as a pending request. Name, email and
    /// phone are required.
    pub fn submit(form: ReferralForm) -> Result<Self, CoreError> {
        if form.name.trim().is_empty() {
            return Err(CoreError::MissingField("name".to_string()));
        }
        let email = form.email.trim();
        if email.is_empty() {
            return Err(CoreError::MissingField("email".to_string()));
        }
        if !email.contains('@') {
            return Err(CoreError::InvalidField {
                field: "email".to_string(),
                reason: format!("'{email}' is not an email address"),
            });
        }
        if form.phone.trim().is_empty() {
            return Err(CoreError::MissingField("phone".to_string()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            form,
            timestamp: jiff::Timestamp::now(),
            status: ReferralStatus::Pending,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounselorSender {
    User,
    Counselor,
}

/// A message in the live-support panel on the referral screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounselorMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: CounselorSender,
    pub timestamp: jiff::Timestamp,
}

impl CounselorMessage {
    pub fn new(text: impl Into<String>, sender: CounselorSender) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: jiff::Timestamp::now(),
        }
    }
}

/// Snapshot of the live-support transcript, rewritten after every exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounselorChat {
    pub messages: Vec<CounselorMessage>,
    pub timestamp: Option<jiff::Timestamp>,
}
