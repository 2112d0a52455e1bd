use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackCategory {
    #[default]
    General,
    AiResponses,
    VoiceFeatures,
    CounselorReferral,
    Technical,
    Suggestion,
}

impl FeedbackCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackCategory::General => "General Experience",
            FeedbackCategory::AiResponses => "AI Responses",
            FeedbackCategory::VoiceFeatures => "Voice Features",
            FeedbackCategory::CounselorReferral => "Counselor Referral",
            FeedbackCategory::Technical => "Technical Issues",
            FeedbackCategory::Suggestion => "Feature Suggestion",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackForm {
    /// Star rating, 1 to 5. Zero means "not rated".
    pub rating: u8,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub category: FeedbackCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    #[serde(flatten)]
    pub form: FeedbackForm,
    pub timestamp: jiff::Timestamp,
}

impl FeedbackEntry {
    pub fn submit(form: FeedbackForm) -> Result<Self, CoreError> {
        match form.rating {
            0 => Err(CoreError::MissingField(
                "rating: please provide a rating".to_string(),
            )),
            1..=5 => Ok(Self {
                form,
                timestamp: jiff::Timestamp::now(),
            }),
            other => Err(CoreError::InvalidField {
                field: "rating".to_string(),
                reason: format!("{other} is outside 1-5"),
            }),
        }
    }
}
