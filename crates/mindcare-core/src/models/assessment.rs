use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Three-level classification derived from an assessment average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentTier {
    Positive,
    Neutral,
    #[serde(rename = "Needs Support")]
    NeedsSupport,
}

impl SentimentTier {
    pub fn label(&self) -> &'static str {
        match self {
            SentimentTier::Positive => "Positive",
            SentimentTier::Neutral => "Neutral",
            SentimentTier::NeedsSupport => "Needs Support",
        }
    }
}

impl std::fmt::Display for SentimentTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A scored questionnaire. Created once, at completion, and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub answers: Vec<u8>,
    pub total_score: u32,
    pub average_score: f64,
    pub sentiment_level: SentimentTier,
    pub completed_at: jiff::Timestamp,
}

/// Blob written to local storage so the screen after sign-in can pick up
/// the anonymous assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHandoff {
    pub score: f64,
    pub total_score: u32,
    pub timestamp: jiff::Timestamp,
    pub answers: Vec<u8>,
}

impl From<&AssessmentResult> for ScoreHandoff {
    fn from(result: &AssessmentResult) -> Self {
        Self {
            score: result.average_score,
            total_score: result.total_score,
            timestamp: result.completed_at,
            answers: result.answers.clone(),
        }
    }
}

/// Row in the `sentiment_assessments` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: String,
    pub total_score: u32,
    pub average_score: f64,
    /// Answers keyed by question number ("1" through "10").
    pub answers: serde_json::Map<String, serde_json::Value>,
    pub sentiment_level: SentimentTier,
    pub created_at: jiff::Timestamp,
}

impl AssessmentRecord {
    pub fn from_result(user_id: impl Into<String>, result: &AssessmentResult) -> Self {
        let answers = result
            .answers
            .iter()
            .enumerate()
            .map(|(i, v)| ((i + 1).to_string(), serde_json::Value::from(*v)))
            .collect();

        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            total_score: result.total_score,
            average_score: result.average_score,
            answers,
            sentiment_level: result.sentiment_level,
            created_at: result.completed_at,
        }
    }
}
