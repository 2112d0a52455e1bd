//! The fixed ten-question mood check-in.
//!
//! Every question offers five options scored 5 (best) down to 1 (worst), so
//! a higher total always means a better day.

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;

/// One selectable answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub value: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: u8,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

/// Number of questions in a complete check-in.
pub const QUESTION_COUNT: usize = 10;

/// Lowest and highest value an answer can take.
pub const MIN_ANSWER: u8 = 1;
pub const MAX_ANSWER: u8 = 5;

/// All questions, in the order they are asked.
pub fn questionnaire() -> &'static [Question] {
    static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
        vec![
            question(1, "How are you feeling overall today?", ["Great", "Good", "Okay", "Not good", "Terrible"]),
            question(2, "How well did you sleep last night?", ["Very well", "Well", "Okay", "Poorly", "Very poorly"]),
            question(3, "How is your energy level?", ["Very high", "High", "Normal", "Low", "Very low"]),
            question(4, "How stressed do you feel?", ["Not at all", "A little", "Moderately", "Very", "Extremely"]),
            question(5, "How connected do you feel to others?", ["Very connected", "Connected", "Neutral", "Disconnected", "Very isolated"]),
            question(6, "How hopeful do you feel about the future?", ["Very hopeful", "Hopeful", "Neutral", "Pessimistic", "Hopeless"]),
            question(7, "How is your appetite?", ["Very good", "Good", "Normal", "Poor", "Very poor"]),
            question(8, "How well can you concentrate?", ["Very well", "Well", "Okay", "Poorly", "Very poorly"]),
            question(9, "How much do you enjoy activities you used to love?", ["Just as much", "Quite a bit", "Somewhat", "Very little", "Not at all"]),
            question(10, "How would you rate your overall mental wellbeing?", ["Excellent", "Good", "Fair", "Poor", "Very poor"]),
        ]
    });
    &QUESTIONS
}

/// Look up a question by its 1-based id.
pub fn get_question(id: u8) -> Result<&'static Question, AssessmentError> {
    questionnaire()
        .iter()
        .find(|q| q.id == id)
        .ok_or(AssessmentError::UnknownQuestion(id))
}

// Options are listed best-first and scored 5 down to 1.
fn question(id: u8, text: &str, labels: [&str; 5]) -> Question {
    Question {
        id,
        text: text.to_string(),
        options: labels
            .iter()
            .zip((MIN_ANSWER..=MAX_ANSWER).rev())
            .map(|(label, value)| AnswerOption {
                text: label.to_string(),
                value,
            })
            .collect(),
    }
}
