use mindcare_core::models::assessment::{AssessmentResult, SentimentTier};

use crate::error::{AssessmentError, InputProblem};
use crate::questionnaire::{MAX_ANSWER, MIN_ANSWER, QUESTION_COUNT};

/// Average at or above which a check-in is `Positive`.
pub const POSITIVE_THRESHOLD: f64 = 4.0;

/// Average at or above which a check-in is `Neutral`.
pub const NEUTRAL_THRESHOLD: f64 = 3.0;

/// Map an average score to its tier.
///
/// Thresholds are checked in descending order and the first match wins, so
/// boundary values land on the higher tier: exactly 4.0 is `Positive` and
/// exactly 3.0 is `Neutral`.
pub fn classify(average: f64) -> SentimentTier {
    if average >= POSITIVE_THRESHOLD {
        SentimentTier::Positive
    } else if average >= NEUTRAL_THRESHOLD {
        SentimentTier::Neutral
    } else {
        SentimentTier::NeedsSupport
    }
}

/// Check that `answers` is a complete, in-range response set.
pub fn validate_answers(answers: &[u8]) -> Result<(), InputProblem> {
    if answers.len() != QUESTION_COUNT {
        return Err(InputProblem::WrongLength {
            expected: QUESTION_COUNT,
            actual: answers.len(),
        });
    }
    if let Some((i, value)) = answers
        .iter()
        .enumerate()
        .find(|(_, v)| !(MIN_ANSWER..=MAX_ANSWER).contains(*v))
    {
        return Err(InputProblem::OutOfRange {
            question: i + 1,
            value: *value,
        });
    }
    Ok(())
}

/// Score a complete response set.
///
/// `total_score` is the plain sum (10–50) and `average_score` is
/// `total_score / 10` (1.0–5.0).
pub fn score_answers(answers: &[u8]) -> Result<AssessmentResult, AssessmentError> {
    validate_answers(answers)?;

    let total_score: u32 = answers.iter().map(|&a| u32::from(a)).sum();
    let average_score = f64::from(total_score) / QUESTION_COUNT as f64;

    Ok(AssessmentResult {
        answers: answers.to_vec(),
        total_score,
        average_score,
        sentiment_level: classify(average_score),
        completed_at: jiff::Timestamp::now(),
    })
}

/// What happens after an answer is recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizStep {
    /// Ask the question at this 0-based index next.
    Next(usize),
    Completed(AssessmentResult),
}

/// Collects answers one question at a time.
#[derive(Debug, Default, Clone)]
pub struct QuizProgress {
    answers: Vec<u8>,
    completed: bool,
}

impl QuizProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Record the answer to the current question.
    pub fn answer(&mut self, value: u8) -> Result<QuizStep, AssessmentError> {
        if self.completed {
            return Err(InputProblem::AlreadyCompleted.into());
        }
        if !(MIN_ANSWER..=MAX_ANSWER).contains(&value) {
            return Err(InputProblem::OutOfRange {
                question: self.answers.len() + 1,
                value,
            }
            .into());
        }

        self.answers.push(value);
        if self.answers.len() < QUESTION_COUNT {
            return Ok(QuizStep::Next(self.answers.len()));
        }

        let result = score_answers(&self.answers)?;
        self.completed = true;
        Ok(QuizStep::Completed(result))
    }

    /// Completion percentage, 0–100.
    pub fn progress_percent(&self) -> f64 {
        self.answers.len() as f64 / QUESTION_COUNT as f64 * 100.0
    }
}
