use thiserror::Error;

/// Why a set of answers cannot be scored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputProblem {
    #[error("expected {expected} answers, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("answer to question {question} is {value}, outside [1, 5]")]
    OutOfRange { question: usize, value: u8 },

    #[error("questionnaire already completed")]
    AlreadyCompleted,
}

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("invalid assessment input: {0}")]
    InvalidAssessmentInput(#[from] InputProblem),

    #[error("unknown question: {0}")]
    UnknownQuestion(u8),
}
