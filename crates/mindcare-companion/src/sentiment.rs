//! Lexical message sentiment.
//!
//! Matching is case-folded substring containment, not tokenized word match:
//! "unhappy" counts as "happy" and "badge" counts as "bad". Each term counts
//! once no matter how often it appears. This is a known limitation of a
//! keyword classifier, not something to fix here.

use mindcare_core::models::chat::MessageSentiment;

pub const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "good",
    "great",
    "wonderful",
    "amazing",
    "excited",
    "joy",
    "love",
    "fantastic",
    "excellent",
    "better",
    "improvement",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "bad",
    "terrible",
    "awful",
    "hate",
    "angry",
    "depressed",
    "anxious",
    "worried",
    "stressed",
    "hurt",
    "pain",
    "cry",
    "hopeless",
    "alone",
    "scared",
];

/// Number of terms from `words` contained in the already case-folded `text`.
fn matches(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| text.contains(*w)).count()
}

/// Classify a free-text message. Ties, including 0/0, are neutral.
pub fn classify_message(text: &str) -> MessageSentiment {
    let lower = text.to_lowercase();
    let positive = matches(&lower, POSITIVE_WORDS);
    let negative = matches(&lower, NEGATIVE_WORDS);

    if negative > positive {
        MessageSentiment::Negative
    } else if positive > negative {
        MessageSentiment::Positive
    } else {
        MessageSentiment::Neutral
    }
}
