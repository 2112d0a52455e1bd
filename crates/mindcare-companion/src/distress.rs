//! Distress phrase detection. Pure predicate; the caller logs and escalates.

pub const DISTRESS_PHRASES: &[&str] = &[
    "I'm tired of everything",
    "I feel empty",
    "What's the point?",
    "I'm broken",
    "I don't care anymore",
    "No one understands me",
    "I just want it all to stop",
    "I'm worthless",
    "I hate myself",
    "It hurts too much",
];

/// True if `message` contains any distress phrase, ignoring case.
pub fn is_distress_phrase(message: &str) -> bool {
    let lower = message.to_lowercase();
    DISTRESS_PHRASES
        .iter()
        .any(|phrase| lower.contains(&phrase.to_lowercase()))
}
