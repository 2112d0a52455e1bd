//! Crisis keyword override.
//!
//! Independent of [`crate::distress`]: different trigger list, checked during
//! normal reply generation rather than before it. The two lists are kept as
//! separate predicates on purpose until product decides how they relate.

pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "disappear",
    "hopeless",
    "can't go on",
];

pub const CRISIS_RESPONSE: &str = "I'm very concerned about what you've shared with me. \
Your life has value, and there are people who want to help. Would you like me to connect \
you with a professional counselor who can provide immediate support? You don't have to go \
through this alone.";

/// True if `message` contains any crisis keyword, ignoring case.
pub fn contains_crisis_keyword(message: &str) -> bool {
    let lower = message.to_lowercase();
    CRISIS_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
