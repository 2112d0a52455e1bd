use rand::seq::SliceRandom;

use mindcare_core::models::chat::MessageSentiment;

use crate::crisis::{CRISIS_RESPONSE, contains_crisis_keyword};

const POSITIVE_REPLIES: [&str; 3] = [
    "That's wonderful to hear! I'm so glad you're feeling good. What's been helping you feel this way?",
    "It sounds like you're in a really positive space right now. That's amazing! Keep embracing those good feelings.",
    "I love hearing that you're doing well! Your positive energy is contagious.",
];

const NEUTRAL_REPLIES: [&str; 3] = [
    "Thank you for sharing that with me. Can you tell me more about what's on your mind?",
    "I hear you. Sometimes it's okay to feel neutral - it's all part of the human experience. What would help you feel a bit better?",
    "I appreciate you opening up to me. What's one small thing that might brighten your day?",
];

const NEGATIVE_REPLIES: [&str; 3] = [
    "I'm really sorry you're going through a difficult time. Your feelings are valid, and I'm here to support you. What's been weighing on your mind?",
    "It sounds like you're struggling right now, and that must be really hard. Remember, you're not alone in this. Would you like to talk about what's been difficult?",
    "Thank you for trusting me with how you're feeling. It takes courage to share when we're struggling. How can I best support you right now?",
];

/// The canned replies for a sentiment bucket.
pub fn replies_for(bucket: MessageSentiment) -> &'static [&'static str; 3] {
    match bucket {
        MessageSentiment::Positive => &POSITIVE_REPLIES,
        MessageSentiment::Neutral => &NEUTRAL_REPLIES,
        MessageSentiment::Negative => &NEGATIVE_REPLIES,
    }
}

/// Strategy for picking a reply given a sentiment bucket.
pub trait ReplySelector: Send + Sync {
    fn pick(&self, bucket: MessageSentiment) -> &'static str;
}

/// Uniformly random pick from the bucket.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomReplySelector;

impl ReplySelector for RandomReplySelector {
    fn pick(&self, bucket: MessageSentiment) -> &'static str {
        let replies = replies_for(bucket);
        replies
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(replies[0])
    }
}

/// Always picks the same position in the bucket, wrapping around.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedReplySelector {
    pub index: usize,
}

impl ReplySelector for FixedReplySelector {
    fn pick(&self, bucket: MessageSentiment) -> &'static str {
        let replies = replies_for(bucket);
        replies[self.index % replies.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionReply {
    pub text: &'static str,
    /// Set when a crisis keyword overrode the bucket selection.
    pub crisis: bool,
}

/// Produce the companion's reply to `message`.
///
/// A crisis keyword short-circuits the bucket lookup entirely and returns
/// [`CRISIS_RESPONSE`], whatever the sentiment.
pub fn generate_reply(
    message: &str,
    bucket: MessageSentiment,
    selector: &dyn ReplySelector,
) -> CompanionReply {
    if contains_crisis_keyword(message) {
        return CompanionReply {
            text: CRISIS_RESPONSE,
            crisis: true,
        };
    }
    CompanionReply {
        text: selector.pick(bucket),
        crisis: false,
    }
}
