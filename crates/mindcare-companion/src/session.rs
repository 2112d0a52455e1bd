//! The escalation coordinator.
//!
//! One `CompanionSession` per open chat screen. It owns the transcript, runs
//! each submitted message through the classifiers synchronously, and hands
//! the user off to counselor referral when distress is detected.
//!
//! ```text
//! AwaitingInput -> Scoring -> Normal -> AwaitingInput
//!                          \-> Escalating
//!                          \-> AwaitingInput   (hand-off could not be scheduled)
//! (any) -> Terminal          (explicit navigation away only)
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use mindcare_audit::events::{AuditAction, AuditEvent};
use mindcare_core::models::chat::{ChatMessage, MessageSentiment};
use mindcare_core::models::distress::DistressLogEntry;
use mindcare_core::storage_keys;
use mindcare_storage::local::LocalStore;
use mindcare_storage::state;

use crate::config::CompanionConfig;
use crate::distress::is_distress_phrase;
use crate::error::CompanionError;
use crate::escalation::ScheduledHandoff;
use crate::navigation::{Navigator, Route};
use crate::replies::{RandomReplySelector, ReplySelector, generate_reply};
use crate::sentiment::classify_message;
use crate::voice::{Silent, SpeechSynthesizer, speak_best_effort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    AwaitingInput,
    Scoring,
    Normal,
    Escalating,
    Terminal,
}

impl SessionState {
    fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (AwaitingInput, Scoring)
                | (Scoring, AwaitingInput)
                | (Scoring, Normal)
                | (Scoring, Escalating)
                | (Normal, AwaitingInput)
                | (_, Terminal)
        )
    }
}

/// Session-scoped escalation flags, passed to whatever screen comes next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationState {
    /// A crisis keyword was matched; surface the referral call-to-action.
    pub needs_counselor: bool,
    /// A distress phrase was matched and the hand-off was scheduled.
    pub distress_detected: bool,
}

/// What a submitted message led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input, or a message sent while already escalating.
    Ignored,
    /// The user message and the companion reply were appended.
    Replied {
        reply: ChatMessage,
        sentiment: MessageSentiment,
        crisis: bool,
    },
    /// A distress phrase was detected; navigation to `route` follows after
    /// `delay`. Nothing was appended to the transcript.
    Escalated { route: Route, delay: Duration },
}

pub struct CompanionSession {
    config: CompanionConfig,
    state: SessionState,
    messages: Vec<ChatMessage>,
    mood: MessageSentiment,
    escalation: EscalationState,
    handoff: Option<ScheduledHandoff>,
    welcome_spoken: bool,
    local: Arc<dyn LocalStore>,
    navigator: Arc<dyn Navigator>,
    selector: Box<dyn ReplySelector>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl CompanionSession {
    pub fn new(
        config: CompanionConfig,
        local: Arc<dyn LocalStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            state: SessionState::AwaitingInput,
            messages: Vec::new(),
            mood: MessageSentiment::Neutral,
            escalation: EscalationState::default(),
            handoff: None,
            welcome_spoken: false,
            local,
            navigator,
            selector: Box::new(RandomReplySelector),
            synthesizer: Arc::new(Silent),
        }
    }

    pub fn with_selector(mut self, selector: Box<dyn ReplySelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Post the welcome message. Spoken at most once per session.
    pub fn start(&mut self) -> &ChatMessage {
        let name = self.config.user_name.as_deref().unwrap_or("there");
        let welcome = ChatMessage::companion(
            format!(
                "Hello {name}! I'm your AI mental health companion. How are you feeling today? \
                 Feel free to share what's on your mind, and I'll do my best to support you."
            ),
            MessageSentiment::Positive,
        );

        if self.config.speech_enabled && !self.welcome_spoken {
            speak_best_effort(self.synthesizer.as_ref(), &welcome.text);
            self.welcome_spoken = true;
        }

        self.messages.push(welcome);
        &self.messages[self.messages.len() - 1]
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sentiment of the last processed message.
    pub fn mood(&self) -> MessageSentiment {
        self.mood
    }

    pub fn escalation(&self) -> EscalationState {
        self.escalation
    }

    pub fn pending_handoff(&self) -> Option<Route> {
        self.handoff
            .as_ref()
            .filter(|h| !h.is_finished())
            .map(ScheduledHandoff::route)
    }

    pub fn set_speech_enabled(&mut self, enabled: bool) {
        self.config.speech_enabled = enabled;
        if !enabled && let Err(e) = self.synthesizer.cancel() {
            tracing::warn!(error = %e, "speech cancel failed");
        }
    }

    /// Run one user message through the coordinator.
    ///
    /// The distress check runs first; when it fires, the message gets no
    /// further chat processing. Otherwise the message is classified, the
    /// crisis override is checked, and both the message and the reply are
    /// appended.
    pub fn submit(&mut self, text: &str) -> Result<SubmitOutcome, CompanionError> {
        match self.state {
            SessionState::Terminal => return Err(CompanionError::SessionClosed),
            SessionState::Escalating => return Ok(SubmitOutcome::Ignored),
            _ => {}
        }
        if text.trim().is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        self.transition(SessionState::Scoring)?;

        if is_distress_phrase(text) {
            return self.escalate(text);
        }

        let sentiment = classify_message(text);
        self.mood = sentiment;

        let generated = generate_reply(text, sentiment, self.selector.as_ref());
        if generated.crisis {
            self.flag_crisis(text);
        }

        let reply = ChatMessage::companion(generated.text, sentiment);
        self.messages.push(ChatMessage::user(text));
        self.messages.push(reply.clone());

        self.transition(SessionState::Normal)?;
        if self.config.speech_enabled {
            speak_best_effort(self.synthesizer.as_ref(), &reply.text);
        }
        self.transition(SessionState::AwaitingInput)?;

        Ok(SubmitOutcome::Replied {
            reply,
            sentiment,
            crisis: generated.crisis,
        })
    }

    /// Leave the chat screen: cancel any pending hand-off, stop speech, and
    /// clear the transcript.
    pub fn close(&mut self) {
        if self.state == SessionState::Terminal {
            return;
        }
        if let Some(handoff) = self.handoff.take() {
            handoff.cancel();
        }
        if let Err(e) = self.synthesizer.cancel() {
            tracing::warn!(error = %e, "speech cancel failed");
        }
        self.messages.clear();
        self.state = SessionState::Terminal;

        AuditEvent::new(
            AuditAction::SessionClosed,
            "chat_session",
            "companion",
            self.config.user_id.clone(),
        )
        .emit();
    }

    fn escalate(&mut self, text: &str) -> Result<SubmitOutcome, CompanionError> {
        self.append_distress_log(text, true);

        let delay = self.config.escalation_delay;
        let handoff =
            match ScheduledHandoff::schedule(delay, self.navigator.clone(), Route::Counselor) {
                Ok(handoff) => handoff,
                Err(e) => {
                    // The log entry stays; the chat goes back to accepting input.
                    self.transition(SessionState::AwaitingInput)?;
                    return Err(e);
                }
            };

        self.escalation.distress_detected = true;
        self.transition(SessionState::Escalating)?;
        self.handoff = Some(handoff);

        AuditEvent::new(
            AuditAction::DistressDetected,
            "chat_session",
            "companion",
            self.config.user_id.clone(),
        )
        .with_details(serde_json::json!({ "redirected": true }))
        .emit();

        Ok(SubmitOutcome::Escalated {
            route: Route::Counselor,
            delay,
        })
    }

    fn flag_crisis(&mut self, text: &str) {
        self.escalation.needs_counselor = true;
        self.append_distress_log(text, false);

        if let Err(e) = state::save_json(self.local.as_ref(), storage_keys::NEEDS_COUNSELOR, &true) {
            error!(error = %e, "failed to persist counselor flag");
        }

        AuditEvent::new(
            AuditAction::CrisisKeywordMatched,
            "chat_session",
            "companion",
            self.config.user_id.clone(),
        )
        .emit();
    }

    fn append_distress_log(&self, text: &str, redirected: bool) {
        let entry = DistressLogEntry::new(self.config.user_id.clone(), text, redirected);
        match state::append_json(self.local.as_ref(), storage_keys::DISTRESS_LOGS, entry) {
            Ok(count) => info!(count, redirected, "distress log appended"),
            Err(e) => error!(error = %e, "failed to append distress log"),
        }
    }

    fn transition(&mut self, next: SessionState) -> Result<(), CompanionError> {
        if !self.state.can_transition_to(next) {
            return Err(CompanionError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!(from = ?self.state, to = ?next, "session transition");
        self.state = next;
        Ok(())
    }
}

impl Drop for CompanionSession {
    fn drop(&mut self) {
        self.close();
    }
}
