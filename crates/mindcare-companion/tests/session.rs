use std::sync::{Arc, Mutex};
use std::time::Duration;

use mindcare_companion::config::CompanionConfig;
use mindcare_companion::crisis::CRISIS_RESPONSE;
use mindcare_companion::error::{CompanionError, VoiceError};
use mindcare_companion::navigation::{Route, WatchNavigator};
use mindcare_companion::replies::{FixedReplySelector, replies_for};
use mindcare_companion::session::{CompanionSession, SessionState, SubmitOutcome};
use mindcare_companion::voice::{SpeechSynthesizer, UtteranceSettings};
use mindcare_core::models::chat::{MessageSentiment, Sender};
use mindcare_core::models::distress::DistressLogEntry;
use mindcare_core::storage_keys;
use mindcare_storage::local::{LocalStore, MemoryLocalStore};
use mindcare_storage::state;

#[derive(Default)]
struct RecordingSynth {
    spoken: Mutex<Vec<String>>,
}

impl SpeechSynthesizer for RecordingSynth {
    fn speak(&self, text: &str, _: &UtteranceSettings) -> Result<(), VoiceError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn cancel(&self) -> Result<(), VoiceError> {
        Ok(())
    }
}

struct BrokenSynth;

impl SpeechSynthesizer for BrokenSynth {
    fn speak(&self, _: &str, _: &UtteranceSettings) -> Result<(), VoiceError> {
        Err(VoiceError::Synthesis("device busy".to_string()))
    }

    fn cancel(&self) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported)
    }
}

struct Harness {
    local: Arc<MemoryLocalStore>,
    navigator: Arc<WatchNavigator>,
    session: CompanionSession,
}

fn harness(config: CompanionConfig) -> Harness {
    let local = Arc::new(MemoryLocalStore::new());
    let navigator = Arc::new(WatchNavigator::new());
    let mut session = CompanionSession::new(config, local.clone(), navigator.clone())
        .with_selector(Box::new(FixedReplySelector { index: 0 }));
    session.start();
    Harness {
        local,
        navigator,
        session,
    }
}

fn distress_logs(local: &dyn LocalStore) -> Vec<DistressLogEntry> {
    state::load_list(local, storage_keys::DISTRESS_LOGS).unwrap()
}

#[tokio::test]
async fn welcome_message_greets_by_name() {
    let h = harness(CompanionConfig {
        user_name: Some("Ana".to_string()),
        ..Default::default()
    });
    let messages = h.session.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].text.starts_with("Hello Ana! I'm your AI mental health companion."));
    assert_eq!(messages[0].sender, Sender::Companion);
    assert_eq!(messages[0].sentiment, Some(MessageSentiment::Positive));
}

#[tokio::test]
async fn normal_message_appends_user_and_reply() {
    let mut h = harness(CompanionConfig::default());

    let outcome = h.session.submit("I feel great and happy today").unwrap();
    match outcome {
        SubmitOutcome::Replied {
            reply,
            sentiment,
            crisis,
        } => {
            assert_eq!(sentiment, MessageSentiment::Positive);
            assert!(!crisis);
            assert_eq!(reply.text, replies_for(MessageSentiment::Positive)[0]);
        }
        other => panic!("expected reply, got {other:?}"),
    }

    let messages = h.session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].text, "I feel great and happy today");
    assert_eq!(messages[2].sender, Sender::Companion);
    assert_eq!(h.session.state(), SessionState::AwaitingInput);
    assert_eq!(h.session.mood(), MessageSentiment::Positive);
    assert!(distress_logs(h.local.as_ref()).is_empty());
}

#[tokio::test]
async fn blank_message_is_ignored() {
    let mut h = harness(CompanionConfig::default());
    assert_eq!(h.session.submit("   ").unwrap(), SubmitOutcome::Ignored);
    assert_eq!(h.session.messages().len(), 1);
    assert_eq!(h.session.state(), SessionState::AwaitingInput);
}

#[tokio::test]
async fn crisis_keyword_sets_session_flag_and_persists_it() {
    let mut h = harness(CompanionConfig {
        user_id: Some("u1".to_string()),
        ..Default::default()
    });

    let outcome = h.session.submit("I want to end it all").unwrap();
    let SubmitOutcome::Replied { reply, crisis, .. } = outcome else {
        panic!("expected reply");
    };
    assert!(crisis);
    assert_eq!(reply.text, CRISIS_RESPONSE);
    assert!(h.session.escalation().needs_counselor);
    assert_eq!(h.session.state(), SessionState::AwaitingInput);

    let flag: Option<bool> = state::load_json(h.local.as_ref(), storage_keys::NEEDS_COUNSELOR).unwrap();
    assert_eq!(flag, Some(true));

    let logs = distress_logs(h.local.as_ref());
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id.as_deref(), Some("u1"));
    assert!(!logs[0].redirected);
    assert_eq!(h.navigator.pending(), None);
}

#[tokio::test(start_paused = true)]
async fn distress_phrase_escalates_after_delay() {
    let mut h = harness(CompanionConfig::default());
    let mut rx = h.navigator.subscribe();
    let started = tokio::time::Instant::now();

    let outcome = h.session.submit("I feel empty today").unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Escalated {
            route: Route::Counselor,
            delay: Duration::from_millis(3000),
        }
    );
    assert_eq!(h.session.state(), SessionState::Escalating);
    assert!(h.session.escalation().distress_detected);
    assert_eq!(h.session.messages().len(), 1, "no chat processing for the message");
    assert_eq!(h.session.pending_handoff(), Some(Route::Counselor));

    let logs = distress_logs(h.local.as_ref());
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id, None);
    assert_eq!(logs[0].trigger_message, "I feel empty today");
    assert!(logs[0].redirected);

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), Some(Route::Counselor));
    assert!(started.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn messages_while_escalating_are_ignored() {
    let mut h = harness(CompanionConfig::default());
    h.session.submit("I'm worthless").unwrap();
    assert_eq!(h.session.submit("hello?").unwrap(), SubmitOutcome::Ignored);
    assert_eq!(distress_logs(h.local.as_ref()).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn closing_cancels_pending_handoff() {
    let mut h = harness(CompanionConfig::default());
    h.session.submit("It hurts too much").unwrap();

    h.session.close();
    assert_eq!(h.session.state(), SessionState::Terminal);
    assert!(h.session.messages().is_empty());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(h.navigator.pending(), None);
    assert_eq!(distress_logs(h.local.as_ref()).len(), 1, "log entries survive teardown");
}

#[tokio::test(start_paused = true)]
async fn dropping_session_cancels_pending_handoff() {
    let h = harness(CompanionConfig::default());
    let navigator = h.navigator.clone();
    let mut session = h.session;
    session.submit("No one understands me").unwrap();
    drop(session);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(navigator.pending(), None);
}

#[tokio::test]
async fn closed_session_rejects_messages() {
    let mut h = harness(CompanionConfig::default());
    h.session.close();
    assert!(matches!(
        h.session.submit("hi"),
        Err(CompanionError::SessionClosed)
    ));
}

#[test]
fn escalation_without_runtime_reports_error() {
    let local = Arc::new(MemoryLocalStore::new());
    let navigator = Arc::new(WatchNavigator::new());
    let mut session = CompanionSession::new(CompanionConfig::default(), local.clone(), navigator);

    assert!(matches!(
        session.submit("I'm broken"),
        Err(CompanionError::NoRuntime)
    ));
    assert_eq!(distress_logs(local.as_ref()).len(), 1);

    // the chat stays usable
    assert_eq!(session.state(), SessionState::AwaitingInput);
    assert!(!session.escalation().distress_detected);
    assert_eq!(session.pending_handoff(), None);
    assert!(matches!(
        session.submit("I feel great and happy"),
        Ok(SubmitOutcome::Replied { .. })
    ));
    assert_eq!(session.state(), SessionState::AwaitingInput);
}

#[tokio::test]
async fn welcome_and_replies_are_spoken_when_enabled() {
    let synth = Arc::new(RecordingSynth::default());
    let mut session = CompanionSession::new(
        CompanionConfig::default(),
        Arc::new(MemoryLocalStore::new()),
        Arc::new(WatchNavigator::new()),
    )
    .with_selector(Box::new(FixedReplySelector { index: 2 }))
    .with_synthesizer(synth.clone());

    session.start();
    session.start();
    session.submit("ok").unwrap();
    session.set_speech_enabled(false);
    session.submit("still ok").unwrap();

    let spoken = synth.spoken.lock().unwrap();
    assert_eq!(spoken.len(), 2, "welcome once, then one reply");
    assert_eq!(spoken[1], replies_for(MessageSentiment::Neutral)[2]);
}

#[tokio::test]
async fn voice_failures_do_not_break_chat() {
    let mut session = CompanionSession::new(
        CompanionConfig::default(),
        Arc::new(MemoryLocalStore::new()),
        Arc::new(WatchNavigator::new()),
    )
    .with_synthesizer(Arc::new(BrokenSynth));

    session.start();
    let outcome = session.submit("I am sad").unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Replied {
            sentiment: MessageSentiment::Negative,
            ..
        }
    ));
    session.close();
    assert_eq!(session.state(), SessionState::Terminal);
}
