use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use mindcare_api::error::ApiError;
use mindcare_api::state::{LocalStores, OpenSession, SessionRegistry};
use mindcare_companion::config::CompanionConfig;
use mindcare_companion::navigation::{Route, WatchNavigator};
use mindcare_companion::session::{CompanionSession, SessionState, SubmitOutcome};
use mindcare_storage::local::{LocalStore, MemoryLocalStore};

fn open_session(escalation_delay: Duration) -> OpenSession {
    let navigator = Arc::new(WatchNavigator::new());
    let config = CompanionConfig {
        escalation_delay,
        speech_enabled: false,
        ..CompanionConfig::default()
    };
    let session = CompanionSession::new(config, Arc::new(MemoryLocalStore::new()), navigator.clone());
    OpenSession::new(session, navigator, None)
}

#[tokio::test]
async fn file_scopes_are_directories_per_user() {
    let root = tempfile::tempdir().unwrap();
    let stores = LocalStores::Files(root.path().to_path_buf());

    let alice = stores.scoped(Some("alice")).await.unwrap();
    alice.set("needsCounselor", "true").unwrap();

    let anonymous = stores.scoped(None).await.unwrap();
    assert!(anonymous.get("needsCounselor").unwrap().is_none());

    assert!(root.path().join("alice").join("needsCounselor.json").exists());
    assert!(root.path().join("anonymous").is_dir());

    let again = stores.scoped(Some("alice")).await.unwrap();
    assert_eq!(again.get("needsCounselor").unwrap().as_deref(), Some("true"));
}

#[tokio::test]
async fn memory_scopes_share_one_store_per_user() {
    let stores = LocalStores::memory();

    stores.scoped(Some("bob")).await.unwrap().set("k", "v").unwrap();
    let again = stores.scoped(Some("bob")).await.unwrap();
    assert_eq!(again.get("k").unwrap().as_deref(), Some("v"));
    assert!(stores.scoped(Some("carol")).await.unwrap().get("k").unwrap().is_none());
}

#[tokio::test]
async fn path_like_user_ids_are_rejected() {
    let stores = LocalStores::memory();
    for bad in ["../up", "a/b", "", "white space"] {
        assert!(matches!(
            stores.scoped(Some(bad)).await,
            Err(ApiError::BadRequest(_))
        ));
    }
}

#[tokio::test(start_paused = true)]
async fn full_registry_evicts_least_recently_used() {
    let mut registry = SessionRegistry::new(2, Duration::from_secs(3600));
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    registry.insert(a, open_session(Duration::from_secs(3)));
    tokio::time::advance(Duration::from_secs(1)).await;
    registry.insert(b, open_session(Duration::from_secs(3)));
    tokio::time::advance(Duration::from_secs(1)).await;

    // touching `a` makes `b` the oldest
    assert!(registry.get_mut(&a).is_some());
    tokio::time::advance(Duration::from_secs(1)).await;
    registry.insert(c, open_session(Duration::from_secs(3)));

    assert_eq!(registry.len(), 2);
    assert!(registry.get_mut(&a).is_some());
    assert!(registry.get_mut(&b).is_none());
    assert!(registry.get_mut(&c).is_some());
}

#[tokio::test(start_paused = true)]
async fn idle_sessions_expire() {
    let mut registry = SessionRegistry::new(16, Duration::from_secs(60));
    let (idle, busy) = (Uuid::new_v4(), Uuid::new_v4());
    registry.insert(idle, open_session(Duration::from_secs(3)));
    registry.insert(busy, open_session(Duration::from_secs(3)));

    tokio::time::advance(Duration::from_secs(40)).await;
    assert!(registry.get_mut(&busy).is_some());
    tokio::time::advance(Duration::from_secs(30)).await;

    assert!(registry.get_mut(&idle).is_none());
    assert!(registry.get_mut(&busy).is_some());
    assert_eq!(registry.len(), 1);

    tokio::time::advance(Duration::from_secs(61)).await;
    registry.sweep();
    assert!(registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn handed_off_sessions_are_closed() {
    let mut registry = SessionRegistry::new(16, Duration::from_secs(3600));
    let id = Uuid::new_v4();
    registry.insert(id, open_session(Duration::from_millis(10)));

    let open = registry.get_mut(&id).unwrap();
    let outcome = open.session.submit("I feel empty").unwrap();
    assert!(matches!(outcome, SubmitOutcome::Escalated { .. }));

    tokio::time::sleep(Duration::from_millis(20)).await;

    let open = registry.get_mut(&id).unwrap();
    assert_eq!(open.session.state(), SessionState::Terminal);
    assert_eq!(open.navigator.pending(), Some(Route::Counselor));
    assert!(open.session.messages().is_empty());
}

#[tokio::test]
async fn zero_capacity_still_holds_one_session() {
    let mut registry = SessionRegistry::new(0, Duration::from_secs(60));
    let id = Uuid::new_v4();
    registry.insert(id, open_session(Duration::from_secs(3)));
    assert_eq!(registry.len(), 1);
    assert!(registry.get_mut(&id).is_some());
}
