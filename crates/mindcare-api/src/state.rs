use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use mindcare_companion::navigation::WatchNavigator;
use mindcare_companion::session::{CompanionSession, SessionState};
use mindcare_storage::local::{FileLocalStore, LocalStore, MemoryLocalStore};
use mindcare_storage::records::{MemoryRecordStore, RecordStore, S3RecordStore};

use crate::config::{
    ApiConfig, DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_TIMEOUT, StoreBackend,
};
use crate::error::ApiError;

/// Local state namespace for requests without a user id.
const ANONYMOUS_SCOPE: &str = "anonymous";

/// A companion chat and the navigator it reports hand-offs to.
pub struct OpenSession {
    pub session: CompanionSession,
    pub navigator: Arc<WatchNavigator>,
    pub user_id: Option<String>,
    last_touched: Instant,
}

impl OpenSession {
    pub fn new(
        session: CompanionSession,
        navigator: Arc<WatchNavigator>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            session,
            navigator,
            user_id,
            last_touched: Instant::now(),
        }
    }

    /// The escalation hand-off has fired and the client was sent elsewhere.
    fn handed_off(&self) -> bool {
        self.session.state() == SessionState::Escalating && self.navigator.pending().is_some()
    }
}

/// Companion sessions held in memory, bounded by count and idle time.
///
/// Closed sessions stay as `Terminal` entries so later requests can tell a
/// closed session from an unknown one, until they age out like any other.
/// A session whose hand-off has navigated away is closed on the next sweep.
pub struct SessionRegistry {
    entries: HashMap<Uuid, OpenSession>,
    capacity: usize,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(capacity: usize, idle_timeout: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            idle_timeout,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a session, evicting the least recently touched ones if full.
    pub fn insert(&mut self, id: Uuid, open: OpenSession) {
        self.sweep();
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, open)| open.last_touched)
                .map(|(id, _)| *id)
            else {
                break;
            };
            info!(session_id = %oldest, "evicting least recently used session");
            self.entries.remove(&oldest);
        }
        self.entries.insert(id, open);
    }

    /// Look a session up and mark it as used.
    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut OpenSession> {
        self.sweep();
        let open = self.entries.get_mut(id)?;
        open.last_touched = Instant::now();
        Some(open)
    }

    /// Close handed-off sessions and drop idle ones. Dropping a session
    /// closes it, which cancels any pending hand-off.
    pub fn sweep(&mut self) {
        let now = Instant::now();
        let idle_timeout = self.idle_timeout;
        self.entries.retain(|id, open| {
            if open.handed_off() {
                debug!(session_id = %id, "closing session after hand-off");
                open.session.close();
            }
            let idle = now.duration_since(open.last_touched) >= idle_timeout;
            if idle {
                debug!(session_id = %id, "dropping idle session");
            }
            !idle
        });
    }
}

/// Per-user key/value state, one namespace per user id.
#[derive(Clone)]
pub enum LocalStores {
    Files(PathBuf),
    Memory(Arc<Mutex<HashMap<String, Arc<MemoryLocalStore>>>>),
}

impl LocalStores {
    pub fn memory() -> Self {
        LocalStores::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    /// The local store for `user_id`, or the shared anonymous one.
    pub async fn scoped(&self, user_id: Option<&str>) -> Result<Arc<dyn LocalStore>, ApiError> {
        let scope = user_id.unwrap_or(ANONYMOUS_SCOPE);
        if scope.is_empty()
            || !scope
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ApiError::BadRequest(format!("invalid user id: {scope:?}")));
        }

        let store: Arc<dyn LocalStore> = match self {
            LocalStores::Files(root) => Arc::new(FileLocalStore::new(root.join(scope))?),
            LocalStores::Memory(stores) => stores
                .lock()
                .await
                .entry(scope.to_string())
                .or_insert_with(|| Arc::new(MemoryLocalStore::new()))
                .clone(),
        };
        Ok(store)
    }
}

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub local: LocalStores,
    pub sessions: Arc<Mutex<SessionRegistry>>,
    pub escalation_delay: Duration,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordStore>, local: LocalStores, escalation_delay: Duration) -> Self {
        Self {
            records,
            local,
            sessions: Arc::new(Mutex::new(SessionRegistry::new(
                DEFAULT_MAX_SESSIONS,
                DEFAULT_SESSION_IDLE_TIMEOUT,
            ))),
            escalation_delay,
        }
    }

    pub fn with_session_limits(mut self, capacity: usize, idle_timeout: Duration) -> Self {
        self.sessions = Arc::new(Mutex::new(SessionRegistry::new(capacity, idle_timeout)));
        self
    }

    pub fn in_memory(escalation_delay: Duration) -> Self {
        Self::new(
            Arc::new(MemoryRecordStore::new()),
            LocalStores::memory(),
            escalation_delay,
        )
    }

    pub async fn from_config(config: &ApiConfig) -> eyre::Result<Self> {
        let state = match config.store {
            StoreBackend::Memory => Self::in_memory(config.escalation_delay),
            StoreBackend::S3 => {
                let s3 = mindcare_storage::client::build_client().await;
                std::fs::create_dir_all(&config.data_dir)?;
                Self::new(
                    Arc::new(S3RecordStore::new(s3, config.bucket.clone())),
                    LocalStores::Files(config.data_dir.clone()),
                    config.escalation_delay,
                )
            }
        };
        Ok(state.with_session_limits(config.max_sessions, config.session_idle_timeout))
    }
}
