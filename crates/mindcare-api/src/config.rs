use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use mindcare_companion::config::DEFAULT_ESCALATION_DELAY;

/// Open chat sessions kept in memory before the least recently used is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// A session untouched for this long is closed and forgotten.
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Where structured records and per-user local state live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Records in S3, local state as files under the data directory.
    S3,
    /// Everything in process memory. Lost on restart.
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bucket: String,
    pub data_dir: PathBuf,
    pub escalation_delay: Duration,
    pub store: StoreBackend,
    pub max_sessions: usize,
    pub session_idle_timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys fall back to defaults;
    /// set but malformed values are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bucket = lookup("MINDCARE_BUCKET").unwrap_or_else(|| "mindcare".to_string());
        let data_dir = lookup("MINDCARE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/tmp/mindcare"));

        let escalation_delay = parse::<u64>(&lookup, "MINDCARE_ESCALATION_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ESCALATION_DELAY);

        let store = match lookup("MINDCARE_STORE").as_deref().map(str::trim) {
            None | Some("s3") => StoreBackend::S3,
            Some("memory") => StoreBackend::Memory,
            Some(other) => eyre::bail!("unknown MINDCARE_STORE {other:?}, expected s3 or memory"),
        };

        let max_sessions = match parse::<usize>(&lookup, "MINDCARE_MAX_SESSIONS")? {
            Some(0) => eyre::bail!("MINDCARE_MAX_SESSIONS must be at least 1"),
            Some(n) => n,
            None => DEFAULT_MAX_SESSIONS,
        };

        let session_idle_timeout = parse::<u64>(&lookup, "MINDCARE_SESSION_IDLE_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SESSION_IDLE_TIMEOUT);

        Ok(Self {
            bucket,
            data_dir,
            escalation_delay,
            store,
            max_sessions,
            session_idle_timeout,
        })
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| eyre::eyre!("{key} must be a non-negative integer, got {raw:?}: {e}"))
        })
        .transpose()
}
