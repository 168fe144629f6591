//! Session caching keyed by session identity
//!
//! Fetching and parsing a session is the slow part of building a chart, and
//! users flip between the same few venues repeatedly. [`SessionCache`] keeps
//! every parsed session behind an `Arc` so repeated cleans of one session
//! share a single fetch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;
use tracing::debug;

use super::{SessionKey, SessionLaps, SessionSource};
use crate::types::LapTable;
use crate::{Result, TimingError};

/// Cached session entry
#[derive(Debug, Clone)]
pub struct CachedSession {
    /// Parsed lap table
    pub laps: Arc<LapTable>,
    /// When the session was fetched and parsed
    pub loaded_at: SystemTime,
}

impl CachedSession {
    pub fn new(laps: Arc<LapTable>) -> Self {
        Self { laps, loaded_at: SystemTime::now() }
    }
}

/// Caller-owned memoising cache in front of a [`SessionSource`].
///
/// The cache can be shared between tasks (wrap it in an `Arc`); the source is
/// only asked for a session when no entry exists for its key. Failed lookups
/// are not cached.
pub struct SessionCache<S> {
    source: Mutex<S>,
    entries: Mutex<HashMap<SessionKey, CachedSession>>,
}

impl<S: SessionSource> SessionCache<S> {
    pub fn new(source: S) -> Self {
        Self { source: Mutex::new(source), entries: Mutex::new(HashMap::new()) }
    }

    /// Load a session, fetching and parsing it on a miss.
    ///
    /// # Errors
    ///
    /// - [`TimingError::SessionNotFound`] when the source has no such session
    /// - [`TimingError::Source`] when the source fails
    /// - [`TimingError::Parse`] or [`TimingError::MissingColumn`] when the lap
    ///   block is malformed
    pub async fn load(&self, key: &SessionKey) -> Result<Arc<LapTable>> {
        if let Some(laps) = self.get_cached(key).await {
            debug!(%key, "Using cached session");
            return Ok(laps);
        }

        // The source lock is held until the entry is stored, so fetches of one
        // key are serialised. Re-check once it is held: another task may have
        // loaded this key while we waited.
        let mut source = self.source.lock().await;
        if let Some(laps) = self.get_cached(key).await {
            debug!(%key, "Session loaded by another task");
            return Ok(laps);
        }

        debug!(%key, "Fetching session from source");
        let yaml = source
            .session_yaml(key)
            .await?
            .ok_or_else(|| TimingError::SessionNotFound { key: key.clone() })?;

        let laps = Arc::new(SessionLaps::parse(&yaml)?.into_table()?);
        debug!(%key, rows = laps.len(), bytes = yaml.len(), "Parsed session lap block");

        let mut entries = self.entries.lock().await;
        let entry = entries.entry(key.clone()).or_insert_with(|| CachedSession::new(laps));
        let laps = Arc::clone(&entry.laps);
        drop(entries);
        drop(source);
        Ok(laps)
    }

    /// Get a cached session without touching the source.
    pub async fn get_cached(&self, key: &SessionKey) -> Option<Arc<LapTable>> {
        self.entries.lock().await.get(key).map(|entry| Arc::clone(&entry.laps))
    }

    /// Get the full cache entry for a session.
    pub async fn entry(&self, key: &SessionKey) -> Option<CachedSession> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Drop one session; returns whether it was cached.
    pub async fn invalidate(&self, key: &SessionKey) -> bool {
        self.entries.lock().await.remove(key).is_some()
    }

    /// Drop every cached session.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Consume the cache and return its source.
    pub fn into_source(self) -> S {
        self.source.into_inner()
    }
}
