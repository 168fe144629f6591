//! Source trait for session lap data

use std::collections::HashMap;

use super::SessionKey;
use crate::Result;

/// Trait for session data sources
///
/// Sources abstract over where lap data comes from (a timing provider, a local
/// mirror, fixtures in tests). They only deliver the lap block; parsing and
/// caching happen in [`SessionCache`](super::SessionCache).
#[async_trait::async_trait]
pub trait SessionSource: Send + 'static {
    /// Get the YAML lap block for a session
    ///
    /// Returns:
    /// - `Ok(Some(yaml))` - Lap block in the column layout of [`SessionLaps`](super::SessionLaps)
    /// - `Ok(None)` - The source has no such session
    /// - `Err(e)` - The source failed; the caller may retry
    async fn session_yaml(&mut self, key: &SessionKey) -> Result<Option<String>>;
}

/// In-memory source holding prepared lap blocks.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sessions: HashMap<SessionKey, String>,
    requests: usize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the lap block for a session, replacing any previous one.
    pub fn insert(&mut self, key: SessionKey, yaml: impl Into<String>) {
        self.sessions.insert(key, yaml.into());
    }

    pub fn with_session(mut self, key: SessionKey, yaml: impl Into<String>) -> Self {
        self.insert(key, yaml);
        self
    }

    /// Number of lookups served so far.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

#[async_trait::async_trait]
impl SessionSource for MemorySource {
    async fn session_yaml(&mut self, key: &SessionKey) -> Result<Option<String>> {
        self.requests += 1;
        Ok(self.sessions.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_source_serves_registered_sessions() {
        let key = SessionKey::race(2021, "Hungary");
        let mut source = MemorySource::new().with_session(key.clone(), "Driver: []");

        assert_eq!(source.session_yaml(&key).await.unwrap().as_deref(), Some("Driver: []"));
        assert_eq!(source.session_yaml(&SessionKey::race(2021, "Spain")).await.unwrap(), None);
        assert_eq!(source.requests(), 2);
    }
}
