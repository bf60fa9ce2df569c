//! Session cookie resolution use case.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::SessionSource;
use crate::domain::entities::SessionCookie;
use crate::domain::ports::SessionStoragePort;

/// Resolved cookie with its source.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub cookie: SessionCookie,
    pub source: SessionSource,
}

impl ResolvedSession {
    #[must_use]
    pub const fn new(cookie: SessionCookie, source: SessionSource) -> Self {
        Self { cookie, source }
    }
}

/// Finds a session cookie from the available sources.
pub struct ResolveSessionUseCase {
    storage_port: Arc<dyn SessionStoragePort>,
}

impl ResolveSessionUseCase {
    #[must_use]
    pub const fn new(storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self { storage_port }
    }

    /// Resolves a cookie from the keyring, then the CLI/env value.
    ///
    /// Keyring failures are logged and skipped.
    pub async fn execute(&self, cli_session: Option<String>) -> Option<ResolvedSession> {
        debug!("Checking keyring for stored session");
        match self.storage_port.get_session().await {
            Ok(Some(cookie)) => {
                info!("Using session from system keyring");
                return Some(ResolvedSession::new(cookie, SessionSource::Keyring));
            }
            Ok(None) => {
                debug!("No session found in keyring");
            }
            Err(e) => {
                debug!(error = %e, "Failed to check keyring");
            }
        }

        if let Some(raw) = cli_session.filter(|s| !s.trim().is_empty()) {
            if let Some(cookie) = SessionCookie::new(&raw) {
                info!("Using session from command line / environment");
                return Some(ResolvedSession::new(cookie, SessionSource::CommandLine));
            }
            debug!("Command-line session has invalid format");
        }

        debug!("No session found in any source");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockSessionStorage;

    #[tokio::test]
    async fn test_keyring_priority() {
        let storage = Arc::new(MockSessionStorage::with_session(
            SessionCookie::new_unchecked("from-keyring"),
        ));
        let use_case = ResolveSessionUseCase::new(storage);

        let resolved = use_case.execute(Some("from-cli".to_string())).await.unwrap();

        assert_eq!(resolved.source, SessionSource::Keyring);
        assert_eq!(resolved.cookie.as_str(), "from-keyring");
    }

    #[tokio::test]
    async fn test_cli_fallback() {
        let use_case = ResolveSessionUseCase::new(Arc::new(MockSessionStorage::new()));

        let resolved = use_case.execute(Some("from-cli".to_string())).await.unwrap();

        assert_eq!(resolved.source, SessionSource::CommandLine);
    }

    #[tokio::test]
    async fn test_invalid_cli_value_ignored() {
        let use_case = ResolveSessionUseCase::new(Arc::new(MockSessionStorage::new()));

        assert!(use_case.execute(Some("a;b".to_string())).await.is_none());
        assert!(use_case.execute(None).await.is_none());
    }
}
