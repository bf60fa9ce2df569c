//! Logout use case implementation.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::dto::LogoutOutcome;
use crate::domain::ports::{SessionPort, SessionStoragePort};

/// Ends the session on the server and forgets it locally.
#[derive(Clone)]
pub struct LogoutUseCase {
    session_port: Arc<dyn SessionPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl LogoutUseCase {
    #[must_use]
    pub const fn new(
        session_port: Arc<dyn SessionPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            session_port,
            storage_port,
        }
    }

    /// Logs out. The local session is cleared even when the request fails.
    pub async fn execute(&self) -> LogoutOutcome {
        let server_acknowledged = match self.session_port.logout().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Logout request failed, clearing local session anyway");
                false
            }
        };

        self.session_port.use_session(None);

        if let Err(e) = self.storage_port.delete_session().await {
            warn!(error = %e, "Failed to delete stored session");
        }

        info!(server_acknowledged, "Logged out");
        LogoutOutcome {
            server_acknowledged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SessionCookie;
    use crate::domain::ports::mocks::{MockSessionPort, MockSessionStorage};

    #[tokio::test]
    async fn test_logout_clears_session() {
        let session = Arc::new(MockSessionPort::new(true));
        session.use_session(Some(SessionCookie::new_unchecked("abc")));
        let storage = Arc::new(MockSessionStorage::with_session(
            SessionCookie::new_unchecked("abc"),
        ));

        let outcome = LogoutUseCase::new(session.clone(), storage.clone())
            .execute()
            .await;

        assert!(outcome.server_acknowledged);
        assert!(session.current_session().is_none());
        assert!(!storage.has_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_request_still_clears_session() {
        let session = Arc::new(MockSessionPort::new(true).failing_logout());
        session.use_session(Some(SessionCookie::new_unchecked("abc")));
        let storage = Arc::new(MockSessionStorage::with_session(
            SessionCookie::new_unchecked("abc"),
        ));

        let outcome = LogoutUseCase::new(session.clone(), storage.clone())
            .execute()
            .await;

        assert!(!outcome.server_acknowledged);
        assert_eq!(session.logout_calls(), 1);
        assert!(session.current_session().is_none());
        assert!(!storage.has_session().await.unwrap());
    }
}
