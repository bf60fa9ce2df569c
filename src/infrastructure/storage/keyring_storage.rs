//! Keyring-based session storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::SessionCookie;
use crate::domain::errors::ApiError;
use crate::domain::ports::SessionStoragePort;

const KEYRING_SERVICE: &str = "rotina";
const KEYRING_USER: &str = "session";

/// System keyring session storage adapter.
pub struct KeyringSessionStorage {
    service: String,
    user: String,
}

impl KeyringSessionStorage {
    /// Creates new storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(KEYRING_SERVICE, KEYRING_USER)
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, ApiError> {
        Entry::new(&self.service, &self.user)
            .map_err(|e| ApiError::retrieval_failed(format!("failed to access keyring: {e}")))
    }
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn get_session(&self) -> Result<Option<SessionCookie>, ApiError> {
        debug!(service = %self.service, "Retrieving session from keyring");

        let entry = self.entry()?;

        match entry.get_password() {
            Ok(password) => {
                debug!("Session found in keyring");
                Ok(SessionCookie::new(&password))
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No session stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve session from keyring");
                Err(ApiError::retrieval_failed(e.to_string()))
            }
        }
    }

    async fn store_session(&self, cookie: &SessionCookie) -> Result<(), ApiError> {
        debug!(service = %self.service, "Storing session in keyring");

        self.entry()?.set_password(cookie.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to store session in keyring");
            ApiError::storage_failed(e.to_string())
        })
    }

    async fn delete_session(&self) -> Result<(), ApiError> {
        debug!(service = %self.service, "Deleting session from keyring");

        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to delete session from keyring");
                Err(ApiError::storage_failed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires system keyring"]
    async fn test_store_and_retrieve_session() {
        let storage = KeyringSessionStorage::with_names("rotina-test", "test-session");
        let cookie = SessionCookie::new_unchecked("eyJ1c2VyX2lkIjo0Mn0.ZmFrZS1zaWduYXR1cmU");

        storage.store_session(&cookie).await.unwrap();

        let retrieved = storage.get_session().await.unwrap();
        assert_eq!(retrieved.map(|c| c.as_str().to_string()), Some(cookie.as_str().to_string()));

        storage.delete_session().await.unwrap();
        assert!(!storage.has_session().await.unwrap());
    }
}
