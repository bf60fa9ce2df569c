//! Session storage port definition.

use async_trait::async_trait;

use crate::domain::entities::SessionCookie;
use crate::domain::errors::ApiError;

/// Port for session cookie persistence operations.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves stored session cookie.
    async fn get_session(&self) -> Result<Option<SessionCookie>, ApiError>;

    /// Stores session cookie securely.
    async fn store_session(&self, cookie: &SessionCookie) -> Result<(), ApiError>;

    /// Deletes stored session cookie.
    async fn delete_session(&self) -> Result<(), ApiError>;

    /// Checks if a session cookie exists.
    async fn has_session(&self) -> Result<bool, ApiError> {
        Ok(self.get_session().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock session storage for testing.
    pub struct MockSessionStorage {
        cookie: Arc<RwLock<Option<SessionCookie>>>,
    }

    impl MockSessionStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                cookie: Arc::new(RwLock::new(None)),
            }
        }

        /// Creates mock storage with a cookie.
        pub fn with_session(cookie: SessionCookie) -> Self {
            Self {
                cookie: Arc::new(RwLock::new(Some(cookie))),
            }
        }
    }

    impl Default for MockSessionStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionStoragePort for MockSessionStorage {
        async fn get_session(&self) -> Result<Option<SessionCookie>, ApiError> {
            Ok(self.cookie.read().await.clone())
        }

        async fn store_session(&self, cookie: &SessionCookie) -> Result<(), ApiError> {
            *self.cookie.write().await = Some(cookie.clone());
            Ok(())
        }

        async fn delete_session(&self) -> Result<(), ApiError> {
            *self.cookie.write().await = None;
            Ok(())
        }
    }
}
