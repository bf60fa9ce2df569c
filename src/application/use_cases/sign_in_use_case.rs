//! Sign-in use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{SignInRequest, SignInResponse};
use crate::domain::entities::SessionCookie;
use crate::domain::errors::ApiError;
use crate::domain::ports::{SessionPort, SessionStoragePort};

/// Activates a session cookie and verifies it against the backend.
#[derive(Clone)]
pub struct SignInUseCase {
    session_port: Arc<dyn SessionPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl SignInUseCase {
    /// Creates new sign-in use case.
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

    /// Executes sign-in with provided request.
    ///
    /// # Errors
    /// Returns error if the cookie is malformed or the backend rejects it.
    pub async fn execute(&self, request: SignInRequest) -> Result<SignInResponse, ApiError> {
        debug!(source = %request.source, "Attempting sign-in");

        let cookie = SessionCookie::from_pasted(&request.cookie, self.session_port.cookie_name())
            .ok_or_else(|| {
                warn!("Malformed session cookie provided");
                ApiError::validation("session cookie is empty or contains invalid characters")
            })?;

        self.session_port.use_session(Some(cookie.clone()));

        let user = match self.session_port.me().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Session cookie rejected");
                self.session_port.use_session(None);
                return Err(ApiError::rejected(e.to_string()));
            }
        };

        info!(user_id = %user.id(), "Signed in");

        let persisted = if request.persist {
            match self.storage_port.store_session(&cookie).await {
                Ok(()) => {
                    info!("Session persisted to secure storage");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to persist session to secure storage");
                    false
                }
            }
        } else {
            debug!("Session persistence disabled, skipping storage");
            false
        };

        Ok(SignInResponse::new(user, request.source, persisted))
    }

    /// Deletes the stored session cookie.
    ///
    /// # Errors
    /// Returns error if deletion fails.
    pub async fn forget_stored_session(&self) -> Result<(), ApiError> {
        debug!("Deleting session from secure storage");
        self.storage_port.delete_session().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to delete session from secure storage");
        })
    }
}
