//! Session port definition.

use async_trait::async_trait;

use crate::domain::entities::{SessionCookie, User};
use crate::domain::errors::ApiError;

/// Port for the backend's cookie-based session endpoints.
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Returns the user bound to the current session.
    async fn me(&self) -> Result<User, ApiError>;

    /// Ends the current session on the server.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Sets the cookie sent with every subsequent request.
    fn use_session(&self, cookie: Option<SessionCookie>);

    /// URL that starts the browser OAuth flow.
    fn login_url(&self) -> String;

    /// Name of the session cookie the backend issues.
    fn cookie_name(&self) -> &str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Mock session port for testing.
    pub struct MockSessionPort {
        me_succeeds: Arc<AtomicBool>,
        logout_succeeds: Arc<AtomicBool>,
        logout_calls: Arc<AtomicUsize>,
        session: Arc<Mutex<Option<SessionCookie>>>,
        user: User,
    }

    impl MockSessionPort {
        /// Creates new mock.
        pub fn new(me_succeeds: bool) -> Self {
            Self {
                me_succeeds: Arc::new(AtomicBool::new(me_succeeds)),
                logout_succeeds: Arc::new(AtomicBool::new(true)),
                logout_calls: Arc::new(AtomicUsize::new(0)),
                session: Arc::new(Mutex::new(None)),
                user: User::new(42, "ana@example.com", Some("Ana".to_string()), None),
            }
        }

        /// Makes logout requests fail.
        pub fn failing_logout(self) -> Self {
            self.logout_succeeds.store(false, Ordering::SeqCst);
            self
        }

        /// Sets whether the session check succeeds.
        pub fn set_me_succeeds(&self, value: bool) {
            self.me_succeeds.store(value, Ordering::SeqCst);
        }

        pub fn logout_calls(&self) -> usize {
            self.logout_calls.load(Ordering::SeqCst)
        }

        pub fn current_session(&self) -> Option<SessionCookie> {
            self.session.lock().clone()
        }
    }

    #[async_trait]
    impl SessionPort for MockSessionPort {
        async fn me(&self) -> Result<User, ApiError> {
            if self.me_succeeds.load(Ordering::SeqCst) {
                Ok(self.user.clone())
            } else {
                Err(ApiError::Http { status: 401 })
            }
        }

        async fn logout(&self) -> Result<(), ApiError> {
            self.logout_calls.fetch_add(1, Ordering::SeqCst);
            if self.logout_succeeds.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(ApiError::network("connection refused"))
            }
        }

        fn use_session(&self, cookie: Option<SessionCookie>) {
            *self.session.lock() = cookie;
        }

        fn login_url(&self) -> String {
            "http://localhost:3000/api/auth/google/start".to_string()
        }

        fn cookie_name(&self) -> &str {
            "session"
        }
    }
}
