//! Startup session check.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::User;
use crate::domain::ports::SessionPort;

/// Asks the backend who is signed in.
///
/// Every failure means "not signed in"; nothing is surfaced to the caller.
#[derive(Clone)]
pub struct CheckSessionUseCase {
    session_port: Arc<dyn SessionPort>,
}

impl CheckSessionUseCase {
    #[must_use]
    pub const fn new(session_port: Arc<dyn SessionPort>) -> Self {
        Self { session_port }
    }

    pub async fn execute(&self) -> Option<User> {
        match self.session_port.me().await {
            Ok(user) => {
                info!(user_id = %user.id(), "Session is active");
                Some(user)
            }
            Err(e) => {
                debug!(error = %e, "Session check failed, treating as signed out");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockSessionPort;

    #[tokio::test]
    async fn test_active_session_returns_user() {
        let use_case = CheckSessionUseCase::new(Arc::new(MockSessionPort::new(true)));

        let user = use_case.execute().await;

        assert_eq!(user.map(|u| u.display_name().to_string()), Some("Ana".to_string()));
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let use_case = CheckSessionUseCase::new(Arc::new(MockSessionPort::new(false)));

        assert!(use_case.execute().await.is_none());
    }
}
