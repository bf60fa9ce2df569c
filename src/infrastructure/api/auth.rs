//! Session endpoints: `/api/me`, `/api/logout` and the OAuth start URL.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::IgnoredAny;
use tracing::debug;

use super::client::ApiClient;
use super::dto::MeResponse;
use crate::domain::entities::{SessionCookie, User};
use crate::domain::errors::ApiError;
use crate::domain::ports::SessionPort;

const ME_PATH: &str = "/api/me";
const LOGOUT_PATH: &str = "/api/logout";
const GOOGLE_START_PATH: &str = "/api/auth/google/start";

#[async_trait]
impl SessionPort for ApiClient {
    async fn me(&self) -> Result<User, ApiError> {
        debug!("Fetching session user");
        let response: MeResponse = self.execute(self.request(Method::GET, ME_PATH)).await?;
        Ok(response.user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        debug!("Ending session");
        let _: IgnoredAny = self
            .execute(self.request(Method::POST, LOGOUT_PATH))
            .await?;
        Ok(())
    }

    fn use_session(&self, cookie: Option<SessionCookie>) {
        self.set_session(cookie);
    }

    fn login_url(&self) -> String {
        self.url(GOOGLE_START_PATH)
    }

    fn cookie_name(&self) -> &str {
        self.session_cookie_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url() {
        let client = ApiClient::new("https://rotina.example.com/", "session").unwrap();
        assert_eq!(
            client.login_url(),
            "https://rotina.example.com/api/auth/google/start"
        );
    }

    #[test]
    fn test_login_url_defaults_to_local_origin() {
        let client = ApiClient::new("", "session").unwrap();
        assert_eq!(
            client.login_url(),
            "http://localhost:3000/api/auth/google/start"
        );
    }
}
