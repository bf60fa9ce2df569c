//! HTTP client for the routine tracker backend.

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::envelope::decode_envelope;
use crate::domain::entities::SessionCookie;
use crate::domain::errors::ApiError;

/// Origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Cookie name the backend issues by default.
pub const DEFAULT_COOKIE_NAME: &str = "session";

const USER_AGENT: &str = concat!("rotina/", env!("CARGO_PKG_VERSION"));

/// Cookie-authenticated JSON client.
///
/// One request per call, no retries and no timeout.
pub struct ApiClient {
    client: Client,
    base_url: String,
    cookie_name: String,
    session: RwLock<Option<SessionCookie>>,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: &str, cookie_name: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let cookie_name = cookie_name.into();
        let cookie_name = if cookie_name.trim().is_empty() {
            DEFAULT_COOKIE_NAME.to_string()
        } else {
            cookie_name.trim().to_string()
        };

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            cookie_name,
            session: RwLock::new(None),
        })
    }

    pub(super) fn session_cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(super) fn set_session(&self, cookie: Option<SessionCookie>) {
        *self.session.write() = cookie;
    }

    fn cookie_header(&self) -> Option<String> {
        self.session
            .read()
            .as_ref()
            .map(|cookie| format!("{}={}", self.cookie_name, cookie.as_str()))
    }

    /// Starts a request with the JSON content type and session cookie attached.
    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        match self.cookie_header() {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    /// Sends the request and decodes the response envelope.
    pub(super) async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            if e.is_connect() {
                ApiError::network(format!("failed to connect to {}", self.base_url))
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Response received");

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(format!("failed to read response: {e}")))?;

        decode_envelope(status.as_u16(), &body).inspect_err(|e| {
            debug!(status = status.as_u16(), error = %e, "Request rejected");
        })
    }
}

/// Trims whitespace and trailing slashes; blank means the local dev origin.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", "http://localhost:3000" ; "empty")]
    #[test_case("   ", "http://localhost:3000" ; "blank")]
    #[test_case("https://rotina.example.com/", "https://rotina.example.com" ; "trailing slash")]
    #[test_case("http://10.0.0.2:8080", "http://10.0.0.2:8080" ; "untouched")]
    fn test_normalize_base_url(raw: &str, expected: &str) {
        assert_eq!(normalize_base_url(raw), expected);
    }

    #[test]
    fn test_cookie_header_follows_session() {
        let client = ApiClient::new("", "").unwrap();
        assert_eq!(client.cookie_header(), None);

        client.set_session(Some(SessionCookie::new_unchecked("abc123")));
        assert_eq!(client.cookie_header().as_deref(), Some("session=abc123"));

        client.set_session(None);
        assert_eq!(client.cookie_header(), None);
    }

    #[test]
    fn test_request_targets_base_url() {
        let client = ApiClient::new("http://api.test/", "sid").unwrap();
        client.set_session(Some(SessionCookie::new_unchecked("xyz")));

        let request = client.request(Method::GET, "/api/me").build().unwrap();

        assert_eq!(request.url().as_str(), "http://api.test/api/me");
        assert_eq!(
            request.headers().get(header::COOKIE).unwrap(),
            "sid=xyz"
        );
        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
