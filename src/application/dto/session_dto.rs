//! Session DTOs.

use crate::domain::entities::User;

/// Where the session cookie came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Cookie from the system keyring.
    Keyring,
    /// Cookie from `--session` or the environment.
    CommandLine,
    /// Cookie pasted on the login screen.
    UserInput,
}

impl SessionSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Keyring => "system keyring",
            Self::CommandLine => "command line / environment",
            Self::UserInput => "user input",
        }
    }
}

impl std::fmt::Display for SessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Sign-in request data.
#[derive(Debug, Clone)]
pub struct SignInRequest {
    /// Raw cookie value.
    pub cookie: String,
    /// Cookie source.
    pub source: SessionSource,
    /// Whether to persist the cookie.
    pub persist: bool,
}

impl SignInRequest {
    /// Creates new sign-in request.
    #[must_use]
    pub const fn new(cookie: String, source: SessionSource) -> Self {
        Self {
            cookie,
            source,
            persist: true,
        }
    }

    /// Disables cookie persistence.
    #[must_use]
    pub const fn without_persistence(mut self) -> Self {
        self.persist = false;
        self
    }
}

/// Sign-in response data.
#[derive(Debug, Clone)]
pub struct SignInResponse {
    /// Signed-in user.
    pub user: User,
    /// Cookie source used.
    pub source: SessionSource,
    /// Whether the cookie was persisted.
    pub persisted: bool,
}

impl SignInResponse {
    #[must_use]
    pub const fn new(user: User, source: SessionSource, persisted: bool) -> Self {
        Self {
            user,
            source,
            persisted,
        }
    }
}

/// Result of a logout attempt. The local session is cleared either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Whether the server acknowledged the logout.
    pub server_acknowledged: bool,
}
