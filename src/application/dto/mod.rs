//! Data transfer objects for the application layer.

mod session_dto;

pub use session_dto::{LogoutOutcome, SessionSource, SignInRequest, SignInResponse};
