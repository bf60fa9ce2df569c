//! Use case implementations.

mod check_session_use_case;
mod logout_use_case;
mod resolve_session_use_case;
mod sign_in_use_case;

pub use check_session_use_case::CheckSessionUseCase;
pub use logout_use_case::LogoutUseCase;
pub use resolve_session_use_case::{ResolveSessionUseCase, ResolvedSession};
pub use sign_in_use_case::SignInUseCase;
