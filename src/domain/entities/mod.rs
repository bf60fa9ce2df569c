//! Domain entity definitions.

mod session_cookie;
mod task;
mod user;

pub use session_cookie::SessionCookie;
pub use task::{Task, TaskId, TaskStatus, TaskTitle};
pub use user::{User, UserId};
