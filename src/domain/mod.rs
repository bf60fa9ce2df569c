//! Domain layer with core entities, calendar aggregation and port definitions.

/// Month calendar aggregation.
pub mod calendar;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Shell pages.
pub mod navigation;
/// Port definitions.
pub mod ports;

pub use entities::{SessionCookie, Task, TaskId, TaskStatus, User};
pub use errors::ApiError;
pub use navigation::Page;
pub use ports::{RoutinesPort, SessionPort, SessionStoragePort};
