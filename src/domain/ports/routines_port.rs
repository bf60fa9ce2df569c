//! Routines port for task CRUD.

use async_trait::async_trait;

use crate::domain::entities::{Task, TaskId, TaskStatus};
use crate::domain::errors::ApiError;

/// Port for the `/api/routines` resource.
///
/// Titles are passed untrimmed. The HTTP adapter rejects a blank title or a
/// zero id with [`ApiError::Validation`] before sending anything; pages also
/// refuse blank titles before a request is built.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutinesPort: Send + Sync {
    /// Lists every task of the signed-in user.
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;

    /// Creates a task.
    async fn add_task(&self, title: &str) -> Result<Task, ApiError>;

    /// Renames a task.
    async fn update_task(&self, id: TaskId, title: &str) -> Result<Task, ApiError>;

    /// Sets the completion status of a task.
    async fn update_task_status(&self, id: TaskId, status: TaskStatus)
    -> Result<Task, ApiError>;

    /// Deletes a task, returning the deleted id.
    async fn delete_task(&self, id: TaskId) -> Result<TaskId, ApiError>;
}
