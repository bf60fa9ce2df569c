//! Task CRUD on `/api/routines`.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use super::client::ApiClient;
use super::dto::{
    CreateTaskBody, DeletedResponse, ItemResponse, ItemsResponse, RenameTaskBody, TaskIdBody,
    TaskStatusBody,
};
use crate::domain::entities::{Task, TaskId, TaskStatus, TaskTitle};
use crate::domain::errors::ApiError;
use crate::domain::ports::RoutinesPort;

const ROUTINES_PATH: &str = "/api/routines";

fn require_title(raw: &str) -> Result<TaskTitle, ApiError> {
    TaskTitle::parse(raw).ok_or_else(|| ApiError::validation("Title is required"))
}

fn require_id(id: TaskId) -> Result<TaskId, ApiError> {
    if id.is_missing() {
        Err(ApiError::validation("Id is required"))
    } else {
        Ok(id)
    }
}

#[async_trait]
impl RoutinesPort for ApiClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response: ItemsResponse = self
            .execute(self.request(Method::GET, ROUTINES_PATH))
            .await?;
        debug!(count = response.items.len(), "Tasks fetched");
        Ok(response.items)
    }

    async fn add_task(&self, title: &str) -> Result<Task, ApiError> {
        let title = require_title(title)?;
        let body = CreateTaskBody {
            title: title.as_str(),
        };

        let response: ItemResponse = self
            .execute(self.request(Method::POST, ROUTINES_PATH).json(&body))
            .await?;
        debug!(task_id = %response.item.id(), "Task created");
        Ok(response.item)
    }

    async fn update_task(&self, id: TaskId, title: &str) -> Result<Task, ApiError> {
        let title = match (id.is_missing(), TaskTitle::parse(title)) {
            (false, Some(title)) => title,
            _ => return Err(ApiError::validation("Id and title are required")),
        };
        let body = RenameTaskBody {
            id,
            title: title.as_str(),
        };

        let response: ItemResponse = self
            .execute(self.request(Method::PUT, ROUTINES_PATH).json(&body))
            .await?;
        debug!(task_id = %id, "Task renamed");
        Ok(response.item)
    }

    async fn update_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<Task, ApiError> {
        let id = require_id(id)?;
        let body = TaskStatusBody { id, status };

        let response: ItemResponse = self
            .execute(self.request(Method::PUT, ROUTINES_PATH).json(&body))
            .await?;
        debug!(task_id = %id, status = %status, "Task status updated");
        Ok(response.item)
    }

    async fn delete_task(&self, id: TaskId) -> Result<TaskId, ApiError> {
        let id = require_id(id)?;

        let response: DeletedResponse = self
            .execute(
                self.request(Method::DELETE, ROUTINES_PATH)
                    .json(&TaskIdBody { id }),
            )
            .await?;
        debug!(task_id = %response.deleted_id, "Task deleted");
        Ok(response.deleted_id)
    }
}
