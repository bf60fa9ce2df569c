//! Request and response payloads for the REST API.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Task, TaskId, TaskStatus, User};

#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<Task>,
}

#[derive(Debug, Deserialize)]
pub struct ItemResponse {
    pub item: Task,
}

#[derive(Debug, Deserialize)]
pub struct DeletedResponse {
    pub deleted_id: TaskId,
}

#[derive(Debug, Serialize)]
pub struct CreateTaskBody<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RenameTaskBody<'a> {
    pub id: TaskId,
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TaskStatusBody {
    pub id: TaskId,
    pub status: TaskStatus,
}

#[derive(Debug, Serialize)]
pub struct TaskIdBody {
    pub id: TaskId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_uses_wire_names() {
        let body = TaskStatusBody {
            id: TaskId(4),
            status: TaskStatus::Done,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"id":4,"status":"feita"}"#);
    }

    #[test]
    fn test_me_response_accepts_null_picture() {
        let response: MeResponse = serde_json::from_str(
            r#"{"ok":true,"user":{"id":1,"email":"ana@example.com","name":"Ana","picture":null}}"#,
        )
        .unwrap();
        assert_eq!(response.user.picture(), None);
    }
}
