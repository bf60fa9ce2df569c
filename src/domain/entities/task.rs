//! Routine task entity.

use serde::{Deserialize, Serialize};

/// Server-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// An id of zero never comes from the server.
    #[must_use]
    pub const fn is_missing(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Completion status, serialized with the backend's wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "feita")]
    Done,
}

impl TaskStatus {
    /// Returns the opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Done,
            Self::Done => Self::Pending,
        }
    }

    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Done => "feita",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }

    #[must_use]
    pub const fn checkbox(self) -> &'static str {
        match self {
            Self::Pending => "[ ]",
            Self::Done => "[x]",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task title that is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Trims the input and rejects blank titles.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A routine task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    created_at: String,
    #[serde(default)]
    status: TaskStatus,
}

impl Task {
    #[must_use]
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        created_at: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            created_at: created_at.into(),
            status,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw creation timestamp as sent by the server.
    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle_is_involution() {
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Done);
        assert_eq!(TaskStatus::Done.toggled(), TaskStatus::Pending);
        assert_eq!(TaskStatus::Done.toggled().toggled(), TaskStatus::Done);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"pendente\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"feita\"").unwrap(),
            TaskStatus::Done
        );
    }

    #[test]
    fn test_title_rejects_blank() {
        assert!(TaskTitle::parse("").is_none());
        assert!(TaskTitle::parse("   \t\n").is_none());
        assert_eq!(TaskTitle::parse("  Treino ").unwrap().as_str(), "Treino");
    }

    #[test]
    fn test_task_without_status_defaults_to_pending() {
        let json = r#"{"id": 7, "title": "Ler", "created_at": "2024-06-05T10:00:00+00:00"}"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.id(), TaskId(7));
        assert_eq!(task.status(), TaskStatus::Pending);
    }

    #[test]
    fn test_missing_id() {
        assert!(TaskId(0).is_missing());
        assert!(!TaskId(1).is_missing());
    }
}
