//! Core types for logslice

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;

/// Unique identifier for a log extraction task
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Create a new TaskId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<TaskId> for i64 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Task lifecycle status
///
/// A task starts in [`TaskStatus::InProgress`] and moves exactly once to one
/// of the two terminal states. Terminal states are never left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Extraction is running (or queued to run) in the background
    InProgress,
    /// Extraction finished and produced an output file
    Completed,
    /// Extraction failed with an error
    Failed,
}

impl TaskStatus {
    /// Whether this status is terminal (Completed or Failed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::InProgress => write!(f, "IN_PROGRESS"),
            TaskStatus::Completed => write!(f, "COMPLETED"),
            TaskStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Snapshot of a log extraction task
///
/// Returned by status queries. `file_path` is set only on completion,
/// `error_message` only on failure; the two are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogTask {
    /// Unique task identifier
    pub id: TaskId,

    /// The date string used to filter log lines (e.g. "2023-12-01")
    pub date: String,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// Absolute path of the produced file (set when status is COMPLETED)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// Failure description (set when status is FAILED)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LogTask {
    /// Create a fresh task in the IN_PROGRESS state
    pub fn new(id: TaskId, date: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
            status: TaskStatus::InProgress,
            file_path: None,
            error_message: None,
        }
    }
}

/// Events emitted by the task service
///
/// Consumers subscribe via [`crate::LogTaskService::subscribe`]; the API
/// server forwards these over the `/events` SSE stream. Events are
/// best-effort notifications; the registry remains the source of truth.
#[derive(Clone, Debug, Serialize)]
pub enum Event {
    /// A task was accepted and handed to a background worker
    TaskSubmitted {
        /// The newly allocated task id
        id: TaskId,
        /// The requested filter date
        date: String,
    },
    /// A task finished and its output file is available
    TaskCompleted {
        /// The completed task id
        id: TaskId,
        /// Path of the produced file
        file_path: PathBuf,
    },
    /// A task failed; the message is stored on the task record
    TaskFailed {
        /// The failed task id
        id: TaskId,
        /// Failure description
        message: String,
    },
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_display_and_parse() {
        let id = TaskId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<TaskId>().unwrap(), id);
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn test_status_terminality() {
        assert!(!TaskStatus::InProgress.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Failed).unwrap(),
            "\"FAILED\""
        );
    }

    #[test]
    fn test_task_serialization_skips_unset_fields() {
        let task = LogTask::new(TaskId::new(1), "2023-12-01");
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["date"], "2023-12-01");
        assert_eq!(json["status"], "IN_PROGRESS");
        assert!(json.get("filePath").is_none());
        assert!(json.get("errorMessage").is_none());
    }

    #[test]
    fn test_task_serialization_camel_case_terminal_fields() {
        let mut task = LogTask::new(TaskId::new(7), "2023-12-01");
        task.status = TaskStatus::Completed;
        task.file_path = Some(PathBuf::from("/logs/application.log.2023-12-01.log"));

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "COMPLETED");
        assert_eq!(json["filePath"], "/logs/application.log.2023-12-01.log");
        assert!(json.get("errorMessage").is_none());
    }
}
