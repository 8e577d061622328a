//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`tasks`] — Task submission, status polling, and file retrieval
//! - [`system`] — Health, events, OpenAPI

use serde::{Deserialize, Serialize};

mod system;
mod tasks;

// Re-export all handlers so `routes::function_name` continues to work
pub use system::*;
pub use tasks::*;

use crate::types::TaskId;

// ============================================================================
// Query/Request Types (shared across handlers)
// ============================================================================

/// Query parameters for POST /logs/tasks
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SubmitTaskQuery {
    /// Date to filter by, in yyyy-MM-dd form (only checked for non-emptiness;
    /// a malformed date matches no lines)
    pub date: Option<String>,
}

/// Response for POST /logs/tasks
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SubmitTaskResponse {
    /// Id of the newly created task
    #[serde(rename = "taskId")]
    pub task_id: TaskId,
}
