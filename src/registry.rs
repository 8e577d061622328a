//! Concurrency-safe task storage and identifier issuance
//!
//! The registry is the single owner of the `TaskId -> LogTask` map and the
//! only state in the crate that requires synchronization. Ids come from an
//! atomic counter so concurrent submissions never observe the same value;
//! the map sits behind an async RwLock, which also gives readers
//! happens-before visibility of terminal transitions.

use crate::error::{Error, Result};
use crate::types::{LogTask, TaskId, TaskStatus};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// In-memory store of task records
///
/// Cloning is cheap (Arc clone) and every clone shares the same state, so
/// background workers can carry a handle into their spawned future. Records
/// are never evicted; the registry lives and dies with the process.
#[derive(Clone)]
pub struct TaskRegistry {
    tasks: Arc<RwLock<HashMap<TaskId, LogTask>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRegistry {
    /// Create an empty registry; the first issued id is 1
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Issue a fresh, strictly increasing task id
    ///
    /// Safe under concurrent calls: no two callers ever observe the same
    /// value, and ids are never reused.
    pub fn next_id(&self) -> TaskId {
        TaskId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Insert a new IN_PROGRESS record for `id`
    ///
    /// The record is visible to [`get`](Self::get) as soon as this returns.
    /// A duplicate id cannot happen through [`next_id`](Self::next_id); if it
    /// does, that is an internal invariant violation, not a caller error.
    pub async fn create(&self, id: TaskId, date: impl Into<String>) -> Result<LogTask> {
        let task = LogTask::new(id, date);

        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&id) {
            return Err(Error::Internal(format!("duplicate task id {id}")));
        }
        tasks.insert(id, task.clone());

        Ok(task)
    }

    /// Snapshot of the record for `id`, if any
    pub async fn get(&self, id: TaskId) -> Option<LogTask> {
        self.tasks.read().await.get(&id).cloned()
    }

    /// Number of records currently stored
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether the registry holds no records
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Transition `id` to COMPLETED with the produced file path
    pub async fn mark_completed(&self, id: TaskId, file_path: PathBuf) -> Result<()> {
        self.transition(id, TaskStatus::Completed, Some(file_path), None)
            .await
    }

    /// Transition `id` to FAILED with a failure message
    pub async fn mark_failed(&self, id: TaskId, message: impl Into<String>) -> Result<()> {
        self.transition(id, TaskStatus::Failed, None, Some(message.into()))
            .await
    }

    /// Single-shot terminal transition, checked under the write lock
    ///
    /// The status check and the mutation happen atomically, so a record can
    /// never leave a terminal state or end up with both terminal fields set.
    async fn transition(
        &self,
        id: TaskId,
        status: TaskStatus,
        file_path: Option<PathBuf>,
        error_message: Option<String>,
    ) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(&id)
            .ok_or(Error::TaskNotFound(id))?;

        if task.status.is_terminal() {
            // Workers transition their own task exactly once; hitting this
            // means a bug in the calling code, so refuse rather than clobber.
            tracing::warn!(
                task_id = %id,
                current = %task.status,
                attempted = %status,
                "Rejected transition on already-terminal task"
            );
            return Err(Error::Internal(format!(
                "task {id} is already {} and cannot become {status}",
                task.status
            )));
        }

        task.status = status;
        task.file_path = file_path;
        task.error_message = error_message;

        Ok(())
    }
}
