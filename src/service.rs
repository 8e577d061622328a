//! Task scheduling and result retrieval
//!
//! [`LogTaskService`] is the core of the crate. It accepts submissions,
//! allocates a record in the [`TaskRegistry`], runs the extraction on a
//! blocking worker without blocking the caller, and gates file retrieval on
//! the task's terminal state. Worker failures are recorded on the task
//! record, never raised to the submitting caller.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extractor;
use crate::registry::TaskRegistry;
use crate::types::{Event, LogTask, TaskId, TaskStatus};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Asynchronous log extraction service
///
/// One instance owns the task registry and the event channel for the whole
/// process. The API server shares it behind an `Arc`.
pub struct LogTaskService {
    /// Service configuration (log directory, worker startup delay)
    pub config: Arc<Config>,

    registry: TaskRegistry,
    event_tx: broadcast::Sender<Event>,
}

impl LogTaskService {
    /// Create a new service from the given configuration
    pub fn new(config: Arc<Config>) -> Self {
        // Buffer sized generously; lagging subscribers drop events rather
        // than block workers.
        let (event_tx, _rx) = broadcast::channel(1000);

        Self {
            config,
            registry: TaskRegistry::new(),
            event_tx,
        }
    }

    /// Subscribe to task lifecycle events
    ///
    /// Events are best-effort notifications. The registry, queried through
    /// [`status`](Self::status), remains the source of truth.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Submit a new extraction task and return its id immediately
    ///
    /// Allocates a fresh id, inserts an IN_PROGRESS record, and hands the
    /// extraction to a background worker. The caller never waits on the
    /// extraction itself; it observes completion by polling
    /// [`status`](Self::status) or via [`subscribe`](Self::subscribe).
    ///
    /// The date is only required to be non-empty at this layer. A date that
    /// matches no log lines completes successfully with an empty file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty date.
    pub async fn submit(&self, date: &str) -> Result<TaskId> {
        if date.trim().is_empty() {
            return Err(Error::Validation("date must not be empty".into()));
        }

        let id = self.registry.next_id();
        self.registry.create(id, date).await?;

        tracing::info!(task_id = %id, date = %date, "Task submitted");
        self.emit_event(Event::TaskSubmitted {
            id,
            date: date.to_string(),
        });

        self.spawn_worker(id, date.to_string());

        Ok(id)
    }

    /// Current snapshot of a task
    ///
    /// Succeeds for every known id regardless of outcome: a failed task is
    /// reported as status FAILED with its message, not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] for an unknown id.
    pub async fn status(&self, id: TaskId) -> Result<LogTask> {
        self.registry.get(id).await.ok_or(Error::TaskNotFound(id))
    }

    /// Path of the produced file for a completed task
    ///
    /// The file is re-derived from the task's stored date on every fetch, so
    /// the returned content reflects the source log as it is now, not as it
    /// was when the task completed. If the source log changed in between,
    /// the fetched file silently differs from what the worker wrote.
    ///
    /// # Errors
    ///
    /// - [`Error::TaskNotFound`] for an unknown id
    /// - [`Error::TaskNotReady`] while the task is IN_PROGRESS
    /// - [`Error::TaskFailed`] if the task ran and failed, carrying the
    ///   stored message so callers can tell "still running" from "failed"
    /// - extraction errors if the re-derivation itself fails
    pub async fn fetch(&self, id: TaskId) -> Result<PathBuf> {
        let task = self.status(id).await?;

        match task.status {
            TaskStatus::InProgress => Err(Error::TaskNotReady(id)),
            TaskStatus::Failed => Err(Error::TaskFailed {
                id,
                message: task
                    .error_message
                    .unwrap_or_else(|| "unknown failure".into()),
            }),
            TaskStatus::Completed => {
                let log_dir = self.config.log_dir.clone();
                let date = task.date.clone();

                tokio::task::spawn_blocking(move || extractor::extract(&log_dir, &date))
                    .await
                    .map_err(|e| Error::Internal(format!("fetch worker panicked: {e}")))?
            }
        }
    }

    /// Hand the extraction for `id` to a background worker
    ///
    /// The worker owns the task's single terminal transition. Whatever
    /// happens inside it ends up on the record; nothing escapes as an error
    /// to any request path.
    fn spawn_worker(&self, id: TaskId, date: String) {
        let registry = self.registry.clone();
        let config = self.config.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            if !config.startup_delay.is_zero() {
                tokio::time::sleep(config.startup_delay).await;
            }

            let log_dir = config.log_dir.clone();
            let worker_date = date.clone();
            let outcome =
                tokio::task::spawn_blocking(move || extractor::extract(&log_dir, &worker_date))
                    .await;

            let result = match outcome {
                Ok(result) => result,
                // The blocking task was cancelled or panicked; record it as
                // a failure like any other.
                Err(e) => Err(Error::Internal(format!("extraction interrupted: {e}"))),
            };

            match result {
                Ok(file_path) => {
                    tracing::info!(
                        task_id = %id,
                        date = %date,
                        file = %file_path.display(),
                        "Task completed"
                    );
                    if let Err(e) = registry.mark_completed(id, file_path.clone()).await {
                        tracing::error!(task_id = %id, error = %e, "Failed to record completion");
                        return;
                    }
                    event_tx.send(Event::TaskCompleted { id, file_path }).ok();
                }
                Err(e) => {
                    let message = format!("failed to create log file: {e}");
                    tracing::warn!(task_id = %id, date = %date, error = %e, "Task failed");
                    if let Err(e) = registry.mark_failed(id, message.clone()).await {
                        tracing::error!(task_id = %id, error = %e, "Failed to record failure");
                        return;
                    }
                    event_tx.send(Event::TaskFailed { id, message }).ok();
                }
            }
        });
    }

    fn emit_event(&self, event: Event) {
        // send() returns Err if there are no receivers, which is fine
        self.event_tx.send(event).ok();
    }
}
