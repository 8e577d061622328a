//! # logslice
//!
//! Backend library for asynchronous date-filtered log extraction.
//!
//! A client submits a date, the extraction of matching lines from the shared
//! `application.log` runs in the background, and the client polls the task's
//! status until it can download the produced per-date file.
//!
//! ## Design Philosophy
//!
//! logslice is designed to be:
//! - **Non-blocking** - Submission returns a task id immediately; the work
//!   runs on background workers
//! - **Observable** - Task state is queryable at any time and lifecycle
//!   events can be streamed, so no caller ever has to block on a result
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Sensible defaults** - Works out of the box with zero configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use logslice::{Config, LogTaskService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(Config::default());
//!     let service = Arc::new(LogTaskService::new(config.clone()));
//!
//!     let task_id = service.submit("2023-12-01").await?;
//!     println!("submitted task {task_id}");
//!
//!     // Serve the REST API (blocks until shutdown)
//!     logslice::api::start_api_server(service, config).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Date-filtered extraction from the source log
pub mod extractor;
/// Task storage and identifier issuance
pub mod registry;
/// Task scheduling and result retrieval
pub mod service;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, COMMON_LOG_NAME, Config};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use registry::TaskRegistry;
pub use service::LogTaskService;
pub use types::{Event, LogTask, TaskId, TaskStatus};

/// Wait for a termination signal.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal
///   registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
#[cfg(unix)]
pub(crate) async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

/// Wait for a termination signal (Ctrl+C on non-unix platforms).
#[cfg(not(unix))]
pub(crate) async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
