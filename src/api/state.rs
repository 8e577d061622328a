//! Application state for the API server

use crate::{Config, LogTaskService};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clone) and provides
/// access to the task service and configuration.
#[derive(Clone)]
pub struct AppState {
    /// The log extraction task service
    pub service: Arc<LogTaskService>,

    /// Configuration (read access for handlers)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service: Arc<LogTaskService>, config: Arc<Config>) -> Self {
        Self { service, config }
    }
}
