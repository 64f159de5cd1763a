//! Shared application state for all routes.

use crate::service::ScheduleStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScheduleStore>,
}

impl AppState {
    pub fn new<S: ScheduleStore + 'static>(store: S) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
