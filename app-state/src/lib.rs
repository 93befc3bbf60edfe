//! # App State
//!
//! Application-wide state handed to every feature screen.
//!
//! The feature crates never talk to storage directly: they receive an
//! `AppState` (or just its `GoalService`) from the host and call through the
//! trait. The host decides which implementation backs it; the desktop app and
//! the tests use `InMemoryGoalStore`.

mod goal_service;
mod memory_store;

use std::sync::Arc;

pub use goal_service::GoalService;
pub use memory_store::InMemoryGoalStore;

/// Services shared by all screens
#[derive(Clone)]
pub struct AppState {
    pub goal_service: Arc<dyn GoalService>,
}

impl AppState {
    pub fn new(goal_service: Arc<dyn GoalService>) -> Self {
        Self { goal_service }
    }

    /// App state backed by an empty in-memory goal store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryGoalStore::new()))
    }
}
