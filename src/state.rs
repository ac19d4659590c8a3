// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::services::completion::Completer;
use crate::services::composer::{FoodComposer, TourComposer};
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub tour: TourComposer,
    pub food: FoodComposer,
}

impl AppState {
    pub fn new(session_ttl: Duration, completer: Arc<dyn Completer>) -> Self {
        Self {
            sessions: SessionManager::new(session_ttl),
            tour: TourComposer::new(completer),
            food: FoodComposer,
        }
    }
}
