//! Application state shared across Axum route handlers.

use std::sync::Arc;
use tokio::sync::Semaphore;
use util::config;
use util::judge_settings::JudgeSettings;

/// Central application state shared across the server.
///
/// - The judge settings every submission is judged with.
/// - A semaphore bounding how many judgements run on blocking threads at once.
#[derive(Clone)]
pub struct AppState {
    judge_settings: JudgeSettings,
    judge_permits: Arc<Semaphore>,
}

impl AppState {
    /// `max_concurrent_judgements` is clamped to at least one.
    pub fn new(judge_settings: JudgeSettings, max_concurrent_judgements: usize) -> Self {
        Self {
            judge_settings,
            judge_permits: Arc::new(Semaphore::new(max_concurrent_judgements.max(1))),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::judge_settings(), config::max_concurrent_judgements())
    }

    pub fn judge_settings(&self) -> JudgeSettings {
        self.judge_settings
    }

    /// Returns a cloned handle to the judgement semaphore, for `acquire_owned`.
    pub fn judge_permits(&self) -> Arc<Semaphore> {
        self.judge_permits.clone()
    }
}
