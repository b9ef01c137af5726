// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    stats::StatsEngine,
    store::StatsStore,
    utils::revocation::RevocationList,
};

#[derive(Clone)]
pub struct AppState {
    pub engine: StatsEngine,
    pub config: Config,
    pub revoked: RevocationList,
}

impl AppState {
    /// Builds the state around `store`, using the configured success threshold.
    pub fn new(store: Arc<dyn StatsStore>, config: Config) -> Self {
        let engine = StatsEngine::new(store).with_success_threshold(config.success_threshold);
        Self {
            engine,
            config,
            revoked: RevocationList::new(),
        }
    }
}

impl FromRef<AppState> for StatsEngine {
    fn from_ref(state: &AppState) -> Self {
        state.engine.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for RevocationList {
    fn from_ref(state: &AppState) -> Self {
        state.revoked.clone()
    }
}
