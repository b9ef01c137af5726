// src/handlers/mod.rs

pub mod auth;
pub mod platform;
pub mod quiz;
pub mod student;
pub mod user;

use crate::stats::StatsEngine;

/// Applies a per-request success threshold override, if any.
fn with_threshold(engine: StatsEngine, threshold: Option<f64>) -> StatsEngine {
    match threshold {
        Some(threshold) => engine.with_success_threshold(threshold),
        None => engine,
    }
}
