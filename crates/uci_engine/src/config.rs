//! Engine configuration, loaded from TOML.

use std::path::Path;
use std::time::Duration;

use chess_core::LatencyModel;
use heuristic_engine::HeuristicEngine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Difficulty level 1..=10
    pub skill_level: u8,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    /// Move time for `go` without `movetime` (bare, infinite or clock-based)
    pub default_move_time_ms: u64,
    pub max_move_time_ms: u64,
    /// Share of the move time spent before `bestmove`
    pub move_latency_ratio: f64,
    pub max_move_latency_ms: u64,
    pub analysis_round_interval_ms: u64,
    /// `go depth` requests are capped at this depth
    pub max_depth: u8,
    /// Depth used per ply by game analysis
    pub game_analysis_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skill_level: heuristic_engine::skill::DEFAULT_LEVEL,
            seed: None,
            default_move_time_ms: 1000,
            max_move_time_ms: 2000,
            move_latency_ratio: 0.05,
            max_move_latency_ms: 100,
            analysis_round_interval_ms: 10,
            max_depth: 20,
            game_analysis_depth: 12,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn latency_model(&self) -> LatencyModel {
        LatencyModel {
            move_time_ratio: self.move_latency_ratio,
            max_move_latency: Duration::from_millis(self.max_move_latency_ms),
            max_move_time: Duration::from_millis(self.max_move_time_ms),
            round_interval: Duration::from_millis(self.analysis_round_interval_ms),
        }
    }

    /// A heuristic engine at the configured level and seed.
    pub fn build_engine(&self) -> HeuristicEngine {
        let engine = match self.seed {
            Some(seed) => HeuristicEngine::with_seed(seed),
            None => HeuristicEngine::new(),
        };
        engine.with_skill_level(self.skill_level)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
