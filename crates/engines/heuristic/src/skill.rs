//! Skill calibration: difficulty level -> error probabilities.

use serde::Serialize;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;
pub const DEFAULT_LEVEL: u8 = 5;

/// How a difficulty level plays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkillProfile {
    /// Difficulty level, 1..=10
    pub level: u8,
    /// Approximate playing strength this level aims for
    pub target_rating: u32,
    /// Chance of playing a uniformly random legal move
    pub blunder_probability: f64,
    /// Chance of playing from the lower half of the ranking (weak levels only)
    pub sub_optimal_probability: Option<f64>,
    /// Percentile cutoff for the top band, in [0, 1]
    pub top_fraction: f64,
}

// (rating, blunder, sub-optimal, top fraction), indexed by level - 1
const TABLE: [(u32, f64, Option<f64>, f64); MAX_LEVEL as usize] = [
    (800, 0.30, Some(0.40), 0.60),
    (1000, 0.20, Some(0.15), 0.60),
    (1200, 0.15, Some(0.15), 0.75),
    (1400, 0.08, Some(0.07), 0.80),
    (1600, 0.05, Some(0.05), 0.88),
    (1800, 0.03, None, 0.90),
    (2000, 0.03, None, 0.95),
    (2200, 0.015, None, 0.95),
    (2400, 0.012, None, 0.97),
    (2600, 0.01, None, 0.98),
];

/// UCI `Skill Level` (0..=20) announced for each level.
const UCI_SKILL_LEVELS: [u8; MAX_LEVEL as usize] = [0, 2, 4, 6, 8, 10, 13, 16, 18, 20];

/// Profile for `level`, clamped to 1..=10.
pub fn calibrate(level: u8) -> SkillProfile {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    let (target_rating, blunder_probability, sub_optimal_probability, top_fraction) =
        TABLE[(level - 1) as usize];
    SkillProfile {
        level,
        target_rating,
        blunder_probability,
        sub_optimal_probability,
        top_fraction,
    }
}

impl SkillProfile {
    pub fn strongest() -> Self {
        calibrate(MAX_LEVEL)
    }

    /// Highest level whose UCI skill value does not exceed `skill`.
    pub fn from_uci_skill_level(skill: u8) -> Self {
        let level = UCI_SKILL_LEVELS
            .iter()
            .rposition(|&v| v <= skill)
            .map_or(MIN_LEVEL, |idx| idx as u8 + 1);
        calibrate(level)
    }

    /// Highest level whose target rating does not exceed `elo`, at least level 1.
    pub fn from_elo(elo: u32) -> Self {
        let level = TABLE
            .iter()
            .rposition(|&(rating, ..)| rating <= elo)
            .map_or(MIN_LEVEL, |idx| idx as u8 + 1);
        calibrate(level)
    }

    pub fn uci_skill_level(&self) -> u8 {
        UCI_SKILL_LEVELS[(self.level - 1) as usize]
    }

    /// Size of the top band among `n` ranked moves.
    ///
    /// The band holds the moves above the `top_fraction` percentile, never
    /// fewer than one. The epsilon keeps e.g. 20 * (1 - 0.95) from rounding up
    /// to 2.
    pub fn top_band(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let band = (n as f64 * (1.0 - self.top_fraction) - 1e-9).ceil();
        (band.max(1.0) as usize).min(n)
    }
}

impl Default for SkillProfile {
    fn default() -> Self {
        calibrate(DEFAULT_LEVEL)
    }
}

#[cfg(test)]
#[path = "skill_tests.rs"]
mod skill_tests;
