pub mod error;
pub mod eval;
pub mod position;
pub mod rules;
pub mod time_control;
pub mod types;
pub mod uci;

// Re-export core game logic (not engine-specific)
pub use error::PositionError;
pub use eval::{MATE_SCORE, evaluate, evaluate_for_side_to_move};
pub use position::{
    PositionSpec, Reconstruction, reconstruct, reconstruct_with_report, try_reconstruct,
};
pub use rules::*;
pub use time_control::*;
pub use types::*;
pub use uci::*;

/// The rules engine itself, for callers that need more than the capability set.
pub use shakmaty;
pub use shakmaty::{Chess, Color, Role, Square};

use serde::Serialize;

// =============================================================================
// Engine trait, implemented by every move-producing engine
// =============================================================================

/// One evaluation snapshot, as reported by an `info` line.
///
/// `score_cp` and `mate` are from White's point of view; `white_to_move`
/// records the side to move of the evaluated position so protocol output can
/// flip the sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Reported depth in plies
    pub depth: u8,
    /// Score in centipawns, positive = good for White
    pub score_cp: i32,
    /// Moves to mate, positive when White mates; `Some(0)` for a mated position
    pub mate: Option<i32>,
    /// Best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Principal variation starting with `best_move`
    pub pv: Vec<Move>,
    /// Number of moves scored to produce this snapshot
    pub nodes: u64,
    pub nps: u64,
    pub elapsed_ms: u64,
    pub white_to_move: bool,
}

impl Evaluation {
    /// Score in pawns from White's point of view.
    pub fn score_pawns(&self) -> f64 {
        self.score_cp as f64 / 100.0
    }

    /// Score in pawns from `color`'s point of view.
    pub fn score_pawns_for(&self, color: Color) -> f64 {
        match color {
            Color::White => self.score_pawns(),
            Color::Black => -self.score_pawns(),
        }
    }

    /// Centipawns from the side to move's point of view, as UCI expects.
    pub fn side_to_move_cp(&self) -> i32 {
        if self.white_to_move {
            self.score_cp
        } else {
            -self.score_cp
        }
    }

    /// Stamp the simulated elapsed time and derive nodes per second.
    pub fn with_timing(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self.nps = self.nodes * 1000 / elapsed_ms.max(1);
        self
    }
}

/// Result of one `go`.
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    /// The chosen move (None if no legal moves)
    pub best_move: Option<Move>,
    /// Progressive evaluations for analysis requests, last one is final.
    /// Empty for best-move requests.
    pub evaluations: Vec<Evaluation>,
}

impl SearchReport {
    pub fn final_evaluation(&self) -> Option<&Evaluation> {
        self.evaluations.last()
    }
}

/// A typed `setoption`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOption {
    /// UCI `Skill Level`, 0..=20
    SkillLevel(u8),
    /// Difficulty on the 1..=10 scale used by the UI
    Skill(u8),
    /// UCI `UCI_Elo` target rating
    UciElo(u32),
    /// Anything else (Hash, Threads, ...), accepted and ignored
    Other { name: String, value: String },
}

/// A spin option announced in reply to `uci`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDecl {
    pub name: &'static str,
    pub default: i64,
    pub min: i64,
    pub max: i64,
}

/// Trait that all chess engines must implement.
///
/// The protocol channel only talks to engines through this trait, so a
/// different move source can be plugged in without touching the protocol.
pub trait Engine: Send {
    /// Handle one `go` for `pos`.
    ///
    /// Best-move requests return just `best_move`; analysis requests
    /// (`limits.depth` set) also return the per-round evaluations.
    fn search(&mut self, pos: &Chess, limits: &SearchLimits) -> SearchReport;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "ChessLab"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Apply a `setoption`. Returns true if the option was recognized.
    fn set_option(&mut self, _option: &EngineOption) -> bool {
        false
    }

    /// Options announced in reply to `uci`.
    fn options(&self) -> Vec<OptionDecl> {
        Vec::new()
    }
}
