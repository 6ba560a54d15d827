//! Heuristic Chess Engine
//!
//! Scores every legal move one ply deep and picks among them according to a
//! skill profile, so weaker levels make believable mistakes instead of
//! playing perfectly and then randomly.
//!
//! All randomness comes from one RNG owned by the engine; construct it with
//! [`HeuristicEngine::with_seed`] for reproducible games.

pub mod eval;
pub mod pv;
pub mod search;
pub mod select;
pub mod skill;

use chess_core::{Chess, Engine, EngineOption, Move, OptionDecl, SearchLimits, SearchReport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

pub use eval::{evaluate_move, rank_moves, score, MoveScore, ScoredMove};
pub use pv::{principal_variation, PrincipalVariation};
pub use select::{MoveSelector, Selection, SelectionTier, SelectorState};
pub use skill::{calibrate, SkillProfile};

pub const ENGINE_NAME: &str = "Heuristic Engine 1.0";
pub const ENGINE_AUTHOR: &str = "ChessLab";

/// Strength-calibrated single-ply engine.
#[derive(Debug)]
pub struct HeuristicEngine {
    profile: SkillProfile,
    selector: MoveSelector,
    rng: StdRng,
}

impl HeuristicEngine {
    /// Engine at the default level, seeded from the OS.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Engine whose choices are fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            profile: SkillProfile::default(),
            selector: MoveSelector::new(),
            rng,
        }
    }

    pub fn with_skill_level(mut self, level: u8) -> Self {
        self.set_skill_level(level);
        self
    }

    /// Recalibrate to `level` (clamped to 1..=10).
    pub fn set_skill_level(&mut self, level: u8) {
        self.set_profile(calibrate(level));
    }

    pub fn set_profile(&mut self, profile: SkillProfile) {
        debug!(level = profile.level, rating = profile.target_rating, "skill calibrated");
        self.profile = profile;
    }

    pub fn profile(&self) -> &SkillProfile {
        &self.profile
    }

    pub fn selector_state(&self) -> SelectorState {
        self.selector.state()
    }

    /// Full selection details for the side to move.
    pub fn select(&mut self, pos: &Chess) -> Option<Selection> {
        self.selector.select(pos, &self.profile, &mut self.rng)
    }

    /// Move for the side to move at the current skill, `None` if there is none.
    pub fn best_move(&mut self, pos: &Chess) -> Option<Move> {
        self.select(pos).map(|selection| {
            debug!(
                mv = %selection.mv,
                rank = selection.rank,
                tier = ?selection.tier,
                "move selected"
            );
            selection.mv
        })
    }

    /// Progressive analysis to `depth` plies.
    pub fn analyze(&mut self, pos: &Chess, depth: u8) -> SearchReport {
        search::analyze(pos, depth, &mut self.rng)
    }
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for HeuristicEngine {
    fn search(&mut self, pos: &Chess, limits: &SearchLimits) -> SearchReport {
        match limits.depth {
            Some(depth) => self.analyze(pos, depth),
            None => SearchReport {
                best_move: self.best_move(pos),
                evaluations: Vec::new(),
            },
        }
    }

    fn name(&self) -> &str {
        ENGINE_NAME
    }

    fn author(&self) -> &str {
        ENGINE_AUTHOR
    }

    fn new_game(&mut self) {
        self.selector = MoveSelector::new();
    }

    fn set_option(&mut self, option: &EngineOption) -> bool {
        let profile = match option {
            EngineOption::SkillLevel(skill) => SkillProfile::from_uci_skill_level(*skill),
            EngineOption::Skill(level) => calibrate(*level),
            EngineOption::UciElo(elo) => SkillProfile::from_elo(*elo),
            EngineOption::Other { .. } => return false,
        };
        self.set_profile(profile);
        true
    }

    fn options(&self) -> Vec<OptionDecl> {
        let weakest = calibrate(skill::MIN_LEVEL);
        let strongest = SkillProfile::strongest();
        vec![
            OptionDecl {
                name: "Skill Level",
                default: i64::from(self.profile.uci_skill_level()),
                min: i64::from(weakest.uci_skill_level()),
                max: i64::from(strongest.uci_skill_level()),
            },
            OptionDecl {
                name: "UCI_Elo",
                default: i64::from(self.profile.target_rating),
                min: i64::from(weakest.target_rating),
                max: i64::from(strongest.target_rating),
            },
            OptionDecl {
                name: "Skill",
                default: i64::from(self.profile.level),
                min: i64::from(skill::MIN_LEVEL),
                max: i64::from(skill::MAX_LEVEL),
            },
        ]
    }
}
