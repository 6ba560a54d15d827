//! Skill-dependent move selection.
//!
//! Moves are ranked by the evaluator, then one is sampled according to the
//! profile: occasionally a random move (blunder), sometimes one from the lower
//! half (weak levels), otherwise one from the top band with geometrically
//! decaying weights.

use chess_core::{Chess, Move};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::trace;

use crate::eval::{rank_moves, ScoredMove};
use crate::skill::SkillProfile;

/// Weight ratio between consecutive ranks in the top band.
pub const TOP_BAND_DECAY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorState {
    #[default]
    Idle,
    Evaluating,
    Sampling,
    Done,
}

/// Which branch produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTier {
    Blunder,
    SubOptimal,
    TopBand,
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub mv: Move,
    /// Index of `mv` in `ranked`
    pub rank: usize,
    pub tier: SelectionTier,
    /// Every legal move, best first
    pub ranked: Vec<ScoredMove>,
}

impl Selection {
    /// Number of moves scored to make this selection.
    pub fn nodes(&self) -> u64 {
        self.ranked.len() as u64
    }
}

#[derive(Debug, Default)]
pub struct MoveSelector {
    state: SelectorState,
}

impl MoveSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    fn transition(&mut self, next: SelectorState) {
        trace!(from = ?self.state, to = ?next, "selector");
        self.state = next;
    }

    /// Pick a move for the side to move, or `None` if there is none.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        pos: &Chess,
        profile: &SkillProfile,
        rng: &mut R,
    ) -> Option<Selection> {
        if self.state != SelectorState::Idle {
            self.transition(SelectorState::Idle);
        }

        self.transition(SelectorState::Evaluating);
        let ranked = rank_moves(pos, profile);
        if ranked.is_empty() {
            self.transition(SelectorState::Done);
            return None;
        }

        self.transition(SelectorState::Sampling);
        let (rank, tier) = sample_rank(ranked.len(), profile, rng);
        self.transition(SelectorState::Done);

        Some(Selection {
            mv: ranked[rank].mv.clone(),
            rank,
            tier,
            ranked,
        })
    }
}

/// Sample an index into a ranking of `n > 0` moves.
pub fn sample_rank<R: Rng + ?Sized>(
    n: usize,
    profile: &SkillProfile,
    rng: &mut R,
) -> (usize, SelectionTier) {
    if rng.gen_bool(profile.blunder_probability.clamp(0.0, 1.0)) {
        return (rng.gen_range(0..n), SelectionTier::Blunder);
    }

    if let Some(p) = profile.sub_optimal_probability {
        let lower = n / 2;
        if lower < n && rng.gen_bool(p.clamp(0.0, 1.0)) {
            return (rng.gen_range(lower..n), SelectionTier::SubOptimal);
        }
    }

    let band = profile.top_band(n);
    let rank = WeightedIndex::new((0..band).map(|i| TOP_BAND_DECAY.powi(i as i32)))
        .map(|dist| dist.sample(rng))
        .unwrap_or(0);
    (rank, SelectionTier::TopBand)
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod select_tests;
