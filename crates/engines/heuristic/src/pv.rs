use chess_core::{apply_move, Chess, Move};
use rand::Rng;

use crate::select::MoveSelector;
use crate::skill::SkillProfile;

/// Plies added after the chosen move, at most.
pub const MAX_PV_EXTENSION: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrincipalVariation {
    pub moves: Vec<Move>,
    /// Moves scored while extending the line
    pub nodes: u64,
}

/// Extend `first` (legal in `pos`) by up to `extra_plies` replies, each chosen
/// by the selector at full strength. Stops early when the side to move has no
/// legal moves.
pub fn principal_variation<R: Rng + ?Sized>(
    pos: &Chess,
    first: &Move,
    extra_plies: usize,
    rng: &mut R,
) -> PrincipalVariation {
    let mut pv = PrincipalVariation {
        moves: vec![first.clone()],
        nodes: 0,
    };
    let Ok(mut current) = apply_move(pos, first) else {
        return pv;
    };

    let profile = SkillProfile::strongest();
    let mut selector = MoveSelector::new();

    for _ in 0..extra_plies.min(MAX_PV_EXTENSION) {
        let Some(selection) = selector.select(&current, &profile, rng) else {
            break;
        };
        pv.nodes += selection.nodes();
        match apply_move(&current, &selection.mv) {
            Ok(next) => current = next,
            Err(_) => break,
        }
        pv.moves.push(selection.mv);
    }

    pv
}

#[cfg(test)]
#[path = "pv_tests.rs"]
mod pv_tests;
