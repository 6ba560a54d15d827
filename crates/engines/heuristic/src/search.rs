//! Progressive analysis of a single position.
//!
//! The best move is the top of the full-strength ranking. Its principal
//! variation is then revealed one ply per round, each round reporting the
//! static evaluation at the end of the line so far.

use chess_core::shakmaty::Position;
use chess_core::{apply_move, evaluate, Chess, Evaluation, Move, SearchReport, MATE_SCORE};
use rand::Rng;
use tracing::debug;

use crate::eval::rank_moves;
use crate::pv::principal_variation;
use crate::skill::SkillProfile;

/// An analysis reports at most this many `info` rounds.
pub const MAX_ROUNDS: u8 = 4;

/// Analyse `pos` to `depth` plies. Always returns at least one evaluation.
pub fn analyze<R: Rng + ?Sized>(pos: &Chess, depth: u8, rng: &mut R) -> SearchReport {
    let depth = depth.max(1);
    let white_to_move = pos.turn().is_white();

    let ranked = rank_moves(pos, &SkillProfile::strongest());
    let Some(best) = ranked.first().map(|s| s.mv.clone()) else {
        let (score_cp, mate) = score_line(pos, &[]);
        debug!(score_cp, ?mate, "no legal moves to analyse");
        return SearchReport {
            best_move: None,
            evaluations: vec![Evaluation {
                depth,
                score_cp,
                mate,
                best_move: None,
                pv: Vec::new(),
                nodes: 0,
                nps: 0,
                elapsed_ms: 0,
                white_to_move,
            }],
        };
    };

    let root_nodes = ranked.len() as u64;
    let pv = principal_variation(pos, &best, usize::from(depth - 1), rng);
    let rounds = depth.min(MAX_ROUNDS);

    let evaluations = (1..=rounds)
        .map(|round| {
            let reported = (u32::from(depth) * u32::from(round)).div_ceil(u32::from(rounds));
            let line = &pv.moves[..usize::from(round).min(pv.moves.len())];
            let (score_cp, mate) = score_line(pos, line);
            Evaluation {
                depth: reported as u8,
                score_cp,
                mate,
                best_move: Some(best.clone()),
                pv: line.to_vec(),
                nodes: root_nodes + pv.nodes * u64::from(round) / u64::from(rounds),
                nps: 0,
                elapsed_ms: 0,
                white_to_move,
            }
        })
        .collect();

    SearchReport {
        best_move: Some(best),
        evaluations,
    }
}

/// White-relative score at the end of `line`, with mate distance in moves
/// when the line ends in checkmate.
fn score_line(pos: &Chess, line: &[Move]) -> (i32, Option<i32>) {
    let mut current = pos.clone();
    let mut played = 0i32;
    for mv in line {
        match apply_move(&current, mv) {
            Ok(next) => current = next,
            Err(_) => break,
        }
        played += 1;
    }

    if current.is_checkmate() {
        let moves = (played + 1) / 2;
        return if current.turn().is_white() {
            (-MATE_SCORE, Some(-moves))
        } else {
            (MATE_SCORE, Some(moves))
        };
    }
    (evaluate(&current), None)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
