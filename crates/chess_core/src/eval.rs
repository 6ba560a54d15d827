use shakmaty::{Chess, Color, Position};

use crate::types::piece_value;

/// Centipawns per attacked square not occupied by a friendly piece.
pub const MOBILITY_WEIGHT: i32 = 2;

/// Penalty for the side that is in check.
pub const CHECK_PENALTY: i32 = 50;

/// Score used for a checkmated side, from White's point of view.
pub const MATE_SCORE: i32 = 10_000;

/// Static evaluation from White's point of view: material, mobility and a
/// check penalty. Checkmate scores `±MATE_SCORE`, other dead ends score 0.
pub fn evaluate(pos: &Chess) -> i32 {
    if pos.is_checkmate() {
        return if pos.turn().is_white() {
            -MATE_SCORE
        } else {
            MATE_SCORE
        };
    }
    if pos.is_stalemate() || pos.is_insufficient_material() {
        return 0;
    }

    let board = pos.board();
    let mut score = 0i32;

    for sq in board.occupied() {
        if let Some(pc) = board.piece_at(sq) {
            let own = board.by_color(pc.color);
            let mobility = (board.attacks_from(sq) & !own).count() as i32;
            let v = piece_value(pc.role) + mobility * MOBILITY_WEIGHT;
            score += if pc.color == Color::White { v } else { -v };
        }
    }

    if pos.is_check() {
        score += if pos.turn().is_white() {
            -CHECK_PENALTY
        } else {
            CHECK_PENALTY
        };
    }

    score
}

/// Same evaluation from the side to move's point of view.
pub fn evaluate_for_side_to_move(pos: &Chess) -> i32 {
    let score = evaluate(pos);
    if pos.turn().is_white() { score } else { -score }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
