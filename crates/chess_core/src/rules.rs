//! Rules-engine capability set.
//!
//! Everything the engine knows about chess legality goes through these
//! functions. They are thin wrappers over `shakmaty`, so positions stay legal
//! by construction and are only ever changed by clone-then-play.

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};

use crate::error::PositionError;
use crate::types::Move;

/// Standard starting position.
pub fn startpos() -> Chess {
    Chess::default()
}

/// All legal moves for the side to move.
pub fn legal_moves(pos: &Chess) -> Vec<Move> {
    pos.legal_moves()
        .into_iter()
        .map(|raw| Move::from_legal(pos, raw))
        .collect()
}

/// Number of legal moves without building [`Move`] values.
pub fn legal_move_count(pos: &Chess) -> usize {
    pos.legal_moves().len()
}

/// Play `mv` on a copy of `pos`.
pub fn apply_move(pos: &Chess, mv: &Move) -> Result<Chess, PositionError> {
    pos.clone()
        .play(mv.as_raw().clone())
        .map_err(|_| PositionError::IllegalMove {
            mv: mv.to_uci(),
            ply: crate::types::ply_index(pos) as usize,
        })
}

pub fn is_check(pos: &Chess) -> bool {
    pos.is_check()
}

pub fn is_checkmate(pos: &Chess) -> bool {
    pos.is_checkmate()
}

pub fn is_stalemate(pos: &Chess) -> bool {
    pos.is_stalemate()
}

/// Stalemate, insufficient material or the fifty-move rule.
///
/// Repetition needs game history and is left to the caller.
pub fn is_draw(pos: &Chess) -> bool {
    pos.is_stalemate() || pos.is_insufficient_material() || pos.halfmoves() >= 100
}

pub fn is_game_over(pos: &Chess) -> bool {
    pos.is_checkmate() || is_draw(pos)
}

pub fn parse_fen(fen: &str) -> Result<Chess, PositionError> {
    let invalid = |reason: String| PositionError::InvalidFen {
        fen: fen.to_string(),
        reason,
    };
    let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| invalid(format!("{e}")))
}

/// FEN of `pos`; the en-passant square is only written when a capture is legal.
pub fn to_fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Standard algebraic notation for a legal move (without check suffix).
pub fn to_san(pos: &Chess, mv: &Move) -> String {
    San::from_move(pos, mv.as_raw().clone()).to_string()
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
