//! Single-ply move scoring.
//!
//! Every legal move is scored on its own: play it once, look at the
//! resulting position, add up a handful of heuristic terms. No search, no
//! state, so the same position and profile always produce the same ranking.

use chess_core::shakmaty::{Color, File, Move as RawMove, Position, Rank, Role, Square};
use chess_core::{apply_move, legal_moves, piece_value, ply_index, Chess, Move, MATE_SCORE};
use serde::Serialize;

use crate::skill::SkillProfile;

const CHECK_BONUS: f64 = 50.0;
const STALEMATE_PENALTY: f64 = -100.0;
const EXPOSED_KING_PENALTY: f64 = -40.0;
const CASTLE_BONUS: f64 = 80.0;
const CENTER_BONUS: f64 = 30.0;
const RING_BONUS: f64 = 15.0;
const DEVELOPMENT_BONUS: f64 = 40.0;
const REPEAT_MOVE_PENALTY: f64 = -20.0;
const POSITIONAL_WEIGHT: f64 = 0.5;
const FORK_BONUS: f64 = 80.0;
const DEFENDER_BONUS: f64 = 5.0;
const MAX_DEFENDERS: u32 = 2;
const HANGING_WEIGHT: f64 = 0.3;

/// Tactical terms only kick in for profiles at least this strong.
pub const TACTICS_MIN_RATING: u32 = 1400;
/// King walks before this fullmove count are penalized.
const KING_SAFETY_FULLMOVES: u32 = 15;
/// Development bonuses apply during the first plies only.
const DEVELOPMENT_PLIES: u32 = 20;

const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];
const RING: [Square; 12] = [
    Square::C3,
    Square::D3,
    Square::E3,
    Square::F3,
    Square::C6,
    Square::D6,
    Square::E6,
    Square::F6,
    Square::C4,
    Square::C5,
    Square::F4,
    Square::F5,
];

// Piece-square tables from White's point of view, rank 8 first.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
   -50,-40,-30,-30,-30,-30,-40,-50,
   -40,-20,  0,  0,  0,  0,-20,-40,
   -30,  0, 10, 15, 15, 10,  0,-30,
   -30,  5, 15, 20, 20, 15,  5,-30,
   -30,  0, 15, 20, 20, 15,  0,-30,
   -30,  5, 10, 15, 15, 10,  5,-30,
   -40,-20,  0,  5,  5,  0,-20,-40,
   -50,-40,-30,-30,-30,-30,-40,-50,
];

/// Per-term breakdown of a move's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MoveScore {
    pub material: f64,
    pub check: f64,
    pub king_safety: f64,
    pub center: f64,
    pub development: f64,
    pub positional: f64,
    pub tactics: f64,
    pub safety: f64,
}

impl MoveScore {
    pub fn total(&self) -> f64 {
        self.material
            + self.check
            + self.king_safety
            + self.center
            + self.development
            + self.positional
            + self.tactics
            + self.safety
    }
}

/// A legal move with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
}

/// Score `mv` (legal in `pos`) for the side to move.
pub fn score(pos: &Chess, mv: &Move, profile: &SkillProfile) -> f64 {
    evaluate_move(pos, mv, profile).total()
}

/// Score every term of `mv` separately.
pub fn evaluate_move(pos: &Chess, mv: &Move, profile: &SkillProfile) -> MoveScore {
    let Ok(after) = apply_move(pos, mv) else {
        return MoveScore::default();
    };
    let mover = pos.turn();

    MoveScore {
        material: material(mv),
        check: check(&after, mv),
        king_safety: king_safety(pos, mv),
        center: center(mv),
        development: development(pos, mv),
        positional: positional(mover, mv),
        tactics: if profile.target_rating >= TACTICS_MIN_RATING {
            tactics(&after, mover, mv)
        } else {
            0.0
        },
        safety: safety(&after, mv),
    }
}

/// All legal moves, best first. Ties keep generation order.
pub fn rank_moves(pos: &Chess, profile: &SkillProfile) -> Vec<ScoredMove> {
    let mut ranked: Vec<ScoredMove> = legal_moves(pos)
        .into_iter()
        .map(|mv| {
            let score = score(pos, &mv, profile);
            ScoredMove { mv, score }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

fn material(mv: &Move) -> f64 {
    let captured = mv.captured.map_or(0, piece_value);
    let promotion = mv
        .promotion
        .map_or(0, |role| piece_value(role) - piece_value(Role::Pawn));
    f64::from(captured + promotion)
}

fn check(after: &Chess, mv: &Move) -> f64 {
    if after.is_checkmate() {
        f64::from(MATE_SCORE)
    } else if mv.is_check {
        CHECK_BONUS
    } else if after.is_stalemate() {
        STALEMATE_PENALTY
    } else {
        0.0
    }
}

fn king_safety(pos: &Chess, mv: &Move) -> f64 {
    if mv.is_castle {
        return CASTLE_BONUS;
    }
    if mv.piece != Role::King || pos.fullmoves().get() >= KING_SAFETY_FULLMOVES {
        return 0.0;
    }
    let file = mv.to.file();
    let rank = mv.to.rank();
    if (File::C..=File::F).contains(&file) && (Rank::Third..=Rank::Sixth).contains(&rank) {
        EXPOSED_KING_PENALTY
    } else {
        0.0
    }
}

fn center(mv: &Move) -> f64 {
    if CENTER.contains(&mv.to) {
        CENTER_BONUS
    } else if RING.contains(&mv.to) {
        RING_BONUS
    } else {
        0.0
    }
}

fn is_home_square(color: Color, role: Role, sq: Square) -> bool {
    let homes: [Square; 2] = match (color, role) {
        (Color::White, Role::Knight) => [Square::B1, Square::G1],
        (Color::White, Role::Bishop) => [Square::C1, Square::F1],
        (Color::Black, Role::Knight) => [Square::B8, Square::G8],
        (Color::Black, Role::Bishop) => [Square::C8, Square::F8],
        _ => return false,
    };
    homes.contains(&sq)
}

fn development(pos: &Chess, mv: &Move) -> f64 {
    if !matches!(mv.piece, Role::Knight | Role::Bishop) || ply_index(pos) >= DEVELOPMENT_PLIES {
        return 0.0;
    }
    if is_home_square(pos.turn(), mv.piece, mv.from) {
        DEVELOPMENT_BONUS
    } else {
        REPEAT_MOVE_PENALTY
    }
}

fn table_index(color: Color, sq: Square) -> usize {
    let file = sq.file() as usize;
    let rank = sq.rank() as usize;
    match color {
        Color::White => (7 - rank) * 8 + file,
        Color::Black => rank * 8 + file,
    }
}

fn positional(mover: Color, mv: &Move) -> f64 {
    let table = match mv.landing_piece() {
        Role::Pawn => &PAWN_TABLE,
        Role::Knight => &KNIGHT_TABLE,
        _ => return 0.0,
    };
    POSITIONAL_WEIGHT * f64::from(table[table_index(mover, mv.to)])
}

fn tactics(after: &Chess, mover: Color, mv: &Move) -> f64 {
    let board = after.board();

    let big_pieces = board.by_color(!mover) & (board.rooks() | board.queens() | board.kings());
    let forked = (board.attacks_from(mv.to) & big_pieces).count();
    let fork = if forked >= 2 { FORK_BONUS } else { 0.0 };

    let defenders = board
        .attacks_to(mv.to, mover, board.occupied())
        .count()
        .min(MAX_DEFENDERS as usize);

    fork + DEFENDER_BONUS * defenders as f64
}

fn safety(after: &Chess, mv: &Move) -> f64 {
    let attacked = after.legal_moves().iter().any(|reply| captures_on(reply, mv.to));
    if attacked {
        -HANGING_WEIGHT * f64::from(piece_value(mv.landing_piece()))
    } else {
        0.0
    }
}

/// Whether `reply` takes whatever stands on `square`. An en-passant capture
/// lands behind the pawn it removes.
fn captures_on(reply: &RawMove, square: Square) -> bool {
    match *reply {
        RawMove::EnPassant { from, to } => Square::from_coords(to.file(), from.rank()) == square,
        _ => reply.to() == square,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
