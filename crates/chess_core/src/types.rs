use std::fmt;

use serde::{Serialize, Serializer};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Position, Role, Square};

/// Material values in centipawns, indexed by `role_idx`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

pub fn role_idx(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

pub fn piece_value(role: Role) -> i32 {
    PIECE_VALUES[role_idx(role)]
}

/// A legal move together with the facts the evaluator needs about it.
///
/// Produced only by the rules engine (see [`crate::rules::legal_moves`]), so a
/// `Move` is always legal in the position it was generated from. For castling,
/// `to` is the king's destination square, matching standard UCI notation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
    pub piece: Role,
    pub captured: Option<Role>,
    pub is_check: bool,
    pub is_castle: bool,
    raw: shakmaty::Move,
}

impl Move {
    /// Wrap a rules-engine move generated in `pos`.
    pub fn from_legal(pos: &Chess, raw: shakmaty::Move) -> Self {
        let (from, to) = match raw.to_uci(CastlingMode::Standard) {
            UciMove::Normal { from, to, .. } => (from, to),
            _ => (raw.from().unwrap_or(raw.to()), raw.to()),
        };
        let is_check = pos
            .clone()
            .play(raw.clone())
            .map(|after| after.is_check())
            .unwrap_or(false);

        Self {
            from,
            to,
            promotion: raw.promotion(),
            piece: raw.role(),
            captured: raw.capture(),
            is_check,
            is_castle: raw.is_castle(),
            raw,
        }
    }

    /// The underlying rules-engine move.
    pub fn as_raw(&self) -> &shakmaty::Move {
        &self.raw
    }

    pub fn to_uci(&self) -> String {
        self.raw.to_uci(CastlingMode::Standard).to_string()
    }

    /// Role of the piece standing on `to` once the move is played.
    pub fn landing_piece(&self) -> Role {
        self.promotion.unwrap_or(self.piece)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw.to_uci(CastlingMode::Standard))
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Number of plies played since the start of the game, derived from the
/// fullmove counter and the side to move. Saturates on the huge counters
/// FEN allows.
pub fn ply_index(pos: &Chess) -> u32 {
    let base = (pos.fullmoves().get() - 1).saturating_mul(2);
    if pos.turn().is_white() { base } else { base.saturating_add(1) }
}
