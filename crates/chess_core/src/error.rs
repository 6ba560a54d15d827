//! Errors raised while turning notation into positions and moves.
//!
//! These are the "malformed position" family. The reconstructor recovers from
//! every one of them locally; they only escape through the strict
//! `try_*` entry points.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// The FEN string could not be parsed or does not describe a legal position.
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// The move text is neither UCI nor SAN.
    #[error("unparsable move '{0}'")]
    UnparsableMove(String),

    /// The move parsed but is not legal in the current position.
    #[error("illegal move '{mv}' at ply {ply}")]
    IllegalMove { mv: String, ply: usize },
}
