//! Position reconstruction from protocol input.
//!
//! The engine sits behind an asynchronous protocol with nobody to hand a parse
//! error to, so [`reconstruct`] always produces a legal position: a bad FEN
//! falls back to the initial position and an illegal move truncates the
//! history at the last good ply.

use serde::{Deserialize, Serialize};
use shakmaty::Chess;
use tracing::warn;

use crate::error::PositionError;
use crate::rules;
use crate::uci::parse_move;

/// Where a position comes from: a base (startpos or FEN) plus moves on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSpec {
    StartPos { moves: Vec<String> },
    Fen { fen: String, moves: Vec<String> },
}

impl PositionSpec {
    pub fn startpos() -> Self {
        PositionSpec::StartPos { moves: Vec::new() }
    }

    pub fn fen(fen: impl Into<String>) -> Self {
        PositionSpec::Fen {
            fen: fen.into(),
            moves: Vec::new(),
        }
    }

    pub fn startpos_with_moves<I, S>(moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PositionSpec::StartPos {
            moves: moves.into_iter().map(Into::into).collect(),
        }
    }

    pub fn moves(&self) -> &[String] {
        match self {
            PositionSpec::StartPos { moves } | PositionSpec::Fen { moves, .. } => moves,
        }
    }
}

impl Default for PositionSpec {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Outcome of a lenient reconstruction.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub position: Chess,
    /// Number of moves from the spec that were applied.
    pub applied: usize,
    /// Every problem that was recovered from, in order.
    pub issues: Vec<PositionError>,
}

impl Reconstruction {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Rebuild the position described by `spec`, never failing.
pub fn reconstruct(spec: &PositionSpec) -> Chess {
    reconstruct_with_report(spec).position
}

/// Like [`reconstruct`], but also reports what had to be recovered.
pub fn reconstruct_with_report(spec: &PositionSpec) -> Reconstruction {
    let mut issues = Vec::new();

    let mut pos = match spec {
        PositionSpec::StartPos { .. } => rules::startpos(),
        PositionSpec::Fen { fen, .. } => match rules::parse_fen(fen) {
            Ok(pos) => pos,
            Err(err) => {
                warn!(%err, "falling back to the initial position");
                issues.push(err);
                rules::startpos()
            }
        },
    };

    let mut applied = 0;
    for (ply, txt) in spec.moves().iter().enumerate() {
        let next = parse_move(&pos, txt).and_then(|mv| rules::apply_move(&pos, &mv));
        match next {
            Ok(next) => {
                pos = next;
                applied += 1;
            }
            Err(err) => {
                let err = match err {
                    PositionError::IllegalMove { mv, .. } => PositionError::IllegalMove { mv, ply },
                    other => other,
                };
                warn!(%err, applied, "truncating move history");
                issues.push(err);
                break;
            }
        }
    }

    Reconstruction {
        position: pos,
        applied,
        issues,
    }
}

/// Strict reconstruction: the first problem is returned as an error.
pub fn try_reconstruct(spec: &PositionSpec) -> Result<Chess, PositionError> {
    let mut report = reconstruct_with_report(spec);
    if report.issues.is_empty() {
        Ok(report.position)
    } else {
        Err(report.issues.remove(0))
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
