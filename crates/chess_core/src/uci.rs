use std::fmt;

use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::Chess;

use crate::{Evaluation, error::PositionError, types::Move};

/// Printed as `bestmove 0000` when the side to move has no legal moves.
pub const NO_MOVE: &str = "0000";

pub fn move_to_uci(mv: &Move) -> String {
    mv.to_uci()
}

/// Best move in protocol form, with the null-move sentinel for `None`.
pub fn best_move_to_uci(mv: Option<&Move>) -> String {
    mv.map(Move::to_uci).unwrap_or_else(|| NO_MOVE.to_string())
}

/// Parse a move given in UCI (`e2e4`, `e7e8q`) or SAN (`Nf3`, `O-O`) and
/// resolve it against the legal moves of `pos`.
pub fn parse_move(pos: &Chess, txt: &str) -> Result<Move, PositionError> {
    let txt = txt.trim();

    if let Ok(uci) = txt.parse::<UciMove>() {
        return uci
            .to_move(pos)
            .map(|raw| Move::from_legal(pos, raw))
            .map_err(|_| PositionError::IllegalMove {
                mv: txt.to_string(),
                ply: crate::types::ply_index(pos) as usize,
            });
    }

    let san: San = txt
        .parse()
        .map_err(|_| PositionError::UnparsableMove(txt.to_string()))?;
    san.to_move(pos)
        .map(|raw| Move::from_legal(pos, raw))
        .map_err(|_| PositionError::IllegalMove {
            mv: txt.to_string(),
            ply: crate::types::ply_index(pos) as usize,
        })
}

/// Formats as a UCI `info` line. Scores are given from the side to move's
/// point of view, as the protocol requires.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "info depth {}", self.depth)?;
        match self.mate {
            Some(m) => {
                let m = if self.white_to_move { m } else { -m };
                write!(f, " score mate {m}")?;
            }
            None => write!(f, " score cp {}", self.side_to_move_cp())?,
        }
        write!(
            f,
            " nodes {} nps {} time {}",
            self.nodes, self.nps, self.elapsed_ms
        )?;
        if !self.pv.is_empty() {
            write!(f, " pv")?;
            for mv in &self.pv {
                write!(f, " {mv}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
