//! Post-game analysis: move classification and per-game reports.

use std::fmt;

use chess_core::Evaluation;
use serde::Serialize;

/// Quality label for a played move, from the mover's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveClassification {
    Excellent,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl fmt::Display for MoveClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MoveClassification::Excellent => "excellent",
            MoveClassification::Good => "good",
            MoveClassification::Inaccuracy => "inaccuracy",
            MoveClassification::Mistake => "mistake",
            MoveClassification::Blunder => "blunder",
        };
        f.write_str(label)
    }
}

/// Classify a move by how much it lost.
///
/// Both scores are in pawns from the mover's point of view: `previous` before
/// the move, `current` after it. Gains count as excellent.
pub fn classify_move(current: f64, previous: f64) -> MoveClassification {
    let loss = previous - current;
    if loss <= 0.1 {
        MoveClassification::Excellent
    } else if loss <= 0.25 {
        MoveClassification::Good
    } else if loss <= 0.5 {
        MoveClassification::Inaccuracy
    } else if loss <= 1.0 {
        MoveClassification::Mistake
    } else {
        MoveClassification::Blunder
    }
}

/// 100 for a move that loses nothing, 10 points less per pawn lost.
pub fn move_accuracy(current: f64, previous: f64) -> f64 {
    let loss = (previous - current).max(0.0);
    (100.0 - 10.0 * loss).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    fn of_ply(ply: usize) -> Self {
        if ply % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }

    fn sign(self) -> f64 {
        match self {
            Side::White => 1.0,
            Side::Black => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveReport {
    pub ply: usize,
    pub move_number: usize,
    pub side: Side,
    pub played: String,
    /// Pawns, White's point of view, after the move
    pub evaluation: f64,
    /// Engine's choice in the position the move was played from
    pub best_move: Option<String>,
    pub accuracy: f64,
    pub classification: MoveClassification,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideSummary {
    pub moves: usize,
    pub accuracy: f64,
    pub inaccuracies: usize,
    pub mistakes: usize,
    pub blunders: usize,
}

impl SideSummary {
    fn add(&mut self, report: &MoveReport) {
        // Running mean
        self.moves += 1;
        self.accuracy += (report.accuracy - self.accuracy) / self.moves as f64;
        match report.classification {
            MoveClassification::Inaccuracy => self.inaccuracies += 1,
            MoveClassification::Mistake => self.mistakes += 1,
            MoveClassification::Blunder => self.blunders += 1,
            MoveClassification::Excellent | MoveClassification::Good => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameReport {
    pub moves: Vec<MoveReport>,
    pub white: SideSummary,
    pub black: SideSummary,
}

impl GameReport {
    /// Pair each played move with the evaluation of the position after it.
    ///
    /// Moves are assumed to start from the initial position, so even plies
    /// are White's. Extra moves or evaluations on either side are ignored.
    pub fn build<S: AsRef<str>>(moves: &[S], evaluations: &[Evaluation]) -> Self {
        let mut report = GameReport::default();
        let mut previous: Option<&Evaluation> = None;

        for (ply, (played, eval)) in moves.iter().zip(evaluations).enumerate() {
            let side = Side::of_ply(ply);
            let before = previous.map_or(0.0, |e| e.score_pawns()) * side.sign();
            let after = eval.score_pawns() * side.sign();

            let entry = MoveReport {
                ply,
                move_number: ply / 2 + 1,
                side,
                played: played.as_ref().to_string(),
                evaluation: eval.score_pawns(),
                best_move: previous.and_then(|e| e.best_move.as_ref()).map(|m| m.to_uci()),
                accuracy: move_accuracy(after, before),
                classification: classify_move(after, before),
            };

            match side {
                Side::White => report.white.add(&entry),
                Side::Black => report.black.add(&entry),
            }
            report.moves.push(entry);
            previous = Some(eval);
        }

        report
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod analysis_tests;
