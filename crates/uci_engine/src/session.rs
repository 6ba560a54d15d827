//! Callback-style facade over a [`Channel`].
//!
//! The session speaks the protocol on the caller's behalf and turns event
//! streams into single callbacks. Every forwarding task re-checks the request
//! token right before invoking its callback, so after [`EngineSession::stop`]
//! or [`EngineSession::terminate`] nothing is delivered.
//!
//! Like the channel, requests spawn onto the current tokio runtime.

use chess_core::{Engine, Evaluation, Move, PositionSpec, RequestToken};
use tracing::{debug, info, warn};

use crate::analysis::GameReport;
use crate::channel::{Channel, Reply, SearchHandle};
use crate::config::EngineConfig;
use crate::error::ChannelError;
use crate::protocol::{Command, GoParams};

/// Deepest analysis [`EngineSession::analyze_position`] will request.
pub const MAX_POSITION_DEPTH: u8 = 10;

/// Depth used by [`EngineSession::quick_analyze`].
pub const QUICK_ANALYSIS_DEPTH: u8 = 5;

pub struct EngineSession {
    channel: Channel,
}

impl EngineSession {
    /// Session around a heuristic engine built from `config`.
    pub fn new(config: EngineConfig) -> Self {
        let engine = config.build_engine();
        Self::with_engine(Box::new(engine), config)
    }

    pub fn with_engine(engine: Box<dyn Engine>, config: EngineConfig) -> Self {
        Self {
            channel: Channel::new(engine, config),
        }
    }

    pub fn initialize(&mut self) -> Result<(), ChannelError> {
        self.channel.initialize()
    }

    pub fn is_ready(&self) -> bool {
        self.channel.is_ready()
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut Channel {
        &mut self.channel
    }

    /// Recalibrate to difficulty `level` (1..=10).
    pub fn set_skill_level(&mut self, level: u8) -> Result<(), ChannelError> {
        self.execute(Command::SetOption(chess_core::EngineOption::Skill(level)))
            .map(drop)
    }

    /// Ask for a move in `fen` with a thinking budget of `time_budget_ms`.
    ///
    /// `callback` receives the move (`None` when there are no legal moves)
    /// unless the request is stopped or superseded first.
    pub fn get_best_move<F>(
        &mut self,
        fen: &str,
        time_budget_ms: u64,
        callback: F,
    ) -> Result<RequestToken, ChannelError>
    where
        F: FnOnce(Option<Move>) + Send + 'static,
    {
        let handle = self.start(PositionSpec::fen(fen), GoParams::movetime(time_budget_ms))?;
        let token = handle.token().clone();
        let guard = token.clone();
        tokio::spawn(async move {
            if let Some(mv) = handle.best_move().await {
                if !guard.is_cancelled() {
                    callback(mv);
                }
            }
        });
        Ok(token)
    }

    /// Analyse `fen` to `depth` (at most [`MAX_POSITION_DEPTH`]); `callback`
    /// receives the final evaluation.
    pub fn analyze_position<F>(
        &mut self,
        fen: &str,
        depth: u8,
        callback: F,
    ) -> Result<RequestToken, ChannelError>
    where
        F: FnOnce(Evaluation) + Send + 'static,
    {
        let depth = depth.min(MAX_POSITION_DEPTH);
        let handle = self.start(PositionSpec::fen(fen), GoParams::depth(depth))?;
        let token = handle.token().clone();
        let guard = token.clone();
        tokio::spawn(async move {
            if let Some(eval) = handle.final_evaluation().await {
                if !guard.is_cancelled() {
                    callback(eval);
                }
            }
        });
        Ok(token)
    }

    /// Shallow analysis for immediate feedback.
    pub fn quick_analyze<F>(&mut self, fen: &str, callback: F) -> Result<RequestToken, ChannelError>
    where
        F: FnOnce(Evaluation) + Send + 'static,
    {
        self.analyze_position(fen, QUICK_ANALYSIS_DEPTH, callback)
    }

    /// Cancel the pending request, if any.
    pub fn stop(&mut self) {
        if let Err(err) = self.execute(Command::Stop) {
            debug!(%err, "stop ignored");
        }
    }

    /// Cancel everything and shut the session down. Idempotent.
    pub fn terminate(&mut self) {
        self.channel.terminate();
    }

    /// Evaluate the position after every ply of a game played from the
    /// initial position. Returns exactly one evaluation per move;
    /// `on_progress` gets the completed fraction after each one.
    pub async fn analyze_game<S, P>(
        &mut self,
        moves: &[S],
        mut on_progress: P,
    ) -> Result<Vec<Evaluation>, ChannelError>
    where
        S: AsRef<str>,
        P: FnMut(f64),
    {
        let depth = self.channel.config().game_analysis_depth;
        let total = moves.len();
        let mut evaluations = Vec::with_capacity(total);

        for ply in 0..total {
            let spec =
                PositionSpec::startpos_with_moves(moves[..=ply].iter().map(|m| m.as_ref()));
            let handle = self.start(spec, GoParams::depth(depth))?;
            let id = handle.token().id();
            let eval = handle
                .final_evaluation()
                .await
                .ok_or(ChannelError::Cancelled(id))?;
            evaluations.push(eval);
            on_progress((ply + 1) as f64 / total as f64);
        }

        info!(plies = total, "game analysed");
        Ok(evaluations)
    }

    /// [`EngineSession::analyze_game`] followed by [`GameReport::build`].
    pub async fn game_report<S, P>(
        &mut self,
        moves: &[S],
        on_progress: P,
    ) -> Result<GameReport, ChannelError>
    where
        S: AsRef<str>,
        P: FnMut(f64),
    {
        let evaluations = self.analyze_game(moves, on_progress).await?;
        Ok(GameReport::build(moves, &evaluations))
    }

    fn start(&mut self, spec: PositionSpec, params: GoParams) -> Result<SearchHandle, ChannelError> {
        self.execute(Command::Position(spec))?;
        match self.execute(Command::Go(params))? {
            Reply::Search(handle) => Ok(handle),
            // Only `go` produces a search; anything else means the channel refused it
            _ => Err(ChannelError::NotReady),
        }
    }

    fn execute(&mut self, cmd: Command) -> Result<Reply, ChannelError> {
        let result = self.channel.execute(cmd);
        if let Err(err) = &result {
            warn!(%err, "session request refused");
        }
        result
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
