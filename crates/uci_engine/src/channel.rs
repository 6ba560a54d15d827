//! Asynchronous command channel in front of an [`Engine`].
//!
//! Commands are accepted synchronously: parsed, validated and computed
//! immediately. Only delivery is deferred. Each `go` gets a
//! [`RequestToken`] and a spawned task that sleeps until each event's
//! simulated delay, checks the token, and only then sends. A `stop` (or a
//! newer `go`) cancels the token, so anything still pending never fires.
//!
//! [`Channel::execute`] spawns onto the current tokio runtime and must be
//! called from within one.

use std::time::Duration;

use chess_core::{
    reconstruct, Engine, Evaluation, LatencyModel, Move, PositionSpec, RequestToken, SearchLimits,
};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::error::ChannelError;
use crate::protocol::{parse_command, Command, EngineEvent, GoParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Uninitialized,
    Ready,
    Terminated,
}

/// What a command produced.
#[derive(Debug)]
pub enum Reply {
    /// Nothing to send
    None,
    /// Lines to send right away
    Events(Vec<EngineEvent>),
    /// A `go` whose events arrive later
    Search(SearchHandle),
}

/// Receiving end of one `go`.
///
/// The stream ends after `bestmove`, or early if the request is cancelled.
#[derive(Debug)]
pub struct SearchHandle {
    token: RequestToken,
    events: mpsc::UnboundedReceiver<EngineEvent>,
}

impl SearchHandle {
    pub fn token(&self) -> &RequestToken {
        &self.token
    }

    pub async fn recv(&mut self) -> Option<EngineEvent> {
        self.events.recv().await
    }

    /// Wait for `bestmove`. `None` if the request was cancelled first.
    pub async fn best_move(mut self) -> Option<Option<Move>> {
        while let Some(event) = self.recv().await {
            if let EngineEvent::BestMove(mv) = event {
                return Some(mv);
            }
        }
        None
    }

    /// Wait for the end of an analysis and return its last `info`.
    pub async fn final_evaluation(mut self) -> Option<Evaluation> {
        let mut last = None;
        while let Some(event) = self.recv().await {
            match event {
                EngineEvent::Info(eval) => last = Some(eval),
                EngineEvent::BestMove(_) => return last,
                _ => {}
            }
        }
        None
    }
}

pub struct Channel {
    engine: Box<dyn Engine>,
    config: EngineConfig,
    latency: LatencyModel,
    state: ChannelState,
    position: PositionSpec,
    current: Option<RequestToken>,
    next_request: u64,
}

impl Channel {
    pub fn new(engine: Box<dyn Engine>, config: EngineConfig) -> Self {
        let latency = config.latency_model();
        Self {
            engine,
            config,
            latency,
            state: ChannelState::Uninitialized,
            position: PositionSpec::startpos(),
            current: None,
            next_request: 0,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ChannelState::Ready
    }

    pub fn is_terminated(&self) -> bool {
        self.state == ChannelState::Terminated
    }

    pub fn position(&self) -> &PositionSpec {
        &self.position
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Token of the most recent `go`, if any.
    pub fn current_request(&self) -> Option<&RequestToken> {
        self.current.as_ref()
    }

    pub fn initialize(&mut self) -> Result<(), ChannelError> {
        match self.state {
            ChannelState::Uninitialized => {
                debug!(engine = self.engine.name(), "channel ready");
                self.state = ChannelState::Ready;
                Ok(())
            }
            ChannelState::Ready => Ok(()),
            ChannelState::Terminated => Err(ChannelError::Terminated),
        }
    }

    /// Cancel whatever is pending and refuse further commands. Idempotent.
    pub fn terminate(&mut self) {
        self.cancel_current();
        if self.state != ChannelState::Terminated {
            debug!("channel terminated");
            self.state = ChannelState::Terminated;
        }
    }

    /// Parse and execute one protocol line. Problems are logged and returned.
    pub fn submit(&mut self, line: &str) -> Result<Reply, ChannelError> {
        let result = parse_command(line)
            .map_err(ChannelError::from)
            .and_then(|cmd| self.execute(cmd));
        if let Err(err) = &result {
            warn!(%err, line, "command ignored");
        }
        result
    }

    pub fn execute(&mut self, cmd: Command) -> Result<Reply, ChannelError> {
        match self.state {
            ChannelState::Terminated if cmd == Command::Quit => return Ok(Reply::None),
            ChannelState::Terminated => return Err(ChannelError::Terminated),
            ChannelState::Uninitialized if cmd != Command::Quit => {
                return Err(ChannelError::NotReady)
            }
            _ => {}
        }
        debug!(?cmd, "command accepted");

        let reply = match cmd {
            Command::Uci => {
                let mut events = vec![
                    EngineEvent::IdName(self.engine.name().to_string()),
                    EngineEvent::IdAuthor(self.engine.author().to_string()),
                ];
                events.extend(self.engine.options().into_iter().map(EngineEvent::Option));
                events.push(EngineEvent::UciOk);
                Reply::Events(events)
            }
            Command::IsReady => Reply::Events(vec![EngineEvent::ReadyOk]),
            Command::UciNewGame => {
                self.cancel_current();
                self.engine.new_game();
                self.position = PositionSpec::startpos();
                Reply::None
            }
            Command::SetOption(option) => {
                if !self.engine.set_option(&option) {
                    debug!(?option, "option ignored");
                }
                Reply::None
            }
            Command::Position(spec) => {
                self.position = spec;
                Reply::None
            }
            Command::Go(params) => Reply::Search(self.go(params)),
            Command::Stop => {
                self.cancel_current();
                Reply::None
            }
            Command::Quit => {
                self.terminate();
                Reply::None
            }
        };
        Ok(reply)
    }

    fn cancel_current(&mut self) {
        if let Some(token) = self.current.take() {
            trace!(request = token.id(), "cancelling request");
            token.cancel();
        }
    }

    fn limits(&self, params: &GoParams) -> SearchLimits {
        match params.depth {
            Some(depth) => SearchLimits::depth(depth.min(self.config.max_depth)),
            None => {
                let ms = params.movetime.unwrap_or(self.config.default_move_time_ms);
                SearchLimits::time(Duration::from_millis(ms))
            }
        }
    }

    fn go(&mut self, params: GoParams) -> SearchHandle {
        self.cancel_current();

        self.next_request += 1;
        let token = RequestToken::new(self.next_request);
        self.current = Some(token.clone());

        let pos = reconstruct(&self.position);
        let limits = self.limits(&params);
        let report = self.engine.search(&pos, &limits);
        let schedule = self.schedule(&limits, report.best_move, report.evaluations);

        let (tx, events) = mpsc::unbounded_channel();
        tokio::spawn(deliver(token.clone(), schedule, tx));

        SearchHandle { token, events }
    }

    /// Pair every event of a search with the delay at which it fires.
    fn schedule(
        &self,
        limits: &SearchLimits,
        best_move: Option<Move>,
        evaluations: Vec<Evaluation>,
    ) -> Vec<(Duration, EngineEvent)> {
        if !limits.is_analysis() {
            let delay = self
                .latency
                .move_latency(limits.move_time.unwrap_or_default());
            return vec![(delay, EngineEvent::BestMove(best_move))];
        }

        let mut schedule: Vec<(Duration, EngineEvent)> = evaluations
            .into_iter()
            .zip(1u32..)
            .map(|(eval, round)| {
                let delay = self.latency.round_delay(round);
                let elapsed = delay.as_millis() as u64;
                (delay, EngineEvent::Info(eval.with_timing(elapsed)))
            })
            .collect();
        let last = schedule.last().map_or(Duration::ZERO, |(delay, _)| *delay);
        schedule.push((last, EngineEvent::BestMove(best_move)));
        schedule
    }
}

async fn deliver(
    token: RequestToken,
    schedule: Vec<(Duration, EngineEvent)>,
    tx: mpsc::UnboundedSender<EngineEvent>,
) {
    let start = Instant::now();
    for (delay, event) in schedule {
        sleep_until(start + delay).await;
        if token.is_cancelled() {
            trace!(request = token.id(), "suppressed cancelled event");
            return;
        }
        if tx.send(event).is_err() {
            return;
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod channel_tests;
