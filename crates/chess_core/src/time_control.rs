//! Search limits, request tokens and the simulated latency model.
//!
//! The engine never spends real time thinking: a request costs one pass over
//! the legal moves. What callers see as "thinking time" is a delay chosen by
//! [`LatencyModel`], after which the result is delivered unless its
//! [`RequestToken`] was cancelled in the meantime.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// What a `go` asks for.
///
/// A depth limit turns the request into an analysis (progressive `info`
/// events); otherwise it is a best-move request bounded by `move_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Requested analysis depth in plies
    pub depth: Option<u8>,
    /// Requested thinking time for a best-move request
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    /// Analysis to a fixed depth.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth: Some(depth),
            move_time: None,
        }
    }

    /// Best-move request with a time budget.
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: None,
            move_time: Some(move_time),
        }
    }

    pub fn is_analysis(&self) -> bool {
        self.depth.is_some()
    }
}

/// Cancellation handle shared between a request and its delivery task.
///
/// Cheap to clone. Delivery code calls [`RequestToken::is_cancelled`] right
/// before firing, so a `stop` issued after scheduling still suppresses the
/// result.
#[derive(Debug, Clone)]
pub struct RequestToken {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl RequestToken {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Maps a request onto the delays at which its events fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyModel {
    /// Fraction of the requested move time spent "thinking"
    pub move_time_ratio: f64,
    /// Upper bound on the best-move delay
    pub max_move_latency: Duration,
    /// Longest move time a caller may request
    pub max_move_time: Duration,
    /// Spacing between analysis rounds
    pub round_interval: Duration,
}

impl Default for LatencyModel {
    fn default() -> Self {
        Self {
            move_time_ratio: 0.05,
            max_move_latency: Duration::from_millis(100),
            max_move_time: Duration::from_millis(2000),
            round_interval: Duration::from_millis(10),
        }
    }
}

impl LatencyModel {
    /// Requested move time clamped to the allowed maximum.
    pub fn clamp_move_time(&self, requested: Duration) -> Duration {
        requested.min(self.max_move_time)
    }

    /// Delay before a best-move event: proportional to the (clamped) move
    /// time, capped at `max_move_latency`.
    pub fn move_latency(&self, requested: Duration) -> Duration {
        let scaled = self
            .clamp_move_time(requested)
            .mul_f64(self.move_time_ratio.max(0.0));
        scaled.min(self.max_move_latency)
    }

    /// Delay of analysis round `round` (1-based).
    pub fn round_delay(&self, round: u32) -> Duration {
        self.round_interval * round
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
