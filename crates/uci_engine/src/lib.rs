//! UCI front end for the heuristic engine.
//!
//! [`Channel`] is the protocol state machine, [`EngineSession`] the
//! callback-style API for embedding, and [`analysis`] turns per-ply
//! evaluations into a [`GameReport`].

pub mod analysis;
pub mod channel;
pub mod config;
pub mod error;
pub mod protocol;
pub mod session;

pub use analysis::{classify_move, move_accuracy, GameReport, MoveClassification, MoveReport};
pub use channel::{Channel, ChannelState, Reply, SearchHandle};
pub use config::EngineConfig;
pub use error::{ChannelError, ConfigError, ProtocolError};
pub use protocol::{parse_command, Command, EngineEvent, GoParams};
pub use session::EngineSession;
