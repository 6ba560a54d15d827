//! The UCI command grammar.
//!
//! Lines are parsed once into a [`Command`]; everything downstream works on
//! typed values. Outgoing lines are [`EngineEvent`]s whose `Display` is the
//! protocol text.

use std::fmt;
use std::str::FromStr;

use chess_core::{best_move_to_uci, EngineOption, Evaluation, Move, OptionDecl, PositionSpec};

use crate::error::ProtocolError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Uci,
    IsReady,
    UciNewGame,
    SetOption(EngineOption),
    Position(PositionSpec),
    Go(GoParams),
    Stop,
    Quit,
}

/// Arguments of `go`. Clock fields are parsed but only used to pick the
/// default move time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u32>,
    pub infinite: bool,
}

impl GoParams {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }

    pub fn movetime(ms: u64) -> Self {
        Self {
            movetime: Some(ms),
            ..Self::default()
        }
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse_command(line)
    }
}

pub fn parse_command(line: &str) -> Result<Command, ProtocolError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = tokens.split_first() else {
        return Err(ProtocolError::Empty);
    };

    match head {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "setoption" => parse_setoption(args).map(Command::SetOption),
        "position" => parse_position(args).map(Command::Position),
        "go" => parse_go(args).map(Command::Go),
        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

fn parse_number<T: FromStr>(field: &str, value: Option<&&str>) -> Result<T, ProtocolError> {
    let value = value.ok_or_else(|| ProtocolError::invalid(field, ""))?;
    value
        .parse()
        .map_err(|_| ProtocolError::invalid(field, *value))
}

/// `setoption name <id...> [value <x...>]`, or the short `setoption <id> <x>`.
fn parse_setoption(args: &[&str]) -> Result<EngineOption, ProtocolError> {
    let (name, value) = match args.first() {
        None => {
            return Err(ProtocolError::MissingArgument {
                command: "setoption",
                argument: "an option name",
            })
        }
        Some(&"name") => {
            let rest = &args[1..];
            let split = rest.iter().position(|&t| t == "value");
            let (name, value) = match split {
                Some(idx) => (&rest[..idx], &rest[idx + 1..]),
                None => (rest, &[][..]),
            };
            (name.join(" "), value.join(" "))
        }
        Some(name) => (name.to_string(), args[1..].join(" ")),
    };

    if name.is_empty() {
        return Err(ProtocolError::MissingArgument {
            command: "setoption",
            argument: "an option name",
        });
    }

    let number = |field: &str| -> Result<u32, ProtocolError> {
        value
            .parse::<u32>()
            .map_err(|_| ProtocolError::invalid(field, value.as_str()))
    };

    match name.to_ascii_lowercase().as_str() {
        "skill level" => {
            let skill = number("Skill Level")?;
            if skill > 20 {
                return Err(ProtocolError::invalid("Skill Level", value));
            }
            Ok(EngineOption::SkillLevel(skill as u8))
        }
        "skill" => {
            let level = number("Skill")?;
            if !(1..=10).contains(&level) {
                return Err(ProtocolError::invalid("Skill", value));
            }
            Ok(EngineOption::Skill(level as u8))
        }
        "uci_elo" => Ok(EngineOption::UciElo(number("UCI_Elo")?)),
        _ => Ok(EngineOption::Other { name, value }),
    }
}

/// `position startpos [moves ...]` or `position fen <fen> [moves ...]`.
fn parse_position(args: &[&str]) -> Result<PositionSpec, ProtocolError> {
    let moves_at = args.iter().position(|&t| t == "moves");
    let (base, moves) = match moves_at {
        Some(idx) => (&args[..idx], &args[idx + 1..]),
        None => (args, &[][..]),
    };
    let moves: Vec<String> = moves.iter().map(|m| m.to_string()).collect();

    match base.split_first() {
        Some((&"startpos", _)) => Ok(PositionSpec::StartPos { moves }),
        Some((&"fen", fen)) if !fen.is_empty() => Ok(PositionSpec::Fen {
            fen: fen.join(" "),
            moves,
        }),
        Some((&"fen", _)) => Err(ProtocolError::MissingArgument {
            command: "position",
            argument: "a FEN string",
        }),
        Some((other, _)) => Err(ProtocolError::invalid("position", *other)),
        None => Err(ProtocolError::MissingArgument {
            command: "position",
            argument: "startpos or fen",
        }),
    }
}

fn parse_go(args: &[&str]) -> Result<GoParams, ProtocolError> {
    let mut params = GoParams::default();
    let mut iter = args.iter();
    while let Some(&token) = iter.next() {
        match token {
            "depth" => params.depth = Some(parse_number("depth", iter.next())?),
            "movetime" => params.movetime = Some(parse_number("movetime", iter.next())?),
            "wtime" => params.wtime = Some(parse_number("wtime", iter.next())?),
            "btime" => params.btime = Some(parse_number("btime", iter.next())?),
            "winc" => params.winc = Some(parse_number("winc", iter.next())?),
            "binc" => params.binc = Some(parse_number("binc", iter.next())?),
            "movestogo" => params.movestogo = Some(parse_number("movestogo", iter.next())?),
            "infinite" => params.infinite = true,
            // ponder, nodes, mate, searchmoves: not supported, skipped
            _ => {}
        }
    }
    Ok(params)
}

/// One line the engine sends back.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    IdName(String),
    IdAuthor(String),
    Option(OptionDecl),
    UciOk,
    ReadyOk,
    Info(Evaluation),
    /// `None` is printed as the null move `0000`
    BestMove(Option<Move>),
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineEvent::IdName(name) => write!(f, "id name {name}"),
            EngineEvent::IdAuthor(author) => write!(f, "id author {author}"),
            EngineEvent::Option(opt) => write!(
                f,
                "option name {} type spin default {} min {} max {}",
                opt.name, opt.default, opt.min, opt.max
            ),
            EngineEvent::UciOk => write!(f, "uciok"),
            EngineEvent::ReadyOk => write!(f, "readyok"),
            EngineEvent::Info(eval) => write!(f, "{eval}"),
            EngineEvent::BestMove(mv) => write!(f, "bestmove {}", best_move_to_uci(mv.as_ref())),
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
