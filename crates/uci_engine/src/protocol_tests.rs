use super::*;

#[test]
fn test_simple_commands() {
    assert_eq!(parse_command("uci"), Ok(Command::Uci));
    assert_eq!(parse_command("  isready  "), Ok(Command::IsReady));
    assert_eq!(parse_command("ucinewgame"), Ok(Command::UciNewGame));
    assert_eq!(parse_command("stop"), Ok(Command::Stop));
    assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
}

#[test]
fn test_empty_and_unknown() {
    assert_eq!(parse_command(""), Err(ProtocolError::Empty));
    assert_eq!(parse_command("   "), Err(ProtocolError::Empty));
    assert_eq!(
        parse_command("debug on"),
        Err(ProtocolError::UnknownCommand("debug".to_string()))
    );
}

#[test]
fn test_position_startpos() {
    assert_eq!(
        parse_command("position startpos"),
        Ok(Command::Position(PositionSpec::startpos()))
    );
    assert_eq!(
        parse_command("position startpos moves e2e4 e7e5"),
        Ok(Command::Position(PositionSpec::startpos_with_moves([
            "e2e4", "e7e5"
        ])))
    );
}

#[test]
fn test_position_fen() {
    let cmd = parse_command(
        "position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1 moves c7c5",
    );
    assert_eq!(
        cmd,
        Ok(Command::Position(PositionSpec::Fen {
            fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".to_string(),
            moves: vec!["c7c5".to_string()],
        }))
    );
}

#[test]
fn test_position_errors() {
    assert!(matches!(
        parse_command("position"),
        Err(ProtocolError::MissingArgument { .. })
    ));
    assert!(matches!(
        parse_command("position fen"),
        Err(ProtocolError::MissingArgument { .. })
    ));
    assert!(matches!(
        parse_command("position somewhere"),
        Err(ProtocolError::InvalidValue { .. })
    ));
}

#[test]
fn test_go_variants() {
    assert_eq!(parse_command("go depth 12"), Ok(Command::Go(GoParams::depth(12))));
    assert_eq!(
        parse_command("go movetime 1500"),
        Ok(Command::Go(GoParams::movetime(1500)))
    );
    assert_eq!(parse_command("go"), Ok(Command::Go(GoParams::default())));

    let Ok(Command::Go(params)) = parse_command("go wtime 60000 btime 55000 winc 1000 binc 1000")
    else {
        panic!("clock go should parse");
    };
    assert_eq!(params.wtime, Some(60000));
    assert_eq!(params.binc, Some(1000));
    assert_eq!(params.depth, None);

    let Ok(Command::Go(params)) = parse_command("go infinite") else {
        panic!("infinite go should parse");
    };
    assert!(params.infinite);
}

#[test]
fn test_go_invalid_values() {
    assert!(matches!(
        parse_command("go depth deep"),
        Err(ProtocolError::InvalidValue { .. })
    ));
    assert!(matches!(
        parse_command("go movetime"),
        Err(ProtocolError::InvalidValue { .. })
    ));
}

#[test]
fn test_setoption_forms() {
    assert_eq!(
        parse_command("setoption name Skill Level value 13"),
        Ok(Command::SetOption(EngineOption::SkillLevel(13)))
    );
    assert_eq!(
        parse_command("setoption name UCI_Elo value 1850"),
        Ok(Command::SetOption(EngineOption::UciElo(1850)))
    );
    assert_eq!(
        parse_command("setoption name Skill value 4"),
        Ok(Command::SetOption(EngineOption::Skill(4)))
    );
    assert_eq!(
        parse_command("setoption skill 7"),
        Ok(Command::SetOption(EngineOption::Skill(7)))
    );
}

#[test]
fn test_setoption_unknown_is_kept() {
    assert_eq!(
        parse_command("setoption name Hash value 128"),
        Ok(Command::SetOption(EngineOption::Other {
            name: "Hash".to_string(),
            value: "128".to_string(),
        }))
    );
    assert_eq!(
        parse_command("setoption name Clear Hash"),
        Ok(Command::SetOption(EngineOption::Other {
            name: "Clear Hash".to_string(),
            value: String::new(),
        }))
    );
}

#[test]
fn test_setoption_invalid() {
    assert!(matches!(
        parse_command("setoption name Skill Level value 21"),
        Err(ProtocolError::InvalidValue { .. })
    ));
    assert!(matches!(
        parse_command("setoption skill 0"),
        Err(ProtocolError::InvalidValue { .. })
    ));
    assert!(matches!(
        parse_command("setoption name UCI_Elo value strong"),
        Err(ProtocolError::InvalidValue { .. })
    ));
    assert!(matches!(
        parse_command("setoption"),
        Err(ProtocolError::MissingArgument { .. })
    ));
}

#[test]
fn test_event_lines() {
    assert_eq!(EngineEvent::UciOk.to_string(), "uciok");
    assert_eq!(EngineEvent::ReadyOk.to_string(), "readyok");
    assert_eq!(EngineEvent::BestMove(None).to_string(), "bestmove 0000");
    assert_eq!(
        EngineEvent::IdName("Heuristic Engine 1.0".to_string()).to_string(),
        "id name Heuristic Engine 1.0"
    );
    let opt = OptionDecl {
        name: "Skill Level",
        default: 8,
        min: 0,
        max: 20,
    };
    assert_eq!(
        EngineEvent::Option(opt).to_string(),
        "option name Skill Level type spin default 8 min 0 max 20"
    );
}
