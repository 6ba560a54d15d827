use super::*;
use chess_core::{legal_moves, startpos};
use heuristic_engine::HeuristicEngine;

use crate::error::ProtocolError;

fn ready_channel() -> Channel {
    let mut channel = Channel::new(
        Box::new(HeuristicEngine::with_seed(42)),
        EngineConfig::default(),
    );
    channel.initialize().unwrap();
    channel
}

fn search(reply: Result<Reply, ChannelError>) -> SearchHandle {
    match reply {
        Ok(Reply::Search(handle)) => handle,
        other => panic!("expected a search handle, got {other:?}"),
    }
}

fn lines(reply: Result<Reply, ChannelError>) -> Vec<String> {
    match reply {
        Ok(Reply::Events(events)) => events.iter().map(ToString::to_string).collect(),
        other => panic!("expected events, got {other:?}"),
    }
}

fn assert_elapsed(started: Instant, ms: u64) {
    let elapsed = started.elapsed();
    assert!(
        elapsed >= Duration::from_millis(ms) && elapsed < Duration::from_millis(ms + 1),
        "expected ~{ms}ms, got {elapsed:?}"
    );
}

async fn drain(mut handle: SearchHandle) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Some(event) = handle.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn test_commands_before_initialize_are_rejected() {
    let mut channel = Channel::new(Box::new(HeuristicEngine::with_seed(1)), EngineConfig::default());
    assert_eq!(channel.state(), ChannelState::Uninitialized);
    assert!(matches!(channel.submit("isready"), Err(ChannelError::NotReady)));
    assert!(matches!(channel.submit("go movetime 100"), Err(ChannelError::NotReady)));

    channel.initialize().unwrap();
    assert!(channel.is_ready());
    assert_eq!(lines(channel.submit("isready")), vec!["readyok"]);
}

#[tokio::test(start_paused = true)]
async fn test_uci_handshake() {
    let mut channel = ready_channel();
    let out = lines(channel.submit("uci"));
    assert_eq!(out[0], "id name Heuristic Engine 1.0");
    assert_eq!(out[1], "id author ChessLab");
    assert!(out.iter().any(|l| l.starts_with("option name Skill Level type spin")));
    assert_eq!(out.last().map(String::as_str), Some("uciok"));
}

#[tokio::test(start_paused = true)]
async fn test_setoption_changes_announced_default() {
    let mut channel = ready_channel();
    channel.submit("setoption name Skill Level value 20").unwrap();
    let out = lines(channel.submit("uci"));
    assert!(out.contains(&"option name Skill Level type spin default 20 min 0 max 20".to_string()));

    // Unknown options are accepted silently
    assert!(matches!(
        channel.submit("setoption name Hash value 64"),
        Ok(Reply::None)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_go_movetime_delivers_after_latency() {
    let mut channel = ready_channel();
    channel.submit("position startpos moves e2e4").unwrap();

    let started = Instant::now();
    let handle = search(channel.submit("go movetime 1000"));
    let best = handle.best_move().await.expect("not cancelled");

    assert_elapsed(started, 50);
    let pos = reconstruct(&PositionSpec::startpos_with_moves(["e2e4"]));
    assert!(legal_moves(&pos).contains(&best.unwrap()));
}

#[tokio::test(start_paused = true)]
async fn test_movetime_latency_is_capped() {
    let mut channel = ready_channel();
    let started = Instant::now();
    let events = drain(search(channel.submit("go movetime 60000"))).await;
    assert_eq!(events.len(), 1);
    assert_elapsed(started, 100);
}

#[tokio::test(start_paused = true)]
async fn test_bare_go_uses_default_move_time() {
    let mut channel = ready_channel();
    let started = Instant::now();
    let events = drain(search(channel.submit("go wtime 30000 btime 30000"))).await;
    assert!(matches!(events.as_slice(), [EngineEvent::BestMove(Some(_))]));
    assert_elapsed(started, 50);
}

#[tokio::test(start_paused = true)]
async fn test_stop_suppresses_pending_bestmove() {
    let mut channel = ready_channel();
    let handle = search(channel.submit("go movetime 1000"));
    assert!(!handle.token().is_cancelled());

    channel.submit("stop").unwrap();
    assert!(handle.token().is_cancelled());
    assert_eq!(handle.best_move().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_new_go_cancels_previous() {
    let mut channel = ready_channel();
    let first = search(channel.submit("go movetime 1000"));
    let second = search(channel.submit("go movetime 500"));

    assert_ne!(first.token().id(), second.token().id());
    assert_eq!(channel.current_request().map(|t| t.id()), Some(second.token().id()));
    assert_eq!(first.best_move().await, None);
    assert!(second.best_move().await.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_go_depth_streams_info_then_bestmove() {
    let mut channel = ready_channel();
    let events = drain(search(channel.submit("go depth 8"))).await;
    assert_eq!(events.len(), 5);

    let infos: Vec<&Evaluation> = events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::Info(eval) => Some(eval),
            _ => None,
        })
        .collect();
    assert_eq!(infos.len(), 4);
    assert_eq!(
        infos.iter().map(|e| e.elapsed_ms).collect::<Vec<_>>(),
        vec![10, 20, 30, 40]
    );
    assert_eq!(infos[3].depth, 8);
    assert_eq!(infos[0].nps, infos[0].nodes * 100);

    let EngineEvent::BestMove(Some(best)) = &events[4] else {
        panic!("analysis must end with a move");
    };
    assert_eq!(infos[3].best_move.as_ref(), Some(best));
    assert!(events[0].to_string().starts_with("info depth 2 score cp"));
}

#[tokio::test(start_paused = true)]
async fn test_go_depth_is_capped() {
    let mut channel = ready_channel();
    let eval = search(channel.submit("go depth 99"))
        .final_evaluation()
        .await
        .unwrap();
    assert_eq!(eval.depth, 20);
}

#[tokio::test(start_paused = true)]
async fn test_analysis_without_moves() {
    let mut channel = ready_channel();
    channel
        .submit("position fen r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
        .unwrap();
    let events = drain(search(channel.submit("go depth 6"))).await;
    let text: Vec<String> = events.iter().map(ToString::to_string).collect();
    assert_eq!(text.len(), 2);
    assert!(text[0].starts_with("info depth 6 score mate 0"));
    assert_eq!(text[1], "bestmove 0000");
}

#[tokio::test(start_paused = true)]
async fn test_bad_fen_falls_back_to_startpos() {
    let mut channel = ready_channel();
    channel.submit("position fen this is not chess").unwrap();
    let best = search(channel.submit("go movetime 100"))
        .best_move()
        .await
        .unwrap()
        .unwrap();
    assert!(legal_moves(&startpos()).contains(&best));
}

#[tokio::test(start_paused = true)]
async fn test_huge_fullmove_counter_still_moves() {
    let mut channel = ready_channel();
    channel
        .submit("position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 4000000000")
        .unwrap();
    let best = search(channel.submit("go movetime 100"))
        .best_move()
        .await
        .unwrap()
        .unwrap();
    assert!(legal_moves(&startpos()).contains(&best));
}

#[tokio::test(start_paused = true)]
async fn test_ucinewgame_resets_position() {
    let mut channel = ready_channel();
    channel.submit("position startpos moves d2d4").unwrap();
    let pending = search(channel.submit("go movetime 1000"));
    channel.submit("ucinewgame").unwrap();

    assert_eq!(channel.position(), &PositionSpec::startpos());
    assert_eq!(pending.best_move().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_protocol_errors_are_reported() {
    let mut channel = ready_channel();
    assert!(matches!(
        channel.submit("fly away"),
        Err(ChannelError::Protocol(ProtocolError::UnknownCommand(_)))
    ));
    assert!(matches!(channel.submit(""), Err(ChannelError::Protocol(ProtocolError::Empty))));
    // Still usable afterwards
    assert_eq!(lines(channel.submit("isready")), vec!["readyok"]);
}

#[tokio::test(start_paused = true)]
async fn test_quit_is_idempotent() {
    let mut channel = ready_channel();
    let pending = search(channel.submit("go movetime 1000"));

    assert!(matches!(channel.submit("quit"), Ok(Reply::None)));
    assert!(channel.is_terminated());
    assert_eq!(pending.best_move().await, None);

    assert!(matches!(channel.submit("quit"), Ok(Reply::None)));
    assert!(matches!(channel.submit("isready"), Err(ChannelError::Terminated)));
    assert!(matches!(channel.initialize(), Err(ChannelError::Terminated)));

    channel.terminate();
    assert!(channel.is_terminated());
}
