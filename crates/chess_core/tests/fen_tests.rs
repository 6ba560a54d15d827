use chess_core::{
    PositionSpec, apply_move, is_game_over, legal_move_count, legal_moves, parse_fen, reconstruct,
    startpos, to_fen,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const ROUND_TRIP: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
    // En passant capture available
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    // Partial castling rights
    "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 5 20",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "8/8/8/4k3/8/4K3/8/8 w - - 99 60",
];

#[test]
fn test_fen_round_trip() {
    for fen in ROUND_TRIP {
        let pos = parse_fen(fen).unwrap();
        assert_eq!(&to_fen(&pos), fen);
    }
}

#[test]
fn test_reconstruct_from_fen_matches_parse() {
    for fen in ROUND_TRIP {
        let pos = reconstruct(&PositionSpec::fen(*fen));
        assert_eq!(&to_fen(&pos), fen);
        assert_eq!(legal_move_count(&pos), legal_move_count(&parse_fen(fen).unwrap()));
    }
}

#[test]
fn test_unavailable_en_passant_square_is_dropped() {
    // After 1.e4 no black pawn can capture on e3
    let pos = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    assert_eq!(
        to_fen(&pos),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn test_reconstructed_game_matches_known_fen() {
    let spec = PositionSpec::startpos_with_moves(["e2e4", "d7d5", "e4e5", "f7f5"]);
    assert_eq!(
        to_fen(&reconstruct(&spec)),
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3"
    );
}

#[test]
fn test_random_playout_positions_survive_fen() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut pos = startpos();
        for _ in 0..40 {
            let fen = to_fen(&pos);
            let reparsed = parse_fen(&fen).unwrap();
            assert_eq!(to_fen(&reparsed), fen);
            assert_eq!(legal_moves(&reparsed), legal_moves(&pos));

            if is_game_over(&pos) {
                break;
            }
            let moves = legal_moves(&pos);
            let mv = moves.choose(&mut rng).unwrap();
            pos = apply_move(&pos, mv).unwrap();
        }
    }
}
