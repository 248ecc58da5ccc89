//! Rule invariants checked over random playouts.

use chess_core::{Color, Coord, MoveKind, PieceKind};
use chess_engine::{legality, Board, Game, GameState};
use proptest::prelude::*;

fn sq(s: &str) -> Coord {
    Coord::from_algebraic(s).unwrap()
}

/// Plays the game forward, choosing each move by the next seed, and checks
/// the board invariants after every ply. Every move is replayed on a copy of
/// the starting board, which must stay equal to the game's board.
fn playout(mut game: Game, seeds: &[usize]) {
    let mut mirror = game.board().clone();
    for &seed in seeds {
        if game.state().is_over() {
            break;
        }
        let mover = game.turn();
        let moves = game.legal_moves().to_vec();
        assert!(!moves.is_empty(), "running game without legal moves");

        for &(from, mv) in &moves {
            assert!(mv.to.rank() < 8 && mv.to.file() < 8);
            assert!(!legality::captures_king(game.board(), mv));
            assert_eq!(game.board().at(from).map(|p| p.color), Some(mover));
        }

        let (from, mv) = moves[seed % moves.len()];
        let snapshot = game.board().clone();
        let pieces_before = snapshot.pieces().count();

        game.play_move(from, mv).unwrap();
        mirror.do_move(from, mv).unwrap();
        if let GameState::AwaitingPromotion(at) = game.state() {
            assert_eq!(at, mv.to);
            let kind = PieceKind::PROMOTIONS[seed % PieceKind::PROMOTIONS.len()];
            game.promote(kind).unwrap();
            mirror.promote(mv.to, kind).unwrap();
        }

        let board = game.board();
        assert_eq!(mirror, *board, "copy diverged after {from}{}", mv.to);
        assert!(!board.is_in_check(mover), "{mover} left its king in check");
        assert!(board.king(Color::White).is_some());
        assert!(board.king(Color::Black).is_some());
        assert!(board.pieces().count() <= pieces_before);

        let moved = board.at(mv.to).unwrap();
        assert_eq!(moved.color, mover);
        assert!(moved.has_moved);
        assert_eq!(moved.double_stepped, mv.kind == MoveKind::DoubleWalk);

        // The snapshot keeps the mover's piece where it stood.
        assert!(snapshot.at(from).is_some_and(|p| p.color == mover));
        assert!(snapshot.at(mv.to).map_or(true, |p| p.color != mover));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_playouts_keep_invariants(seeds in prop::collection::vec(any::<usize>(), 1..60)) {
        playout(Game::new(), &seeds);
    }

    #[test]
    fn random_playouts_from_open_position(seeds in prop::collection::vec(any::<usize>(), 1..40)) {
        let game = Game::from_fen("r3k2r/pPp2ppp/8/3pP3/8/8/P1P2PpP/R3K2R w KQkq d6 0 1").unwrap();
        playout(game, &seeds);
    }

    #[test]
    fn at_offset_matches_at(rank in -3i32..11, file in -3i32..11) {
        let board = Board::standard();
        let expected = i8::try_from(rank)
            .ok()
            .zip(i8::try_from(file).ok())
            .and_then(|(r, f)| Coord::new(r, f))
            .and_then(|c| board.at(c));
        prop_assert_eq!(board.at_offset(rank, file), expected);
    }
}

#[test]
fn en_passant_after_double_step() {
    let mut game = Game::new();
    game.play(sq("e2"), sq("e4")).unwrap();
    game.play(sq("h7"), sq("h6")).unwrap();
    game.play(sq("e4"), sq("e5")).unwrap();
    game.play(sq("d7"), sq("d5")).unwrap();

    let pawn = game.board().at(sq("d5")).unwrap();
    assert!(pawn.double_stepped);
    let moves = game.legal_moves_from(sq("e5"));
    assert!(moves
        .iter()
        .any(|m| m.kind == MoveKind::EnPassant && m.to == Coord::new(2, 3).unwrap()));
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut game = Game::new();
    game.play(sq("e2"), sq("e4")).unwrap();
    game.play(sq("h7"), sq("h6")).unwrap();
    game.play(sq("e4"), sq("e5")).unwrap();
    game.play(sq("d7"), sq("d5")).unwrap();
    game.play(sq("a2"), sq("a3")).unwrap();
    game.play(sq("h6"), sq("h5")).unwrap();

    // The pawn still carries its flag, but it is no longer the last mover.
    assert!(game.board().at(sq("d5")).unwrap().double_stepped);
    assert!(!game
        .legal_moves_from(sq("e5"))
        .iter()
        .any(|m| m.kind == MoveKind::EnPassant));
}

#[test]
fn scholars_mate_is_checkmate() {
    let mut game = Game::new();
    for (from, to) in [
        ("e2", "e4"),
        ("e7", "e5"),
        ("f1", "c4"),
        ("b8", "c6"),
        ("d1", "h5"),
        ("g8", "f6"),
        ("h5", "f7"),
    ] {
        game.play(sq(from), sq(to)).unwrap();
    }
    assert_eq!(game.state(), GameState::WhiteWins);
    assert_eq!(
        legality::outcome(game.board(), Color::Black),
        Some(legality::Outcome::Checkmate)
    );
}

#[test]
fn stalemate_is_not_checkmate() {
    let board = Board::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").unwrap();
    assert_eq!(
        legality::outcome(&board, Color::Black),
        Some(legality::Outcome::Stalemate)
    );
}
