use lib::ai::Random;
use lib::chess::{Bitboard, Board, Color, Piece, Role, Square};
use lib::game::{Game, Transition};
use test_strategy::proptest;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn squares(s: &[&str]) -> Bitboard {
    s.iter().map(|s| sq(s)).collect()
}

#[test]
fn initial_position_has_sixteen_pieces_per_side_with_white_to_move() {
    let g = Game::new();

    for c in [Color::White, Color::Black] {
        let pieces: Vec<_> = g.board().iter().filter(|(_, p)| p.color == c).collect();
        assert_eq!(pieces.len(), 16);

        let count = |r| pieces.iter().filter(|(_, p)| p.role == r).count();
        assert_eq!(count(Role::Pawn), 8);
        assert_eq!(count(Role::Knight), 2);
        assert_eq!(count(Role::Bishop), 2);
        assert_eq!(count(Role::Rook), 2);
        assert_eq!(count(Role::Queen), 1);
        assert_eq!(count(Role::King), 1);
    }

    assert_eq!(g.board()[sq("d1")], Some(Piece::new(Role::Queen, Color::White)));
    assert_eq!(g.board()[sq("e8")], Some(Piece::new(Role::King, Color::Black)));
    assert_eq!(g.turn(), Color::White);
    assert!(!g.is_over());
}

#[test]
fn queen_diagonal_opens_once_the_king_pawn_advances() {
    let mut g = Game::new();
    assert!(g.destinations(sq("d1")).is_empty());

    g.click(sq("e2"));
    assert!(matches!(g.click(sq("e4")), Transition::Moved(_)));
    g.click(sq("e7"));
    assert!(matches!(g.click(sq("e5")), Transition::Moved(_)));

    assert_eq!(
        g.destinations(sq("d1")),
        squares(&["e2", "f3", "g4", "h5"])
    );

    assert!(matches!(g.click(sq("d1")), Transition::Selected(_)));
    assert!(matches!(g.click(sq("h5")), Transition::Moved(_)));
    assert_eq!(g.board()[sq("h5")], Some(Piece::new(Role::Queen, Color::White)));
    assert_eq!(g.turn(), Color::Black);
}

#[test]
fn queen_may_not_move_through_its_own_pawn() {
    let mut g = Game::new();
    assert!(matches!(
        g.click(sq("d1")),
        Transition::Selected(s) if s.square == sq("d1") && s.destinations.is_empty()
    ));

    assert_eq!(g.click(sq("h5")), Transition::Deselected(sq("d1")));
    assert_eq!(g.selection(), None);

    assert!(g.play("d1h5".parse().unwrap()).is_err());
    assert_eq!(g.board(), &Board::initial());
    assert_eq!(g.turn(), Color::White);
}

#[test]
fn scholars_mate_ends_only_when_the_king_is_captured() {
    let mut g = Game::new();

    for m in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
        assert!(g.play(m.parse().unwrap()).is_ok(), "{m}");
    }

    // Checkmate in standard chess, but the game goes on until the king is taken.
    assert!(!g.is_over());
    assert_eq!(g.turn(), Color::Black);

    assert!(g.play("e8f7".parse().unwrap()).is_ok());
    assert!(!g.is_over());

    assert!(g.play("c4f7".parse().unwrap()).is_ok());
    assert!(g.is_over());
    assert_eq!(g.winner(), Some(Color::White));
    assert_eq!(g.board().king(Color::Black), None);
}

#[test]
fn capturing_the_black_king_wins_the_game_for_white() {
    let mut g = Game::with_board("4k3/4Q3/8/8/8/8/8/4K3".parse().unwrap(), Color::White);

    g.click(sq("e7"));
    let Transition::Moved(played) = g.click(sq("e8")) else {
        panic!("expected the queen to take the king");
    };

    assert_eq!(played.captured, Some(Piece::new(Role::King, Color::Black)));
    assert!(g.is_over());
    assert_eq!(g.winner(), Some(Color::White));
    assert_eq!(g.click(sq("e1")), Transition::Ignored);
}

#[test]
fn deselecting_twice_leaves_the_game_untouched() {
    let mut g = Game::new();
    g.click(sq("g1"));
    assert_eq!(g.click(sq("g1")), Transition::Deselected(sq("g1")));
    assert_eq!(g.click(sq("g1")), Transition::Selected(g.selection().unwrap()));
    assert_eq!(g.click(sq("g1")), Transition::Deselected(sq("g1")));
    assert_eq!(g, Game::new());
}

#[proptest(cases = 64)]
fn random_ai_moves_a_lone_king_to_an_adjacent_square(
    #[strategy(0isize..8)] wr: isize,
    #[strategy(0isize..8)] wc: isize,
    #[strategy(0isize..8)] br: isize,
    #[filter((#wr, #wc) != (#br, #bc))]
    #[strategy(0isize..8)]
    bc: isize,
    seed: u64,
) {
    let white = Square::at(wr, wc).unwrap();
    let black = Square::at(br, bc).unwrap();

    let mut board = Board::empty();
    board.set(white, Some(Piece::new(Role::King, Color::White)));
    board.set(black, Some(Piece::new(Role::King, Color::Black)));

    let mut g = Game::with_board(board, Color::Black);
    let played = Random::with_seed(seed).play(&mut g).unwrap();

    assert_eq!(played.m.whence, black);
    assert!(played.m.whither.row().abs_diff(black.row()) <= 1);
    assert!(played.m.whither.col().abs_diff(black.col()) <= 1);
    assert_eq!(g.board()[played.m.whither], Some(Piece::new(Role::King, Color::Black)));
    assert_eq!(g.turn(), Color::White);
}

#[test]
fn random_games_alternate_turns_until_a_king_falls() {
    let mut g = Game::new();
    let mut ai = Random::with_seed(42);

    for _ in 0..1000 {
        let turn = g.turn();
        match ai.play(&mut g) {
            None => break,
            Some(played) => {
                assert_eq!(played.piece.color, turn);
                assert_eq!(g.turn(), !turn);
                assert_eq!(played.outcome, g.outcome());
            }
        }
    }

    if let Some(winner) = g.winner() {
        assert!(g.board().king(winner).is_some());
        assert!(g.board().king(!winner).is_none());
    }
}
