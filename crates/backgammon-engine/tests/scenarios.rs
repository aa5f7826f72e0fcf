//! End-to-end game scenarios through the public API.

use backgammon_engine::{
    apply, legal_moves, validate, Board, Color, Destination, Dice, GameError, GameState,
    GameStatus, Move, MoveError, Point, Source,
};

fn dice(a: u8, b: u8) -> Dice {
    Dice::new(a, b).unwrap()
}

fn pt(i: u8) -> Point {
    Point::new(i).unwrap()
}

#[test]
fn starting_pip_counts() {
    let board = Board::initial();
    assert_eq!(board.pip_count(Color::White), 167);
    assert_eq!(board.pip_count(Color::Black), 167);
}

#[test]
fn opening_three_one_makes_the_five_point() {
    let game = GameState::new()
        .start(Color::White)
        .unwrap()
        .start_turn_with_dice(dice(3, 1))
        .unwrap();

    let first = Move::between(7, 4, Color::White, 3);
    let second = Move::between(5, 4, Color::White, 1);
    let d = *game.dice().unwrap();
    assert_eq!(validate(game.board(), &d, Color::White, first), Ok(()));

    let game = game.make_move(first).unwrap();
    let d = *game.dice().unwrap();
    assert_eq!(validate(game.board(), &d, Color::White, second), Ok(()));

    let game = game.make_move(second).unwrap();
    assert_eq!(game.board().checkers_at(pt(4), Color::White), 2);
    assert!(game.dice().is_none());
    assert_eq!(game.on_roll(), Color::Black);
    assert_eq!(game.board().pip_count(Color::White), 163);
}

#[test]
fn white_hits_black_blot_on_eighteen() {
    let board = Board::with_layout(&[(22, 2), (5, 13)], &[(18, 1), (0, 14)]);
    let next = apply(&board, Move::between(22, 18, Color::White, 4));
    assert_eq!(next.points[18], 1);
    assert_eq!(next.black_bar, 1);
    assert_eq!(next.checker_count(Color::Black), 15);
}

#[test]
fn hit_checker_must_re_enter() {
    let board = Board::with_layout(&[(22, 2), (5, 13)], &[(18, 1), (0, 14)]);
    let game = GameState::from_position(board, Color::White, Default::default())
        .start_turn_with_dice(dice(4, 2))
        .unwrap()
        .make_move(Move::between(22, 18, Color::White, 4))
        .unwrap()
        .make_move(Move::between(22, 20, Color::White, 2))
        .unwrap();
    assert_eq!(game.on_roll(), Color::Black);

    let game = game.start_turn_with_dice(dice(6, 3)).unwrap();
    // White holds point 5, so Black cannot enter with the 6; only the 3 enters.
    let moves = game.legal_moves();
    assert!(moves.iter().all(|m| m.from == Source::Bar));
    assert_eq!(moves.len(), 1);
    assert_eq!(
        game.make_move(Move::between(0, 3, Color::Black, 3)),
        Err(GameError::IllegalMove(MoveError::MustEnterFromBarFirst))
    );

    let entry = Move::new(Source::Bar, Destination::Point(pt(2)), Color::Black, 3);
    let game = game.make_move(entry).unwrap();
    assert_eq!(game.board().black_bar, 0);
    // With the bar clear, the 6 is now playable from the board.
    assert_eq!(game.on_roll(), Color::Black);
    assert!(game.legal_moves().iter().all(|m| m.die == 6));
}

#[test]
fn full_bear_off_race_finishes() {
    // White needs two checkers off; Black is far behind.
    let board = Board::with_layout(&[(0, 1), (1, 1)], &[(5, 15)]);
    let game = GameState::from_position(board, Color::White, Default::default())
        .start_turn_with_dice(dice(2, 1))
        .unwrap();

    let game = game
        .make_move(Move::new(Source::Point(pt(1)), Destination::Off, Color::White, 2))
        .unwrap();
    assert_eq!(game.status(), GameStatus::Playing);

    let game = game
        .make_move(Move::new(Source::Point(pt(0)), Destination::Off, Color::White, 1))
        .unwrap();
    assert_eq!(game.status(), GameStatus::Finished);
    assert_eq!(game.winner(), Some(Color::White));

    let frozen = *game.board();
    let again = game.make_move(Move::new(Source::Point(pt(0)), Destination::Off, Color::White, 1));
    assert_eq!(again, Err(GameError::NotPlaying(GameStatus::Finished)));
    assert_eq!(*game.board(), frozen);
}

#[test]
fn move_notation_drives_a_turn() {
    let game = GameState::new()
        .start(Color::Black)
        .unwrap()
        .start_turn_with_dice(dice(6, 5))
        .unwrap();
    // Black runs a back checker: 1/7 then 7/12 in 1-based numbering.
    let game = game.make_move(Move::parse("1/7", Color::Black).unwrap()).unwrap();
    let game = game.make_move(Move::parse("7/12", Color::Black).unwrap()).unwrap();
    assert_eq!(game.board().checkers_at(pt(11), Color::Black), 6);
    assert_eq!(game.on_roll(), Color::White);
}

#[test]
fn legal_moves_never_include_blocked_targets() {
    let board = Board::initial();
    for a in 1..=6 {
        for b in 1..=6 {
            for color in Color::ALL {
                for m in &legal_moves(&board, &dice(a, b), color) {
                    if let Destination::Point(p) = m.to {
                        assert!(!board.is_blocked_for(p, color));
                    }
                }
            }
        }
    }
}
