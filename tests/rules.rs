use othello::{Board, Cell, Game, GameError, GameStatus, Player, Position, Scores, Winner};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn at(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

fn empty_cells(board: &Board) -> u8 {
    (0..8u8)
        .flat_map(|row| (0..8u8).map(move |col| at(row, col)))
        .filter(|&pos| board.cell(pos) == Cell::Empty)
        .count() as u8
}

/// Walks the eight rays one square at a time, straight off `Board::cell`.
fn naive_flips(board: &Board, mv: Position, player: Player) -> Vec<Position> {
    const STEPS: [(i8, i8); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];

    let mut out = Vec::new();
    if board.cell(mv) != Cell::Empty {
        return out;
    }
    for (dr, dc) in STEPS {
        let mut run = Vec::new();
        let (mut r, mut c) = (mv.row as i8 + dr, mv.col as i8 + dc);
        while (0..8).contains(&r) && (0..8).contains(&c) {
            let pos = at(r as u8, c as u8);
            let cell = board.cell(pos);
            if cell == (!player).cell() {
                run.push(pos);
            } else {
                if cell == player.cell() {
                    out.append(&mut run);
                }
                break;
            }
            r += dr;
            c += dc;
        }
    }
    out
}

/// Plays random legal moves until the game ends, checking invariants on the way.
fn random_playout(seed: u64) -> Game {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();

    while game.is_active() {
        let player = game.current_player();
        let moves = game.legal_moves();
        assert!(!moves.is_empty(), "active game must leave the side to move a move");
        let scanned: Vec<Position> = (0..8u8)
            .flat_map(|row| (0..8u8).map(move |col| at(row, col)))
            .filter(|&pos| !naive_flips(game.board(), pos, player).is_empty())
            .collect();
        assert_eq!(moves, scanned);
        let mv = *moves.choose(&mut rng).unwrap();

        let expected = naive_flips(game.board(), mv, player);
        let flipped = game.apply_move(mv.row, mv.col, player).unwrap();

        assert_eq!(flipped, expected);
        assert!(!game.is_legal_move(mv.row, mv.col, player));
        assert_eq!(game.board().cell(mv), player.cell());
        for pos in &flipped {
            assert_eq!(game.board().cell(*pos), player.cell());
        }

        let scores = game.scores();
        assert_eq!(scores, game.board().count());
        assert_eq!(
            scores.black as u32 + scores.white as u32 + empty_cells(game.board()) as u32,
            64
        );

        match game.advance_turn_state() {
            GameStatus::InProgress => assert_eq!(game.current_player(), !player),
            GameStatus::Passed(next) => {
                assert_eq!(next, player);
                assert_eq!(game.current_player(), player);
                assert!(!game.has_any_legal_move(!player));
            }
            GameStatus::Over(winner) => {
                assert_eq!(winner, scores.winner());
                assert!(
                    game.board().is_full()
                        || (!game.has_any_legal_move(Player::Black)
                            && !game.has_any_legal_move(Player::White))
                );
            }
        }
    }

    game
}

#[test]
fn starting_position_matches_the_canonical_layout() {
    let game = Game::new();

    for row in 0..8 {
        for col in 0..8 {
            let expected = match (row, col) {
                (3, 4) | (4, 3) => Cell::Black,
                (3, 3) | (4, 4) => Cell::White,
                _ => Cell::Empty,
            };
            assert_eq!(game.cell(row, col), Ok(expected));
        }
    }
    assert_eq!(
        game.legal_moves(),
        vec![at(2, 3), at(3, 2), at(4, 5), at(5, 4)]
    );
    assert_eq!(game.board().legal_moves(Player::White).len(), 4);
}

#[test]
fn opening_move_flips_exactly_one_disc() {
    let mut game = Game::new();

    let flipped = game.apply_move(2, 3, Player::Black).unwrap();

    assert_eq!(flipped, vec![at(3, 3)]);
    assert_eq!(game.cell(3, 3), Ok(Cell::Black));
    assert_eq!(game.scores(), Scores { black: 4, white: 1 });
}

#[test]
fn random_games_keep_every_invariant() {
    for seed in 0..40 {
        let game = random_playout(seed);

        assert!(!game.is_active());
        assert!(game.status().is_over());
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.move_log().len(), game.history().len());
        assert!(game.history().len() <= 60);
    }
}

#[test]
fn history_is_append_only() {
    let mut game = Game::new();
    game.play(2, 3).unwrap();
    let first = game.history()[0].clone();

    game.play(2, 2).unwrap();
    game.play(3, 2).unwrap();

    assert_eq!(game.history()[0], first);
    assert_eq!(
        game.move_log(),
        vec![
            "Move 1: Black at D3".to_string(),
            "Move 2: White at C3".to_string(),
            "Move 3: Black at C4".to_string(),
        ]
    );
}

#[test]
fn double_pass_position_ends_without_error() {
    let board: Board = "
        B B B B B B B B
        B B B B B B B B
        B B B B B B B B
        B B B B B B B B
        B B B B B B B .
        . . . . . . . .
        . . . . . . . W
        . . . . . . W W
    "
    .parse()
    .unwrap();

    let mut game = Game::from_board(board, Player::Black);
    // A fresh position where nobody can move is already decided.
    assert_eq!(game.status(), GameStatus::Over(Winner::Black));
    assert_eq!(game.advance_turn_state(), GameStatus::Over(Winner::Black));
    assert_eq!(
        game.apply_move(5, 0, Player::Black),
        Err(GameError::GameOver)
    );
}

#[test]
fn playing_out_of_turn_is_rejected_by_play() {
    let mut game = Game::new();

    // (2, 2) is only legal for white after black's d3, not at the start.
    assert_eq!(
        game.play(2, 2),
        Err(GameError::InvalidMove {
            row: 2,
            col: 2,
            player: Player::Black
        })
    );
    assert_eq!(game.current_player(), Player::Black);
}

/// Counts leaves of the move tree, a pass counting as one ply.
fn perft(board: Board, player: Player, depth: u32, passed: bool) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves(player);
    if moves.is_empty() {
        // Both sides passed: the game is over.
        if passed {
            return 1;
        }
        return perft(board, !player, depth - 1, true);
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut next = board;
            next.place(mv, player);
            perft(next, !player, depth - 1, false)
        })
        .sum()
}

#[test]
fn perft_matches_known_move_tree_sizes() {
    let expected = [1, 4, 12, 56, 244, 1396, 8200];

    for (depth, &leaves) in expected.iter().enumerate() {
        assert_eq!(perft(Board::new(), Player::Black, depth as u32, false), leaves);
    }
}
