//! End-to-end board scenarios and invariants under random play.

use blockfall_engine::{
    BOARD_HEIGHT, BOARD_WIDTH, Board, DropOutcome, FillValue, Piece, PieceCollisionError,
    PieceKind, PieceSeed, Point,
};
use proptest::prelude::*;

fn seeded_board() -> Board {
    Board::with_seed(PieceSeed::from_bytes([0x5a; 16]))
}

fn fill(value: u8) -> FillValue {
    FillValue::new(value).unwrap()
}

#[test]
fn line_piece_quick_drops_to_the_bottom() {
    let mut board = seeded_board();
    board.set_piece_unchecked(Piece::new(PieceKind::Line, fill(8), Point::new(4, 0)));

    let cleared = board.quick_drop_piece();

    assert_eq!(cleared, 0);
    assert_eq!(board.level(), 0);
    assert_eq!(board.cleared_rows(), 0);
    // the vertical line sits in column 5 and its lowest cell is in row 19
    let column: Vec<_> = (0..20).map(|y| board.grid().cell(5, y)).collect();
    assert_eq!(column[19], Some(8));
    assert_eq!(column[16], Some(8));
    assert_eq!(column[15], Some(0));
    assert_eq!(board.grid().occupied_cells(), 4);
}

#[test]
fn completing_a_row_clears_it() {
    let mut board = seeded_board();
    for x in 0..BOARD_WIDTH {
        if x != 5 {
            board.grid_mut().set_cell(x, BOARD_HEIGHT - 1, 1);
        }
    }
    board.set_piece_unchecked(Piece::new(PieceKind::Line, fill(8), Point::new(4, 0)));

    let cleared = board.quick_drop_piece();

    assert_eq!(cleared, 1);
    assert_eq!(board.cleared_rows(), 1);
    assert_eq!(board.level(), 0);
    assert!(board.filled_row_indices().is_empty());
    // the three upper cells of the line shifted down by one row
    for y in 17..20 {
        assert_eq!(board.grid().cell(5, y), Some(8));
    }
    assert_eq!(board.grid().occupied_cells(), 3);
}

#[test]
fn level_rises_after_ten_rows() {
    let mut board = seeded_board();
    for _ in 0..9 {
        for x in 0..BOARD_WIDTH {
            board.grid_mut().set_cell(x, BOARD_HEIGHT - 1, 1);
        }
        board.clear_filled_rows();
    }
    assert_eq!(board.cleared_rows(), 9);
    assert_eq!(board.level(), 0);

    for x in 0..BOARD_WIDTH {
        board.grid_mut().set_cell(x, 0, 1);
    }
    board.clear_filled_rows();
    assert_eq!(board.level(), 1);
}

#[test]
fn spawn_onto_filled_cells_keeps_grid_intact() {
    let mut board = seeded_board();
    for y in 0..3 {
        for x in 3..7 {
            board.grid_mut().set_cell(x, y, 4);
        }
    }
    let before = board.grid().clone();

    assert_eq!(board.spawn_piece(), Err(PieceCollisionError));
    assert_eq!(board.grid(), &before);

    board.reset();
    assert_eq!(board.grid().occupied_cells(), 0);
    assert!(board.spawn_piece().is_ok());
}

#[test]
fn clearing_separated_rows_shifts_each_block_by_rows_below_it() {
    let mut board = seeded_board();
    for y in [5, 8, 19] {
        for x in 0..BOARD_WIDTH {
            board.grid_mut().set_cell(x, y, 1);
        }
    }
    board.grid_mut().set_cell(0, 4, 2);
    board.grid_mut().set_cell(1, 7, 3);
    board.grid_mut().set_cell(2, 18, 4);

    assert_eq!(board.filled_row_indices(), vec![5, 8, 19]);
    assert_eq!(board.clear_filled_rows(), 3);

    assert_eq!(board.cleared_rows(), 3);
    assert_eq!(board.grid().cell(0, 7), Some(2));
    assert_eq!(board.grid().cell(1, 9), Some(3));
    assert_eq!(board.grid().cell(2, 19), Some(4));
    assert_eq!(board.grid().occupied_cells(), 3);
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Left,
    Right,
    RotateLeft,
    RotateRight,
    Drop,
    QuickDrop,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Left),
        Just(Action::Right),
        Just(Action::RotateLeft),
        Just(Action::RotateRight),
        Just(Action::Drop),
        Just(Action::QuickDrop),
    ]
}

fn apply(board: &mut Board, action: Action) -> Option<DropOutcome> {
    let before = *board.piece();
    let result = match action {
        Action::Left => board.move_piece_left(),
        Action::Right => board.move_piece_right(),
        Action::RotateLeft => board.rotate_piece_left(),
        Action::RotateRight => board.rotate_piece_right(),
        Action::Drop => return Some(board.drop_piece()),
        Action::QuickDrop => {
            let cleared_rows = board.quick_drop_piece();
            return Some(DropOutcome::Landed { cleared_rows });
        }
    };
    if result.is_err() {
        assert_eq!(*board.piece(), before, "rejected {action:?} changed the piece");
    }
    None
}

proptest! {
    #[test]
    fn random_play_keeps_board_consistent(
        seed in any::<[u8; 16]>(),
        actions in prop::collection::vec(arb_action(), 1..300),
    ) {
        let mut board = Board::with_seed(PieceSeed::from_bytes(seed));
        let mut fill_values = vec![board.piece().fill_value().get()];

        for action in actions {
            let grid_before = board.grid().clone();
            let cleared_before = board.cleared_rows();
            let can_fall = !board.grid().overlaps(&board.piece().moved(0, 1).shape());

            match apply(&mut board, action) {
                Some(DropOutcome::Falling) => {
                    prop_assert!(can_fall);
                    prop_assert_eq!(board.grid(), &grid_before);
                }
                Some(DropOutcome::Landed { cleared_rows }) => {
                    if matches!(action, Action::Drop) {
                        prop_assert!(!can_fall);
                    }
                    prop_assert_eq!(board.cleared_rows(), cleared_before + cleared_rows);
                    prop_assert!(board.filled_row_indices().is_empty());
                    if board.spawn_piece().is_err() {
                        board.reset();
                    }
                    fill_values.push(board.piece().fill_value().get());
                }
                None => {
                    prop_assert_eq!(board.grid(), &grid_before);
                }
            }

            // the active piece never overlaps the grid while falling
            prop_assert!(!board.grid().overlaps(&board.piece().shape()));
            prop_assert!(board.piece().rotation_index() < board.piece().kind().rotation_count());
            for row in board.grid().rows() {
                for &cell in row {
                    prop_assert!(cell == 0 || fill_values.contains(&cell));
                }
            }
            prop_assert_eq!(board.level(), board.cleared_rows() / 10);
        }
    }
}
