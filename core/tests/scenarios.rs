use mineclear_core::*;

fn safe_start_board(seed: u64, start: Coord2) -> Board {
    Board::with_generator(
        GameConfig::default(),
        RandomLayoutGenerator::with_start(seed, start, StartTile::AlwaysZero),
    )
    .unwrap()
}

#[test]
fn corner_start_cascades_through_its_neighborhood() {
    for seed in 0..32 {
        let mut board = safe_start_board(seed, (0, 0));

        let outcome = board.reveal((0, 0)).unwrap();

        assert!(matches!(outcome, RevealOutcome::Continue | RevealOutcome::Won));
        for pos in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert_eq!(board.cell_state(pos), Ok(CellState::Revealed));
        }
        assert!(board.revealed_count() >= 4);
    }
}

#[test]
fn corner_reveal_opens_mine_free_three_by_three_block() {
    // 15 mines, none in rows 0..=2 x cols 0..=2
    let mines: Vec<Coord2> = (5..10).flat_map(|row| (5..8).map(move |col| (row, col))).collect();
    let layout = MineLayout::from_mine_coords((10, 10), &mines).unwrap();
    assert_eq!(layout.mine_count(), 15);
    let mut board = Board::from_layout(layout);

    // the mine block encloses no safe cell, so one cascade clears the board
    assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Won);

    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(board.cell_state((row, col)), Ok(CellState::Revealed));
        }
    }
    assert_eq!(board.revealed_count(), 85);
}

#[test]
fn interior_start_cascades_through_all_nine_cells() {
    for seed in 0..32 {
        let mut board = safe_start_board(seed, (1, 1));

        board.reveal((1, 1)).unwrap();

        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(board.cell_state((row, col)), Ok(CellState::Revealed));
            }
        }
        assert!(board.revealed_count() >= 9);
    }
}

#[test]
fn flagged_cell_must_be_unflagged_before_reveal() {
    let layout = MineLayout::from_mine_coords((10, 10), &[(1, 1), (5, 5)]).unwrap();
    let mut board = Board::from_layout(layout);

    board.toggle_flag((0, 0)).unwrap();
    assert_eq!(board.reveal((0, 0)), Err(GameError::CellFlagged));
    assert_eq!(board.cell_state((0, 0)), Ok(CellState::Flagged));
    assert_eq!(board.state(), GameState::Active);
    assert_eq!(board.revealed_count(), 0);

    board.toggle_flag((0, 0)).unwrap();
    assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Continue);
    assert_eq!(board.cell_state((0, 0)), Ok(CellState::Revealed));
}

#[test]
fn corner_adjacency_only_counts_in_grid_neighbors() {
    // all three corner neighbors are mines, nothing else is
    let layout = MineLayout::from_mine_coords((10, 10), &[(0, 1), (1, 0), (1, 1)]).unwrap();

    assert_eq!(layout.adjacent_mine_count((0, 0)), 3);
    assert_eq!(layout.adjacent_mine_count((0, 2)), 2);
    assert_eq!(layout.adjacent_mine_count((9, 9)), 0);
}

#[test]
fn flood_fill_keeps_player_flags() {
    let layout = MineLayout::from_mine_coords((10, 10), &[(9, 9)]).unwrap();
    let mut board = Board::from_layout(layout);
    board.toggle_flag((4, 4)).unwrap();

    assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Continue);
    assert_eq!(board.cell_state((4, 4)), Ok(CellState::Flagged));
    assert_eq!(board.revealed_count(), 98);

    board.toggle_flag((4, 4)).unwrap();
    assert_eq!(board.reveal((4, 4)).unwrap(), RevealOutcome::Won);
    assert_eq!(board.state(), GameState::Won);
}

#[test]
fn full_game_from_seed_can_be_played_to_a_win() {
    let mut board = safe_start_board(2024, (5, 5));
    board.reveal((5, 5)).unwrap();
    let mut drawn = board.take_changes().len();

    for index in 0..mult(10, 10) {
        if board.is_finished() {
            break;
        }
        let coords = board.mine_layout().coords_of(index).unwrap();
        if !board.mine_layout().contains_mine(coords) {
            board.reveal_index(index).unwrap();
            drawn += board.take_changes().len();
        }
    }

    assert_eq!(board.state(), GameState::Won);
    assert_eq!(drawn, 85);
    assert_eq!(board.toggle_flag((0, 0)), Err(GameError::GameAlreadyOver));
    assert_eq!(board.reveal((5, 5)), Err(GameError::GameAlreadyOver));
}

#[test]
fn restart_replaces_a_lost_board() {
    let mut board = Board::new(GameConfig::default(), 99).unwrap();
    let mine = board.mine_layout().iter_mines().next().unwrap();
    assert_eq!(board.reveal(mine).unwrap(), RevealOutcome::MineHit);

    let board = board.restart(100).unwrap();

    assert_eq!(board.state(), GameState::Active);
    let view = BoardView::from_board(&board);
    assert!(view.cells.iter().all(|&cell| cell == CellView::Hidden));
    assert_eq!(view.mines_left, 15);
}
