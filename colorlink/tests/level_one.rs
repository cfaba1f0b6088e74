// Playthroughs of the tutorial level on a fixed 1600x1600 layout

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use colorlink_engine::{
    ColorId, GameBoard, GameSettings, InputSample, Layout, PathOutcome, Point, Rejection, Tile, TileRole,
};

const RED: ColorId = ColorId(0);
const BLUE: ColorId = ColorId(1);
const YELLOW: ColorId = ColorId(2);

fn known_layout() -> Layout {
    let tile = |id, x, y, color, label: &str, pair, role| Tile::new(id, Point::new(x, y), color, label, pair, role);
    Layout {
        tiles: vec![
            tile(0, 400.0, 400.0, RED, "Book", 0, TileRole::Word),
            tile(1, 1200.0, 400.0, RED, "Novel", 0, TileRole::Meaning),
            tile(2, 800.0, 800.0, BLUE, "Pen", 1, TileRole::Word),
            tile(3, 400.0, 1200.0, BLUE, "Writing tool", 1, TileRole::Meaning),
            tile(4, 1200.0, 800.0, YELLOW, "School", 2, TileRole::Word),
            tile(5, 1200.0, 1200.0, YELLOW, "Educational institution", 2, TileRole::Meaning),
        ],
        tile_width: 310.0,
        tile_height: 190.0,
        attempts: 1,
    }
}

fn tutorial_board() -> GameBoard {
    let mut board = GameBoard::with_seed(GameSettings::default(), 42);
    board.set_board_size(1600.0, 1600.0).unwrap();
    board.setup_level_with_layout(1, known_layout()).unwrap();
    board
}

fn pt(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Begin on `start`, move through `path`, release on its last point
fn drag(board: &mut GameBoard, start: Point, path: &[Point]) -> PathOutcome {
    board.begin_path(start);
    for point in path {
        board.extend_path(*point);
    }
    board.end_path(*path.last().unwrap_or(&start))
}

fn connect_red(board: &mut GameBoard) -> PathOutcome {
    drag(
        board,
        pt(400.0, 400.0),
        &[pt(500.0, 400.0), pt(700.0, 400.0), pt(900.0, 400.0), pt(1100.0, 400.0), pt(1200.0, 400.0)],
    )
}

fn connect_blue(board: &mut GameBoard) -> PathOutcome {
    drag(
        board,
        pt(800.0, 800.0),
        &[pt(700.0, 900.0), pt(600.0, 1000.0), pt(500.0, 1100.0), pt(400.0, 1200.0)],
    )
}

fn connect_yellow(board: &mut GameBoard) -> PathOutcome {
    drag(
        board,
        pt(1200.0, 800.0),
        &[pt(1200.0, 900.0), pt(1200.0, 1000.0), pt(1200.0, 1100.0), pt(1200.0, 1200.0)],
    )
}

#[test]
fn mismatched_colors_do_not_connect() {
    let mut board = tutorial_board();
    let outcome = drag(&mut board, pt(400.0, 400.0), &[pt(400.0, 800.0), pt(400.0, 1200.0)]);
    assert_eq!(outcome, PathOutcome::Rejected(Rejection::ColorMismatch));
    assert!(board.tiles().iter().all(|tile| !tile.connected));
    assert!(board.committed_paths().next().is_none());
}

#[test]
fn straight_path_connects_pair() {
    let mut board = tutorial_board();
    assert_eq!(connect_red(&mut board), PathOutcome::Connected { color: RED, level_complete: false });
    assert!(board.tile(0).unwrap().connected);
    assert!(board.tile(1).unwrap().connected);
    assert!(!board.is_complete());

    let path = board.committed_path(RED).unwrap();
    assert_eq!((path.start, path.end), (0, 1));
    assert_eq!(path.points.len(), 7);
}

#[test]
fn path_through_unconnected_tile_is_rejected() {
    let mut board = tutorial_board();
    let outcome = drag(
        &mut board,
        pt(400.0, 400.0),
        &[pt(600.0, 600.0), pt(800.0, 800.0), pt(1000.0, 600.0), pt(1200.0, 400.0)],
    );
    assert_eq!(outcome, PathOutcome::Rejected(Rejection::PassesThroughTile(2)));
    assert!(!board.tile(0).unwrap().connected);
}

#[test]
fn connected_tiles_cannot_start_paths() {
    let mut board = tutorial_board();
    connect_red(&mut board);
    assert_eq!(board.begin_path(pt(1200.0, 400.0)), None);
    assert_eq!(board.begin_path(pt(400.0, 400.0)), None);
    assert_eq!(board.end_path(pt(1200.0, 400.0)), PathOutcome::Idle);
    assert_eq!(board.committed_paths().count(), 1);
}

#[test]
fn solving_every_pair_completes_once() {
    let mut board = tutorial_board();
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completions);
    board.set_level_complete_callback(move |level| {
        assert_eq!(level, 1);
        counter.fetch_add(1, Ordering::SeqCst);
    });

    connect_red(&mut board);
    assert_eq!(connect_blue(&mut board), PathOutcome::Connected { color: BLUE, level_complete: false });
    assert_eq!(connect_yellow(&mut board), PathOutcome::Connected { color: YELLOW, level_complete: true });
    assert!(board.is_complete());
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    let colors: Vec<_> = board.committed_paths().map(|path| path.color).collect();
    assert_eq!(colors, vec![RED, BLUE, YELLOW]);

    // input after completion changes nothing
    let before = board.snapshot();
    for sample in InputSample::stroke(&[pt(400.0, 400.0), pt(800.0, 400.0), pt(1200.0, 400.0)], 16) {
        assert_eq!(board.handle_input(&sample), None);
    }
    assert_eq!(board.begin_path(pt(400.0, 400.0)), None);
    assert_eq!(board.snapshot(), before);
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[test]
fn completion_does_not_depend_on_order() {
    let mut board = tutorial_board();
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completions);
    board.set_level_complete_callback(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(matches!(connect_yellow(&mut board), PathOutcome::Connected { level_complete: false, .. }));
    assert!(matches!(connect_blue(&mut board), PathOutcome::Connected { level_complete: false, .. }));
    assert_eq!(connect_red(&mut board), PathOutcome::Connected { color: RED, level_complete: true });
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[test]
fn recorded_strokes_solve_the_level() {
    let mut board = tutorial_board();
    let strokes = [
        vec![pt(400.0, 400.0), pt(700.0, 400.0), pt(1200.0, 400.0)],
        vec![pt(800.0, 800.0), pt(600.0, 1000.0), pt(400.0, 1200.0)],
        vec![pt(1200.0, 800.0), pt(1200.0, 1000.0), pt(1200.0, 1200.0)],
    ];
    let outcomes: Vec<_> = strokes
        .iter()
        .flat_map(|points| InputSample::stroke(points, 16))
        .filter_map(|sample| board.handle_input(&sample))
        .collect();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[2], PathOutcome::Connected { color: YELLOW, level_complete: true });
}

#[test]
fn cancel_sample_drops_candidate() {
    let mut board = tutorial_board();
    let mut samples = InputSample::stroke(&[pt(400.0, 400.0), pt(800.0, 400.0), pt(1200.0, 400.0)], 16);
    let end = samples.pop().unwrap();
    samples.push(InputSample::new(colorlink_engine::InputPhase::Cancel, end.point(), end.timestamp_ms));
    for sample in &samples {
        assert_eq!(board.handle_input(sample), None);
    }
    assert!(board.candidate().is_none());
    assert!(board.tiles().iter().all(|tile| !tile.connected));
}

/// Sorted (color, label, pair) triples: what a reset must never reshuffle
fn pairings(tiles: &[Tile]) -> Vec<(ColorId, String, usize)> {
    let mut pairs: Vec<_> = tiles
        .iter()
        .map(|tile| (tile.color, tile.label.clone(), tile.pair_index))
        .collect();
    pairs.sort();
    pairs
}

#[test]
fn reset_clears_progress() {
    let mut board = tutorial_board();
    let before = pairings(board.tiles());
    connect_red(&mut board);
    board.begin_path(pt(800.0, 800.0));
    board.extend_path(pt(700.0, 900.0));

    board.reset_level().unwrap();
    let first = board.snapshot();
    assert_eq!(first.level, 1);
    assert_eq!(first.tiles.len(), 6);
    assert!(first.tiles.iter().all(|tile| !tile.connected));
    assert!(first.committed.is_empty());
    assert!(first.candidate.is_none());
    assert!(!first.complete);
    assert_eq!(pairings(&first.tiles), before);

    board.reset_level().unwrap();
    let second = board.snapshot();
    assert_eq!(second.level, first.level);
    assert_eq!(pairings(&second.tiles), pairings(&first.tiles));
    assert!(second.tiles.iter().all(|tile| !tile.connected));
    assert!(second.committed.is_empty() && second.candidate.is_none() && !second.complete);
}

#[test]
fn reset_keeps_generated_pairings() {
    let mut board = GameBoard::with_seed(GameSettings::default(), 21);
    board.set_board_size(1080.0, 1920.0).unwrap();
    board.setup_level(37).unwrap();
    let initial = pairings(board.tiles());
    assert_eq!(initial.len(), board.config().tile_count());

    board.reset_level().unwrap();
    let first = pairings(board.tiles());
    board.reset_level().unwrap();
    let second = pairings(board.tiles());

    assert_eq!(first, initial);
    assert_eq!(second, first);
    assert_eq!(board.level(), 37);
    for (index, pair) in board.config().pairs.iter().enumerate() {
        assert!(second.contains(&(pair.color, pair.word.clone(), index)));
        assert!(second.contains(&(pair.color, pair.meaning.clone(), index)));
    }
}

#[test]
fn generated_tutorial_layout_plays() {
    let mut board = GameBoard::with_seed(GameSettings::default(), 5);
    board.setup_level(1).unwrap();
    board.set_board_size(1600.0, 1600.0).unwrap();

    for label in ["Book", "Novel", "Pen", "Writing tool", "School", "Educational institution"] {
        assert!(board.tile_by_label(label).is_some(), "missing tile {label}");
    }
    let book = board.tile_by_label("book").unwrap().clone();
    let novel = board.tile_by_label("Novel").unwrap().clone();
    let writing_tool = board.tile_by_label("Writing tool").unwrap().clone();

    // a single sample leaves no interior points, so only color and end tile matter
    let outcome = drag(&mut board, book.center, &[writing_tool.center]);
    assert_eq!(outcome, PathOutcome::Rejected(Rejection::ColorMismatch));

    let outcome = drag(&mut board, book.center, &[novel.center]);
    assert_eq!(outcome, PathOutcome::Connected { color: RED, level_complete: false });
    assert!(board.tile(book.id).unwrap().connected);
    assert!(board.tile(novel.id).unwrap().connected);
    assert!(!board.tile(writing_tool.id).unwrap().connected);
}

#[test]
fn setup_before_size_is_deferred() {
    let mut board = GameBoard::with_seed(GameSettings::default(), 8);
    board.setup_level(5).unwrap();
    assert_eq!(board.level(), 5);
    assert!(board.is_layout_pending());
    assert_eq!(board.begin_path(pt(100.0, 100.0)), None);

    board.set_board_size(1080.0, 1920.0).unwrap();
    assert!(!board.is_layout_pending());
    assert_eq!(board.tiles().len(), board.config().tile_count());
}
