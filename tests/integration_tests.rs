//! Integration tests for the game engine driven like a host would

use blockfall::core::{
    ColorCycle, FixedColor, GameState, RenderSink, RenderSnapshot, ScoreSink, SpawnRequest,
};
use blockfall::types::{GameAction, Rgb, RunState, FIELD_WIDTH};

const RED: Rgb = Rgb::new(230, 30, 0);
const GREY: Rgb = Rgb::new(100, 100, 100);

fn game() -> GameState<FixedColor> {
    GameState::with_colors(2024, FixedColor(RED))
}

#[derive(Default)]
struct Host {
    frames: usize,
    last: Option<RenderSnapshot>,
    scores: Vec<String>,
}

impl RenderSink for Host {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        self.frames += 1;
        self.last = Some(*snapshot);
    }
}

impl ScoreSink for Host {
    fn show_score(&mut self, text: &str) {
        self.scores.push(text.to_string());
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = game();
    assert!(!state.started());

    state.start();
    assert!(state.started());
    assert!(state.active().is_some());
    assert_eq!(state.run_state(), RunState::Running);
}

#[test]
fn test_default_spawn_is_centered_and_fits() {
    let mut state = game();
    state.start();
    for _ in 0..20 {
        let piece = state.active().unwrap();
        let width = piece.shape.cols() as i32;
        assert_eq!(piece.row, 0);
        assert_eq!(piece.col, (FIELD_WIDTH as i32 - width) / 2);
        assert!(piece.fits(state.grid(), 0, 0));
        state.lock();
        state.grid_mut().clear();
        assert!(state.spawn(SpawnRequest::default()));
    }
}

#[test]
fn test_move_left_at_wall_keeps_column() {
    let mut state = game();
    state.start();
    state.spawn(SpawnRequest::at(4, 0));
    let col = state.active().unwrap().col;
    assert_eq!(col, 0);

    // The left edge of a box may be padding; walk until blocked.
    while state.move_left() {}
    let col = state.active().unwrap().col;
    assert!(!state.move_left());
    assert_eq!(state.active().unwrap().col, col);
}

#[test]
fn test_landed_piece_locks_on_next_tick() {
    let mut state = game();
    state.start();
    while state.move_down() {}
    assert!(!state.move_down());

    let landed = state.active().unwrap();
    let next = state.next_piece();
    let before = state.grid().occupied_count();

    let deadline = state.fall_deadline().unwrap();
    state.advance((deadline - state.now_ms()) as u32);

    assert_eq!(
        state.grid().occupied_count(),
        before + landed.shape.filled_count()
    );
    let active = state.active().unwrap();
    assert_eq!(active.shape, next.shape);
    assert_eq!(active.row, 0);
}

#[test]
fn test_gravity_alone_eventually_ends_the_game() {
    let mut state = GameState::with_colors(9, ColorCycle::new(vec![RED, GREY]));
    state.start();

    let mut last_score = 0;
    let mut last_rows = 0;
    let mut last_interval = state.fall_interval_ms();
    let mut steps = 0;
    while !state.game_over() {
        state.advance(250);
        assert!(state.score() >= last_score);
        assert!(state.rows_cleared() >= last_rows);
        assert!(state.fall_interval_ms() <= last_interval);
        last_score = state.score();
        last_rows = state.rows_cleared();
        last_interval = state.fall_interval_ms();
        steps += 1;
        assert!(steps < 100_000, "game never ended");
    }
    assert!(state.score() > 0, "every lock scores at least one point");
    assert!(state.fall_deadline().is_none());
}

#[test]
fn test_two_row_clear_beats_two_single_clears() {
    let mut together = game();
    together.grid_mut().fill_row(21, GREY);
    together.grid_mut().fill_row(20, GREY);
    let both = together.clear_full_rows();
    assert_eq!(both.count(), 2);

    let mut apart = game();
    apart.grid_mut().fill_row(21, GREY);
    let first = apart.clear_full_rows();
    apart.grid_mut().fill_row(21, GREY);
    let second = apart.clear_full_rows();

    assert_eq!(together.rows_cleared(), apart.rows_cleared());
    assert!(both.points > first.points + second.points);
    assert!(together.score() > apart.score());
}

#[test]
fn test_single_row_clear_scenario() {
    let mut state = game();
    state.grid_mut().fill_row(21, GREY);
    state.grid_mut().set(5, 7, Some(RED));

    let report = state.clear_full_rows();
    assert_eq!(report.count(), 1);
    assert_eq!(state.rows_cleared(), 1);
    assert_eq!(state.multiplier(), 1.0);
    assert_eq!(state.fall_interval_ms(), 1000.0);
    assert_eq!(state.grid().get(6, 7), Some(Some(RED)));
    assert!(state.grid().row(1).unwrap().iter().all(|c| c.is_none()));

    // Nothing left to clear.
    let score = state.score();
    assert!(state.clear_full_rows().is_empty());
    assert_eq!(state.score(), score);
}

#[test]
fn test_completing_a_row_with_a_piece() {
    let mut state = game();
    state.start();
    // Leave a two-wide gap where an O piece lands at the default column.
    for col in 0..FIELD_WIDTH as i32 {
        if col != 5 && col != 6 {
            state.grid_mut().set(21, col, Some(GREY));
            state.grid_mut().set(20, col, Some(GREY));
        }
    }

    // Make sure an O piece (catalog index 1) becomes active.
    state.spawn(SpawnRequest::default().with_shape(1));
    state.spawn(SpawnRequest::default());
    assert_eq!(state.active().unwrap().col, 5);

    while state.move_down() {}
    state.fall_step();

    assert_eq!(state.rows_cleared(), 2);
    assert_eq!(state.grid().occupied_count(), 0);
    // lock bonus 1, then 12 + 48 for the two rows
    assert_eq!(state.score(), 61);
}

#[test]
fn test_pause_freezes_gravity() {
    let mut state = game();
    state.start();
    let row = state.active().unwrap().row;

    assert!(state.apply_action(GameAction::Pause));
    state.advance(10_000);
    assert_eq!(state.active().unwrap().row, row);
    assert!(!state.apply_action(GameAction::MoveLeft));

    assert!(state.apply_action(GameAction::Pause));
    assert_eq!(state.active().unwrap().row, row + 1);
}

#[test]
fn test_game_over_message_reaches_score_sink() {
    let mut state = game();
    state.start();
    state.grid_mut().fill_row(21, GREY);
    state.clear_full_rows();
    for row in 0..3 {
        state.grid_mut().fill_row(row, GREY);
        state.grid_mut().set(row as i32, 0, None);
    }
    assert!(!state.spawn(SpawnRequest::default()));

    let mut host = Host::default();
    state.flush_into(&mut host);
    assert_eq!(host.scores.last().map(String::as_str), Some("GAME OVER. score: 12"));
    assert_eq!(host.last.unwrap().run_state, RunState::Stopped);

    // Terminal: nothing moves any more.
    assert!(!state.apply_action(GameAction::Pause));
    assert!(!state.apply_action(GameAction::Rotate));
    assert_eq!(state.advance(60_000), 0);
}

#[test]
fn test_restart_after_game_over() {
    let mut state = game();
    state.start();
    for row in 0..4 {
        state.grid_mut().fill_row(row, GREY);
        state.grid_mut().set(row as i32, 11, None);
    }
    state.spawn(SpawnRequest::default());
    assert!(state.game_over());

    state.restart();
    assert!(state.is_running());
    assert_eq!(state.score(), 0);
    assert_eq!(state.grid().occupied_count(), 0);

    let mut host = Host::default();
    state.flush_into(&mut host);
    assert_eq!(host.scores, vec!["0".to_string()]);
    assert_eq!(host.frames, 1);
}

#[test]
fn test_many_moves_render_once() {
    let mut state = game();
    state.start();
    let mut host = Host::default();
    state.flush_into(&mut host);
    assert_eq!(host.frames, 1);

    for _ in 0..5 {
        state.apply_action(GameAction::MoveLeft);
        state.apply_action(GameAction::MoveRight);
    }
    state.flush_into(&mut host);
    assert_eq!(host.frames, 2);
    assert_eq!(host.scores.len(), 1);
}
