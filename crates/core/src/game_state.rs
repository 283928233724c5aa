//! Game state module - the engine aggregate
//!
//! `GameState` exclusively owns the grid, the active and next pieces, the
//! score counters, the run state, the RNG, the color source and the fall
//! timer. Hosts drive it with [`GameState::advance`] and
//! [`GameState::apply_action`] and read it back through snapshots and the
//! coalesced [`Signals`].
//!
//! Every piece operation is a no-op returning `false` unless the game is
//! running. A spawn that does not fit stops the game for good; only
//! [`GameState::restart`] leaves the stopped state.

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use crate::fall::FallTimer;
use crate::fit::fits;
use crate::grid::Grid;
use crate::rng::{random_shape_index, ColorSource, SimpleRng, WarmPalette};
use crate::scoring::ScoreState;
use crate::shapes::{Catalog, Shape};
use crate::sink::{RenderSink, ScoreDisplay, ScoreSink, Signals};
use crate::snapshot::{NextSnapshot, RenderSnapshot};
use crate::types::*;

/// A shape instance with a color and a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: Rgb,
    /// Grid row of the bounding box's top edge; may be negative
    pub row: i32,
    /// Grid column of the bounding box's left edge
    pub col: i32,
}

impl Piece {
    /// Create an unplaced piece at the grid origin
    pub fn new(shape: Shape, color: Rgb) -> Self {
        Self {
            shape,
            color,
            row: 0,
            col: 0,
        }
    }

    /// Column that centers `shape` horizontally
    pub fn centered_col(shape: &Shape) -> i32 {
        (FIELD_WIDTH as i32 - shape.cols() as i32) / 2
    }

    /// Check whether the piece fits after moving by `(d_row, d_col)`
    pub fn fits(&self, grid: &Grid, d_row: i32, d_col: i32) -> bool {
        fits(grid, &self.shape, self.row + d_row, self.col + d_col)
    }

    /// Absolute `(row, col)` of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(r, c)| (self.row + r as i32, self.col + c as i32))
    }
}

/// Where and what to spawn. `None` fields use the defaults.
///
/// `shape` selects the catalog entry of the freshly generated *next* piece;
/// the piece that becomes active is always the previously generated next one.
/// An out-of-range index falls back to a random draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpawnRequest {
    pub shape: Option<usize>,
    pub row: Option<i32>,
    pub col: Option<i32>,
}

impl SpawnRequest {
    pub fn at(row: i32, col: i32) -> Self {
        Self {
            shape: None,
            row: Some(row),
            col: Some(col),
        }
    }

    pub fn with_shape(mut self, index: usize) -> Self {
        self.shape = Some(index);
        self
    }
}

/// Outcome of one [`GameState::clear_full_rows`] pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearReport {
    /// Row index of each clear, in the order they happened.
    /// The same index repeats when stacked rows were cleared.
    pub rows: ArrayVec<usize, { FIELD_HEIGHT as usize }>,
    pub points: u64,
}

impl ClearReport {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<C: ColorSource = WarmPalette> {
    grid: Grid,
    catalog: Catalog,
    active: Option<Piece>,
    next: Piece,
    score: ScoreState,
    run_state: RunState,
    started: bool,
    seed: u32,
    /// Increments on every restart.
    game_id: u32,
    rng: SimpleRng,
    colors: C,
    timer: FallTimer,
    /// Engine clock in milliseconds, moved only by `advance`.
    now_ms: u64,
    signals: Signals,
}

impl GameState<WarmPalette> {
    /// Create a new game with the given RNG seed and the default palette
    pub fn new(seed: u32) -> Self {
        Self::with_colors(seed, WarmPalette::new(seed))
    }
}

impl<C: ColorSource> GameState<C> {
    /// Create a new game drawing piece colors from `colors`
    pub fn with_colors(seed: u32, colors: C) -> Self {
        Self::with_catalog(seed, Catalog::standard(), colors)
    }

    /// Create a new game over a custom catalog
    pub fn with_catalog(seed: u32, catalog: Catalog, mut colors: C) -> Self {
        let mut rng = SimpleRng::new(seed);
        let index = random_shape_index(&mut rng, &catalog);
        let next = Piece::new(catalog.shapes()[index], colors.next_color());

        Self {
            grid: Grid::new(),
            catalog,
            active: None,
            next,
            score: ScoreState::new(),
            run_state: RunState::Running,
            started: false,
            seed,
            game_id: 0,
            rng,
            colors,
            timer: FallTimer::new(),
            now_ms: 0,
            signals: Signals::default(),
        }
    }

    /// Start the game: spawn the first piece and schedule its fall
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        info!("game {} started (seed {})", self.game_id, self.seed);

        self.signals.score = Some(ScoreDisplay::Score(self.score.score));
        self.signals.redraw = true;
        self.clear_full_rows();
        if self.spawn(SpawnRequest::default()) {
            self.fall();
        }
        true
    }

    /// Throw the current game away and start a fresh one.
    ///
    /// The RNG and color source keep going, so a new game gets new pieces.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.score.reset();
        self.active = None;
        self.next = self.make_piece(None);
        self.run_state = RunState::Running;
        self.started = false;
        self.timer.cancel();
        self.game_id = self.game_id.wrapping_add(1);
        info!("restarting as game {}", self.game_id);
        self.start();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state.is_running()
    }

    pub fn paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.run_state.is_stopped()
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn score(&self) -> u64 {
        self.score.score
    }

    pub fn rows_cleared(&self) -> u32 {
        self.score.rows_cleared
    }

    pub fn multiplier(&self) -> f64 {
        self.score.multiplier
    }

    pub fn fall_interval_ms(&self) -> f64 {
        self.score.fall_interval_ms
    }

    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for setting up positions in tests and benches
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Current engine clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// When the pending fall fires, if one is scheduled
    pub fn fall_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    /// Draw a catalog shape and a fresh color.
    fn make_piece(&mut self, requested: Option<usize>) -> Piece {
        let index = requested
            .filter(|&i| i < self.catalog.len())
            .unwrap_or_else(|| random_shape_index(&mut self.rng, &self.catalog));
        Piece::new(self.catalog.shapes()[index], self.colors.next_color())
    }

    /// Promote the next piece to active and generate a new next piece.
    ///
    /// Returns `false` if the game is not running or if the new active piece
    /// does not fit, in which case the game is over.
    pub fn spawn(&mut self, request: SpawnRequest) -> bool {
        if !self.is_running() {
            return false;
        }

        let fresh = self.make_piece(request.shape);
        let mut piece = std::mem::replace(&mut self.next, fresh);
        piece.row = request.row.unwrap_or(0);
        piece.col = request.col.unwrap_or_else(|| Piece::centered_col(&piece.shape));
        self.active = Some(piece);
        self.signals.redraw = true;

        if !piece.fits(&self.grid, 0, 0) {
            self.run_state = RunState::Stopped;
            self.timer.cancel();
            self.signals.score = Some(ScoreDisplay::GameOver {
                final_score: self.score.score,
            });
            info!(
                "game over: score {}, rows cleared {}",
                self.score.score, self.score.rows_cleared
            );
            return false;
        }

        trace!("spawned piece at ({}, {})", piece.row, piece.col);
        self.signals.redraw_next = true;
        true
    }

    /// Rotate the active piece clockwise in place; no wall kicks
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let rotated = active.shape.rotated_cw();
        if !fits(&self.grid, &rotated, active.row, active.col) {
            return false;
        }
        active.shape = rotated;
        self.signals.redraw = true;
        true
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, d_row: i32, d_col: i32) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        if !active.fits(&self.grid, d_row, d_col) {
            return false;
        }
        active.row += d_row;
        active.col += d_col;
        self.signals.redraw = true;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(0, 1)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Merge the active piece into the grid and drop it.
    ///
    /// Returns how many cells were written; cells above the top row are lost.
    pub fn lock(&mut self) -> usize {
        let Some(piece) = self.active.take() else {
            return 0;
        };
        self.signals.redraw = true;
        self.grid
            .lock_cells(piece.shape.filled_cells(), piece.row, piece.col, piece.color)
    }

    /// Remove every full row and score it.
    ///
    /// Rows are scanned bottom to top, hidden rows included. Each clear
    /// advances the top of the compaction window by one, moves the rows
    /// above the cleared one down inside that window and empties the
    /// window's top row. The same index is checked again after a shift.
    pub fn clear_full_rows(&mut self) -> ClearReport {
        let mut report = ClearReport::default();
        let mut batch = 0u32;
        let mut window_top = 0usize;
        let mut row = FIELD_HEIGHT as usize - 1;

        while row >= window_top {
            if !self.grid.is_row_full(row) {
                if row == 0 {
                    break;
                }
                row -= 1;
                continue;
            }

            batch += 1;
            window_top += 1;
            self.grid.shift_down_into(row, window_top.min(row));
            report.rows.push(row);
            report.points += self.score.record_row(batch);
            debug!(
                "cleared row {}: multiplier {:.3}, fall interval {:.1}ms",
                row, self.score.multiplier, self.score.fall_interval_ms
            );
        }

        if !report.is_empty() {
            self.signals.redraw = true;
            self.signals.score = Some(ScoreDisplay::Score(self.score.score));
        }
        report
    }

    /// Schedule the next automatic move-down after the current interval
    pub fn fall(&mut self) {
        if !self.is_running() {
            return;
        }
        self.timer
            .schedule(self.now_ms, self.score.fall_interval_whole_ms());
    }

    /// One gravity step.
    ///
    /// Moves the active piece down and reschedules. A piece that cannot move
    /// locks, earns the lock bonus, full rows are cleared and the next piece
    /// spawns. Returns `true` if the piece moved.
    pub fn fall_step(&mut self) -> bool {
        if !self.is_running() || self.active.is_none() {
            return false;
        }
        if self.move_down() {
            self.fall();
            return true;
        }

        self.lock();
        self.score.record_lock();
        self.signals.score = Some(ScoreDisplay::Score(self.score.score));

        self.clear_full_rows();
        if self.spawn(SpawnRequest::default()) {
            self.fall();
        }
        false
    }

    /// Move the engine clock forward and fire every fall that became due.
    ///
    /// Each firing reschedules relative to its own deadline, so a long step
    /// replays the same falls a fine-grained clock would have.
    /// Returns how many falls fired.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let target = self.now_ms.saturating_add(elapsed_ms as u64);
        let mut fired = 0;

        while let Some(deadline) = self.timer.take_due(target) {
            self.now_ms = deadline;
            self.fall_step();
            fired += 1;
        }

        self.now_ms = target;
        fired
    }

    /// Pause a running game, cancelling the pending fall.
    ///
    /// Refused before `start`; there is nothing to pause yet.
    pub fn pause(&mut self) -> bool {
        if !self.started || !self.is_running() {
            return false;
        }
        self.run_state = RunState::Paused;
        self.timer.cancel();
        self.signals.redraw = true;
        true
    }

    /// Resume a paused game.
    ///
    /// A gravity step runs immediately and the interval restarts from full
    /// length; time spent before the pause is not carried over.
    pub fn resume(&mut self) -> bool {
        if self.run_state != RunState::Paused {
            return false;
        }
        self.run_state = RunState::Running;
        self.signals.redraw = true;
        self.fall_step();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Stopped => false,
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Rotate => self.rotate(),
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.move_down(),
            GameAction::Pause => self.toggle_pause(),
        }
    }

    /// Take and clear pending output requests.
    pub fn take_signals(&mut self) -> Signals {
        std::mem::take(&mut self.signals)
    }

    /// Drain pending signals into the sinks.
    ///
    /// Renders at most once no matter how many redraws were requested.
    pub fn flush_to<R, S>(&mut self, render: &mut R, score: &mut S)
    where
        R: RenderSink + ?Sized,
        S: ScoreSink + ?Sized,
    {
        let signals = self.take_signals();
        if signals.needs_render() {
            render.render(&self.snapshot());
        }
        if let Some(display) = signals.score {
            score.show_score(&display.to_string());
        }
    }

    /// [`flush_to`](Self::flush_to) for a frontend that is both sinks.
    pub fn flush_into<F>(&mut self, frontend: &mut F)
    where
        F: RenderSink + ScoreSink + ?Sized,
    {
        let signals = self.take_signals();
        if signals.needs_render() {
            frontend.render(&self.snapshot());
        }
        if let Some(display) = signals.score {
            frontend.show_score(&display.to_string());
        }
    }

    pub fn snapshot_into(&self, out: &mut RenderSnapshot) {
        for (dst, src) in out.field.iter_mut().zip(self.grid.visible_rows()) {
            dst.copy_from_slice(src);
        }

        if let Some(piece) = self.active {
            for (row, col) in piece.cells() {
                let visible = row - HIDDEN_ROWS as i32;
                if visible < 0 || col < 0 || col >= FIELD_WIDTH as i32 {
                    continue;
                }
                if let Some(line) = out.field.get_mut(visible as usize) {
                    line[col as usize] = Some(piece.color);
                }
            }
        }

        out.next = Some(NextSnapshot {
            shape: self.next.shape,
            color: self.next.color,
        });
        out.score = self.score.score;
        out.rows_cleared = self.score.rows_cleared;
        out.multiplier = self.score.multiplier;
        out.fall_interval_ms = self.score.fall_interval_ms;
        out.run_state = self.run_state;
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let mut s = RenderSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<WarmPalette> {
    fn default() -> Self {
        Self::new(1)
    }
}
