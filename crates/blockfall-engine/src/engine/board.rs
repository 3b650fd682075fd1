use arrayvec::ArrayVec;

use crate::core::{
    COLUMNS, ROWS,
    piece::{Piece, PiecePosition, displace},
    shape::ShapeKind,
    shape_source::{RandomShapes, ShapeSeed, ShapeSource},
};

use super::{
    command::{CommandOutcome, GameCommand},
    snapshot::BoardSnapshot,
};

type Grid = [[u8; COLUMNS]; ROWS];

const EMPTY_ROW: [u8; COLUMNS] = [0; COLUMNS];

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const ROWS_I32: i32 = ROWS as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const COLUMNS_I32: i32 = COLUMNS as i32;

/// Which matrix a collision test looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Geometry {
    /// The piece as it is.
    Current,
    /// The piece after its next rotation, with the next rotation's offset.
    Rotated,
}

/// The playing field: locked cells, the falling piece and its predicted landing spot.
///
/// Grid cells hold `0` when empty or the color id (`1..=7`) of the shape that
/// locked there. The board starts *inactive*; a front end calls
/// [`Self::reinitialize`] and [`Self::set_active`] to start a game, then drives it
/// with [`Self::tick`] on a fixed interval and the move/rotate/drop actions on
/// input.
///
/// Every mutating method takes `&mut self`, so a single owner serializes all
/// changes. Use [`SharedBoard`](super::SharedBoard) when several threads need to
/// drive the same board.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, ScriptedShapes, ShapeKind};
///
/// let mut board = Board::with_source(ScriptedShapes::new([ShapeKind::O]));
/// board.set_active(true);
///
/// for _ in 0..14 {
///     assert!(!board.tick());
/// }
/// assert_eq!(board.falling_piece().row(), 14);
///
/// // The square is resting on the floor: the next tick locks it.
/// assert!(!board.tick());
/// assert_eq!(board.cell(15, 4), Some(ShapeKind::O.color_id()));
/// ```
#[derive(Debug)]
pub struct Board {
    grid: Grid,
    falling: Piece,
    predicted: Piece,
    active: bool,
    dirty: bool,
    shapes: Box<dyn ShapeSource>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an inactive board with randomly chosen shapes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(RandomShapes::new())
    }

    /// Like [`Self::new`], but with a reproducible shape sequence.
    #[must_use]
    pub fn with_seed(seed: ShapeSeed) -> Self {
        Self::with_source(RandomShapes::with_seed(seed))
    }

    /// Creates an inactive board drawing shapes from `source`.
    ///
    /// The first piece is drawn immediately.
    pub fn with_source(source: impl ShapeSource + 'static) -> Self {
        let placeholder = Piece::new(ShapeKind::O);
        let mut board = Self {
            grid: [EMPTY_ROW; ROWS],
            falling: placeholder,
            predicted: placeholder,
            active: false,
            dirty: false,
            shapes: Box::new(source),
        };
        board.reinitialize();
        board
    }

    /// Empties the grid and spawns a fresh piece.
    ///
    /// Does not change the active flag.
    pub fn reinitialize(&mut self) {
        self.grid = [EMPTY_ROW; ROWS];
        self.dirty = true;
        self.spawn_piece();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Returns whether the grid changed since the last call, and clears the flag.
    pub fn consume_dirty_flag(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling
    }

    /// Where the falling piece would land if dropped now.
    #[must_use]
    pub fn predicted_piece(&self) -> &Piece {
        &self.predicted
    }

    /// Value of the grid cell at `(row, column)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<u8> {
        self.grid.get(row)?.get(column).copied()
    }

    /// Iterates the grid rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8; COLUMNS]> + '_ {
        self.grid.iter()
    }

    /// Owned copy of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            grid: self.grid,
            falling: self.falling,
            predicted: self.predicted,
            active: self.active,
        }
    }

    /// Runs one command. This is the single entry point front ends route input
    /// and timer events through.
    pub fn apply(&mut self, command: GameCommand) -> CommandOutcome {
        match command {
            GameCommand::Tick => self.fall(),
            GameCommand::MoveLeft => {
                self.move_left();
                CommandOutcome::Continue
            }
            GameCommand::MoveRight => {
                self.move_right();
                CommandOutcome::Continue
            }
            GameCommand::Rotate => {
                self.rotate();
                CommandOutcome::Continue
            }
            GameCommand::HardDrop => {
                if self.hard_drop() {
                    CommandOutcome::Locked
                } else {
                    CommandOutcome::Continue
                }
            }
            GameCommand::Start => {
                self.reinitialize();
                self.set_active(true);
                tracing::info!(shape = %self.falling.kind(), "game started");
                CommandOutcome::Continue
            }
        }
    }

    /// Advances gravity by one step.
    ///
    /// Moves the falling piece down a row if it can. Otherwise the piece locks,
    /// full rows are cleared and a new piece spawns; if the piece could not move
    /// from row 0 the board instead becomes inactive. Returns `true` on game over.
    pub fn tick(&mut self) -> bool {
        self.fall().is_game_over()
    }

    fn fall(&mut self) -> CommandOutcome {
        if !self.active {
            return CommandOutcome::Continue;
        }

        let piece = self.falling;
        let bottom = piece.row() + piece.offset().row + displace(0, piece.height());
        if self.fits(&piece, 0, 1, Geometry::Current) && bottom <= ROWS_I32 - 1 {
            self.falling.move_down();
            return CommandOutcome::Continue;
        }

        if piece.row() == 0 {
            self.active = false;
            tracing::info!(shape = %piece.kind(), "game over");
            return CommandOutcome::GameOver;
        }

        self.lock(&piece);
        self.clear_full_rows();
        self.spawn_piece();
        CommandOutcome::Locked
    }

    /// Locks the predicted piece in place, skipping the fall.
    ///
    /// Only acts while the falling piece has left row 0. Returns whether any
    /// cell was written.
    pub fn hard_drop(&mut self) -> bool {
        if !self.active || self.falling.row() <= 0 {
            return false;
        }
        let target = self.predicted;
        let locked = self.lock(&target);
        self.clear_full_rows();
        self.spawn_piece();
        locked
    }

    pub fn move_left(&mut self) {
        self.shift(-1);
    }

    pub fn move_right(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, dx: i32) {
        if !self.active || !self.fits(&self.falling, dx, 0, Geometry::Current) {
            return;
        }
        let piece = self.falling;
        let left = piece.column() + piece.offset().column;
        let inside = if dx > 0 {
            left + displace(0, piece.width()) < COLUMNS_I32
        } else {
            left > 0
        };
        if inside {
            self.falling.set_column(piece.column() + dx);
            self.update_predicted();
        }
    }

    /// Rotates the falling piece if the rotated piece fits.
    pub fn rotate(&mut self) {
        if !self.active || !self.can_rotate() {
            return;
        }
        self.falling.rotate();
        self.update_predicted();
    }

    fn can_rotate(&self) -> bool {
        let piece = &self.falling;
        let offset = piece.future_offset();
        let left = piece.column() + offset.column;
        if left < 0 {
            return false;
        }
        if left + displace(0, piece.future_width()) > COLUMNS_I32 {
            return false;
        }
        if piece.row() + displace(0, piece.future_height()) + offset.row > ROWS_I32 {
            return false;
        }
        self.fits(piece, 0, 0, Geometry::Rotated)
    }

    /// Collision test: whether `piece`, displaced by `(dy, dx)`, stays inside the
    /// board and off every locked cell. Empty matrix cells are ignored.
    fn fits(&self, piece: &Piece, dx: i32, dy: i32, geometry: Geometry) -> bool {
        let cells = match geometry {
            Geometry::Current => piece.occupied_cells(),
            Geometry::Rotated => piece.future_occupied_cells(),
        };
        cells
            .into_iter()
            .all(|(row, column)| self.cell_at(row + dy, column + dx) == Some(0))
    }

    fn cell_at(&self, row: i32, column: i32) -> Option<u8> {
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        self.cell(row, column)
    }

    /// Writes the piece's color id into every cell it covers.
    fn lock(&mut self, piece: &Piece) -> bool {
        let color_id = piece.kind().color_id();
        let mut written = false;
        for (row, column) in piece.occupied_cells() {
            if let (Ok(row), Ok(column)) = (usize::try_from(row), usize::try_from(column))
                && let Some(cell) = self.grid.get_mut(row).and_then(|r| r.get_mut(column))
            {
                *cell = color_id;
                written = true;
            }
        }
        if written {
            self.dirty = true;
            tracing::debug!(piece = ?piece.position(), shape = %piece.kind(), "piece locked");
        }
        written
    }

    /// Removes full rows, scanning from the top.
    ///
    /// Each full row is removed as soon as it is found: everything above it moves
    /// down one row and row 0 becomes empty. Returns the removed row indices in
    /// the order they were found.
    fn clear_full_rows(&mut self) -> ArrayVec<usize, ROWS> {
        let mut cleared = ArrayVec::new();
        for h in 0..ROWS {
            if self.grid[h].iter().all(|&cell| cell != 0) {
                self.grid.copy_within(..h, 1);
                self.grid[0] = EMPTY_ROW;
                cleared.push(h);
            }
        }
        if !cleared.is_empty() {
            self.dirty = true;
            tracing::debug!(rows = ?cleared.as_slice(), "rows cleared");
        }
        cleared
    }

    fn spawn_piece(&mut self) {
        self.falling.randomize(self.shapes.as_mut());
        self.falling.set_position(PiecePosition::SPAWN);
        self.update_predicted();
        tracing::debug!(shape = %self.falling.kind(), "piece spawned");
    }

    /// Recomputes the predicted piece: the falling piece moved down as far as it
    /// goes without colliding.
    fn update_predicted(&mut self) {
        let mut ghost = self.falling.detached();
        ghost.set_column(self.falling.column());
        ghost.set_row(self.falling.row());
        while self.fits(&ghost, 0, 1, Geometry::Current) {
            ghost.move_down();
        }
        self.predicted = ghost;
    }
}
