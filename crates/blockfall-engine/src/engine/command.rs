/// A single action applied to a [`Board`](super::Board).
///
/// Front ends translate key presses and timer expirations into commands so every
/// mutation goes through one entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    /// One step of gravity.
    Tick,
    MoveLeft,
    MoveRight,
    Rotate,
    /// Lock the piece at its predicted landing spot.
    HardDrop,
    /// Clear the grid, spawn a piece and activate the board.
    Start,
}

/// What a command did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CommandOutcome {
    /// The piece moved, or the command was rejected.
    Continue,
    /// A piece was written into the grid and a new one spawned.
    Locked,
    /// The falling piece could not leave the spawn row; the board is now inactive.
    GameOver,
}
