//! Game state and the actions a front end drives it with.
//!
//! - [`Board`] - The grid, the falling piece and its predicted landing spot
//! - [`GameCommand`] - Discrete input and timer events, applied with [`Board::apply`]
//! - [`SharedBoard`] - A board behind a mutex, for drivers on several threads
//! - [`BoardSnapshot`] - Owned copy of the board state for rendering
//!
//! # Game Flow
//!
//! 1. Create a [`Board`] (inactive) and send [`GameCommand::Start`]
//! 2. Send [`GameCommand::Tick`] on a fixed interval; input maps to the other commands
//! 3. Pieces lock when they can no longer fall, full rows are cleared, a new piece spawns
//! 4. A tick that cannot move a piece off row 0 ends the game and deactivates the board
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Board, GameCommand};
//!
//! let mut board = Board::new();
//! board.apply(GameCommand::Start);
//! board.apply(GameCommand::MoveLeft);
//! board.apply(GameCommand::Tick);
//!
//! if board.apply(GameCommand::HardDrop).is_locked() {
//!     println!("piece locked");
//! }
//! ```

pub use self::{board::*, command::*, shared::*, snapshot::*};

mod board;
mod command;
mod shared;
mod snapshot;
