//! N×N naughts and crosses: bitboard board state, exact negamax for the
//! classic 3×3 board and a heuristic computer opponent for larger boards.

pub mod config;
pub mod display;
pub mod error;
pub mod eval;
pub mod game;
pub mod play;
pub mod player;
pub mod policy;
pub mod search;

pub use error::{GameError, Result};
pub use game::{generate_winning_masks, Board, Outcome, PlayerMarker, WinningMasks};
pub use policy::{cpu_select_move, Difficulty};
