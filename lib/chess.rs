mod bitboard;
mod board;
mod color;
mod r#move;
mod movegen;
mod outcome;
mod piece;
mod role;
mod square;

pub use bitboard::*;
pub use board::*;
pub use color::*;
pub use movegen::*;
pub use outcome::*;
pub use piece::*;
pub use r#move::*;
pub use role::*;
pub use square::*;
