/// Chess domain types and move generation.
pub mod chess;
/// The click-driven game state machine.
pub mod game;
/// Computer controlled players.
pub mod ai;
