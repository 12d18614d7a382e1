use thiserror::Error;

use crate::agent::Agent;

use super::placement::BoardAction;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("{agent} cannot play {action:?} on this board")]
    InvalidAction { agent: Agent, action: BoardAction },
    #[error("Tile value {value} is not zero or a power of two between 2 and 2^31")]
    InvalidTileValue { value: u32 },
    #[error("Cannot place a tile at ({row}, {col}), the square is occupied")]
    SquareOccupied { row: usize, col: usize },
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("Invalid board: {msg}")]
    ParseError { msg: String },
}
