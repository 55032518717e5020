//! Common types for the naval duel engine: coordinates, attack results and errors.

use thiserror::Error;

/// A `(row, col)` position on a board, zero-indexed.
pub type Coord = (usize, usize);

/// Result of an attack that resolved on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Attack landed on open water.
    Miss,
    /// Attack hit an undamaged ship segment.
    Hit,
    /// Attack hit the last intact segment of a ship.
    Sink,
}

impl GuessResult {
    /// Whether the attack struck a ship.
    pub fn is_hit(self) -> bool {
        !matches!(self, GuessResult::Miss)
    }
}

/// Why a ship could not be placed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Ships must cover at least one cell.
    #[error("ship length must be positive")]
    ZeroLength,
    /// A segment would fall outside the grid.
    #[error("ship does not fit on the board at ({row}, {col})")]
    OutOfBounds { row: usize, col: usize },
    /// A segment would land on a cell that is not empty water.
    #[error("cell ({row}, {col}) is not empty")]
    Occupied { row: usize, col: usize },
    /// A segment would touch another ship, diagonals included.
    #[error("cell ({row}, {col}) touches another ship")]
    Adjacent { row: usize, col: usize },
}

/// Errors returned by `Ship` operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ShipError {
    /// Part index past the end of the ship.
    #[error("part {part} is out of range for a ship of length {length}")]
    OutOfRange { part: usize, length: usize },
}

/// Errors returned by `Board` operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Placement violates bounds, overlap or adjacency.
    #[error("invalid placement: {0}")]
    InvalidPlacement(#[from] PlacementError),
    /// Bookkeeping between a cell and its ship went wrong.
    #[error(transparent)]
    Ship(#[from] ShipError),
}

/// Errors returned by `MatchConfig::validate`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size must be positive")]
    ZeroBoardSize,
    #[error("fleet must contain at least one ship")]
    EmptyFleet,
    #[error("ship #{index} has zero length")]
    ZeroLengthShip { index: usize },
}

/// Errors returned by `Match` operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Fleet edits are only accepted before the match starts.
    #[error("the fleet is locked once the match has started")]
    NotInSetup,
    #[error(transparent)]
    Board(#[from] BoardError),
}
