//! Commonly used types for ease of import.

pub use crate::{
    Board, BoardState, Cell, Coord, GuessResult, Match, MatchConfig, MatchPhase, Orientation,
    Player, Seat, Ship,
};
