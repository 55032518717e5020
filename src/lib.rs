//! Game-state engine for a human-versus-computer naval duel on a square grid.
//!
//! [`Board`] owns the cells and ships and resolves placement and attacks,
//! [`Player`] adds a name and the hunt/search targeting heuristic, and
//! [`Match`] runs setup, turn order and win detection for two players.

pub mod ai;
mod board;
mod common;
mod config;
mod game;
mod logging;
mod player;
pub mod prelude;
mod ship;

pub use board::{Board, BoardState, Cell, ShipId};
pub use common::*;
pub use config::*;
pub use game::{Match, MatchPhase, Seat, TurnReport};
pub use logging::init_logging;
pub use player::Player;
pub use ship::{Orientation, Ship, ShipPlacement};
