use rand::Rng;

use crate::ai;
use crate::board::Board;
use crate::common::Coord;

/// A named participant owning one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    board: Board,
}

impl Player {
    pub fn new(board: Board, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            board,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the player's own board.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Choose the next cell to attack on `opponent`.
    ///
    /// Finishes off damaged ships first (hunt mode), otherwise picks any cell
    /// that has not been attacked (search mode). Returns `None` only when the
    /// opponent board has no unattacked cell left.
    pub fn choose_attack<R: Rng + ?Sized>(&self, opponent: &Board, rng: &mut R) -> Option<Coord> {
        ai::choose_target(opponent, rng)
    }
}
