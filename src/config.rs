use crate::common::ConfigError;

pub const DEFAULT_BOARD_SIZE: usize = 10;
pub const DEFAULT_SHIP_LENGTHS: [usize; 5] = [5, 4, 3, 3, 2];

pub const HUMAN_NAME: &str = "Player";
pub const COMPUTER_NAME: &str = "Computer";

/// Board size and fleet used by both sides of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub board_size: usize,
    pub ship_lengths: Vec<usize>,
}

impl MatchConfig {
    pub fn new(ship_lengths: Vec<usize>, board_size: usize) -> Self {
        Self {
            board_size,
            ship_lengths,
        }
    }

    /// Reject configurations no board could ever hold.
    ///
    /// Whether the fleet actually fits is only known once placement is
    /// attempted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::ZeroBoardSize);
        }
        if self.ship_lengths.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if let Some(index) = self.ship_lengths.iter().position(|&l| l == 0) {
            return Err(ConfigError::ZeroLengthShip { index });
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SHIP_LENGTHS.to_vec(), DEFAULT_BOARD_SIZE)
    }
}
