//! Match orchestration: setup gating, turn order and win detection.

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::common::{Coord, GuessResult, MatchError};
use crate::config::{MatchConfig, COMPUTER_NAME, HUMAN_NAME};
use crate::player::Player;
use crate::ship::{Orientation, ShipPlacement};

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    Human,
    Computer,
}

impl Seat {
    /// Index of the seat in the player list (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Seat::Human => 0,
            Seat::Computer => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Seat::Human => Seat::Computer,
            Seat::Computer => Seat::Human,
        }
    }
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchPhase {
    /// The human fleet can still be arranged.
    Setup,
    InProgress,
    /// A winner is known; no more attacks are accepted.
    Finished,
}

/// Outcome of one human attack and the computer's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub target: Coord,
    pub result: GuessResult,
    /// The computer's answering shot, absent when the human already won.
    pub reply: Option<(Coord, GuessResult)>,
    pub winner: Option<Seat>,
}

/// A human-versus-computer match on two boards of the same size.
pub struct Match {
    config: MatchConfig,
    players: [Player; 2],
    current: Seat,
    initialized: bool,
    winner: Option<Seat>,
    rng: SmallRng,
}

impl Match {
    /// Create a match with freshly dealt random fleets on both boards.
    pub fn new(config: MatchConfig) -> Self {
        let mut seed_rng = rand::rng();
        Self::with_rng(config, SmallRng::from_rng(&mut seed_rng))
    }

    /// Like [`Match::new`] but reproducible.
    pub fn with_seed(config: MatchConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: MatchConfig, rng: SmallRng) -> Self {
        let size = config.board_size;
        let mut m = Match {
            config,
            players: [
                Player::new(Board::new(size), HUMAN_NAME),
                Player::new(Board::new(size), COMPUTER_NAME),
            ],
            current: Seat::Human,
            initialized: false,
            winner: None,
            rng,
        };
        m.deal_fleets();
        m
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn ship_lengths(&self) -> &[usize] {
        &self.config.ship_lengths
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Player being attacked this turn.
    pub fn opponent(&self) -> &Player {
        self.player(self.current.opponent())
    }

    pub fn current_turn(&self) -> Seat {
        self.current
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn phase(&self) -> MatchPhase {
        if self.winner.is_some() {
            MatchPhase::Finished
        } else if self.initialized {
            MatchPhase::InProgress
        } else {
            MatchPhase::Setup
        }
    }

    /// Place a ship on the human board during setup.
    pub fn place_ship(
        &mut self,
        length: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), MatchError> {
        self.human_board_mut()?
            .place_ship(length, origin, orientation)?;
        Ok(())
    }

    pub fn remove_ship(&mut self, coord: Coord) -> Result<Option<ShipPlacement>, MatchError> {
        Ok(self.human_board_mut()?.remove_ship(coord))
    }

    pub fn rotate_ship(&mut self, coord: Coord) -> Result<bool, MatchError> {
        Ok(self.human_board_mut()?.rotate_ship(coord))
    }

    pub fn move_ship(&mut self, from: Coord, to: Coord) -> Result<bool, MatchError> {
        Ok(self.human_board_mut()?.move_ship(from, to))
    }

    /// Remove every human ship so the fleet can be placed by hand.
    pub fn clear_fleet(&mut self) -> Result<(), MatchError> {
        self.human_board_mut()?.reset();
        Ok(())
    }

    /// Replace the human fleet with a new random arrangement.
    pub fn randomize_fleet(&mut self) -> Result<bool, MatchError> {
        if self.phase() != MatchPhase::Setup {
            return Err(MatchError::NotInSetup);
        }
        let board = self.players[Seat::Human.index()].board_mut();
        board.reset();
        Ok(board.generate_random_ships(&self.config.ship_lengths, &mut self.rng))
    }

    /// Lock the fleets and begin play. Stays in setup unless the human board
    /// holds the full configured fleet. Returns whether the match is started.
    pub fn start(&mut self) -> bool {
        if self.initialized {
            return true;
        }
        let placed = self.player(Seat::Human).board().ship_count();
        if placed == self.config.ship_lengths.len() {
            self.initialized = true;
            info!("match started with {} ships per side", placed);
        } else {
            debug!(
                "cannot start: {} of {} ships placed",
                placed,
                self.config.ship_lengths.len()
            );
        }
        self.initialized
    }

    /// Hand the turn to the other seat.
    ///
    /// Unchecked: during play, handing the turn to the computer makes
    /// `submit_attack` reject every attack until `computer_turn` has fired
    /// and handed it back.
    pub fn advance_turn(&mut self) {
        self.current = self.current.opponent();
    }

    /// Resolve a human attack on the computer board and, unless that ends the
    /// match, let the computer answer straight away.
    ///
    /// Returns `None` when the attack is rejected: the match is not in
    /// progress, it is not the human's turn, or the cell is off the grid or
    /// already attacked. A rejected attack changes nothing.
    pub fn submit_attack(&mut self, coord: Coord) -> Option<TurnReport> {
        if self.phase() != MatchPhase::InProgress || self.current != Seat::Human {
            return None;
        }
        let result = self.players[Seat::Computer.index()]
            .board_mut()
            .resolve_attack(coord)?;
        debug!("{} fires at {:?}: {:?}", HUMAN_NAME, coord, result);

        if let Some(winner) = self.settle() {
            return Some(TurnReport {
                target: coord,
                result,
                reply: None,
                winner: Some(winner),
            });
        }

        self.advance_turn();
        let reply = self.computer_turn();
        Some(TurnReport {
            target: coord,
            result,
            reply,
            winner: self.winner,
        })
    }

    /// Let the current player pick targets with the heuristic until one
    /// attack resolves on the opponent board, then check for a win and hand
    /// the turn over unless the match is decided.
    ///
    /// Does nothing outside of play.
    pub fn computer_turn(&mut self) -> Option<(Coord, GuessResult)> {
        if self.phase() != MatchPhase::InProgress {
            return None;
        }
        let shot = self.fire_heuristic();
        if self.settle().is_none() {
            self.advance_turn();
        }
        shot
    }

    /// Heuristic suggestion for the current player, e.g. as a hint or to
    /// drive the human seat in simulations.
    pub fn suggest_attack(&mut self) -> Option<Coord> {
        let attacker = self.current.index();
        let defender = self.current.opponent().index();
        self.players[attacker].choose_attack(self.players[defender].board(), &mut self.rng)
    }

    /// Back to setup with new random fleets on both boards.
    pub fn restart(&mut self) {
        self.current = Seat::Human;
        self.initialized = false;
        self.winner = None;
        self.deal_fleets();
        info!("match restarted");
    }

    fn human_board_mut(&mut self) -> Result<&mut Board, MatchError> {
        if self.phase() != MatchPhase::Setup {
            return Err(MatchError::NotInSetup);
        }
        Ok(self.players[Seat::Human.index()].board_mut())
    }

    fn deal_fleets(&mut self) {
        for player in self.players.iter_mut() {
            let board = player.board_mut();
            board.reset();
            if !board.generate_random_ships(&self.config.ship_lengths, &mut self.rng) {
                warn!(
                    "could not fit the whole fleet on {}'s {}x{} board",
                    player.name(),
                    self.config.board_size,
                    self.config.board_size
                );
            }
        }
    }

    fn fire_heuristic(&mut self) -> Option<(Coord, GuessResult)> {
        let attacker = self.current.index();
        let defender = self.current.opponent().index();
        let attempts = self.config.board_size * self.config.board_size + 1;
        for _ in 0..attempts {
            let target = self.players[attacker].choose_attack(self.players[defender].board(), &mut self.rng)?;
            if let Some(result) = self.players[defender].board_mut().resolve_attack(target) {
                debug!("{} fires at {:?}: {:?}", self.players[attacker].name(), target, result);
                return Some((target, result));
            }
            warn!("heuristic proposed an attacked cell {:?}", target);
        }
        None
    }

    /// Record the current player as winner once the opponent's fleet is gone.
    /// The winner is never overwritten.
    fn settle(&mut self) -> Option<Seat> {
        if self.winner.is_none() && self.opponent().board().all_sunk() {
            self.winner = Some(self.current);
            info!("{} wins", self.current_player().name());
        }
        self.winner
    }
}
