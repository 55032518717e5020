//! Game board: a square grid of cells, the ships placed on it, and attack resolution.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, error, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{BoardError, Coord, GuessResult, PlacementError};
use crate::ship::{Orientation, Ship, ShipPlacement};

/// Offsets of the Moore neighbourhood (the eight surrounding cells).
const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Stable handle of a ship on one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(u32);

/// Content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Open water, never attacked.
    Empty,
    /// Open water that was attacked or ringed around a sunk ship.
    Miss,
    /// Segment `part` of ship `ship`. Hit state lives on the ship.
    Occupied { ship: ShipId, part: usize },
}

/// Partition of every cell of a board, each list in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    /// Ship segments not yet hit.
    pub ship_intact: Vec<Coord>,
    /// Ship segments already hit, sunk ships included.
    pub ship_hit: Vec<Coord>,
    /// Water marked as a miss.
    pub missed: Vec<Coord>,
    /// Water never attacked.
    pub untouched: Vec<Coord>,
}

/// An N×N board with the ships placed on it.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    ships: BTreeMap<ShipId, Ship>,
    next_id: u32,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
            ships: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Grid dimension N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether a signed position lies on the grid.
    pub fn is_within(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Whether `coord` lies on the grid.
    pub fn contains(&self, (row, col): Coord) -> bool {
        row < self.size && col < self.size
    }

    /// Content of the cell at `coord`, `None` when off the grid.
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Ships in placement-id order. Callers should not rely on the order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.values()
    }

    /// Number of ships on the board, sunk ones included.
    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    /// The ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coord) -> Option<&Ship> {
        match self.cell(coord)? {
            Cell::Occupied { ship, .. } => self.ships.get(&ship),
            _ => None,
        }
    }

    /// Place a new ship of `length` anchored at `origin`.
    ///
    /// The whole footprint is validated before the grid is touched, so a
    /// failed placement leaves the board unchanged.
    pub fn place_ship(
        &mut self,
        length: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let cells = self.footprint(length, origin, orientation)?;
        let id = ShipId(self.next_id);
        self.next_id += 1;
        self.insert(id, Ship::new(length, origin, orientation), &cells);
        debug!(
            "placed ship {:?} of length {} at {:?} {:?}",
            id, length, origin, orientation
        );
        Ok(id)
    }

    /// Remove the ship covering `coord` and return where it was.
    pub fn remove_ship(&mut self, coord: Coord) -> Option<ShipPlacement> {
        self.take_ship(coord).map(|(_, ship)| ship.placement())
    }

    /// Flip the orientation of the ship at `coord`, keeping its origin.
    /// On failure the ship stays exactly as it was.
    pub fn rotate_ship(&mut self, coord: Coord) -> bool {
        self.relocate(coord, |p| (p.origin, p.orientation.flipped()))
    }

    /// Move the ship at `from` so that its origin becomes `to`.
    /// On failure the ship stays exactly as it was.
    pub fn move_ship(&mut self, from: Coord, to: Coord) -> bool {
        self.relocate(from, |p| (to, p.orientation))
    }

    /// Attack `coord`. Returns `false` without touching the board when the
    /// coordinate is off the grid or was already attacked.
    pub fn receive_attack(&mut self, coord: Coord) -> bool {
        self.resolve_attack(coord).is_some()
    }

    /// Attack `coord` and report what happened, `None` for a rejected attack.
    ///
    /// Sinking a ship rings it with misses: every empty cell touching the
    /// wreck becomes `Cell::Miss`.
    pub fn resolve_attack(&mut self, coord: Coord) -> Option<GuessResult> {
        let idx = self.index(coord)?;
        match self.cells[idx] {
            Cell::Miss => None,
            Cell::Empty => {
                self.cells[idx] = Cell::Miss;
                debug!("attack at {:?} missed", coord);
                Some(GuessResult::Miss)
            }
            Cell::Occupied { ship, part } => match self.strike(ship, part) {
                Ok(result) => {
                    debug!("attack at {:?} -> {:?}", coord, result);
                    result
                }
                Err(e) => {
                    error!("attack at {:?} failed: {}", coord, e);
                    None
                }
            },
        }
    }

    /// Returns `true` when all ships are sunk. A board without ships counts as sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.values().all(Ship::is_sunk)
    }

    /// Partition the grid into intact, hit, missed and untouched cells.
    pub fn derived_state(&self) -> BoardState {
        let mut state = BoardState::default();
        for (i, cell) in self.cells.iter().enumerate() {
            let coord = (i / self.size, i % self.size);
            match *cell {
                Cell::Empty => state.untouched.push(coord),
                Cell::Miss => state.missed.push(coord),
                Cell::Occupied { ship, part } => {
                    let hit = self.ships.get(&ship).is_some_and(|s| s.is_hit(part));
                    if hit {
                        state.ship_hit.push(coord);
                    } else {
                        state.ship_intact.push(coord);
                    }
                }
            }
        }
        state
    }

    /// Empty cells whose whole Moore neighbourhood is empty water.
    /// Off-grid neighbours do not count against a cell.
    pub fn valid_placement_origins(&self) -> Vec<Coord> {
        (0..self.size)
            .flat_map(|r| (0..self.size).map(move |c| (r, c)))
            .filter(|&coord| {
                self.cell(coord) == Some(Cell::Empty)
                    && self
                        .moore(coord)
                        .all(|n| self.cell(n) == Some(Cell::Empty))
            })
            .collect()
    }

    /// Place one ship per entry of `lengths` at random positions, longest first.
    ///
    /// Every (origin, orientation) pair is tried at most once per ship. Ships
    /// already placed stay on the board when a later one does not fit.
    pub fn generate_random_ships<R: Rng + ?Sized>(&mut self, lengths: &[usize], rng: &mut R) -> bool {
        let mut sorted = lengths.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let n = self.size;
        let mut all_placed = true;
        for length in sorted {
            let mut candidates: Vec<(Coord, Orientation)> = (0..n)
                .flat_map(|r| {
                    (0..n).flat_map(move |c| {
                        [
                            ((r, c), Orientation::Horizontal),
                            ((r, c), Orientation::Vertical),
                        ]
                    })
                })
                .collect();
            candidates.shuffle(rng);
            let placed = candidates
                .into_iter()
                .any(|(origin, orientation)| self.place_ship(length, origin, orientation).is_ok());
            if !placed {
                warn!("no room left for a ship of length {}", length);
                all_placed = false;
            }
        }
        all_placed
    }

    /// Clear every cell and drop all ships.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.ships.clear();
        self.next_id = 0;
    }

    /// Step from `coord` by a signed offset, staying on the grid.
    pub(crate) fn offset(&self, (row, col): Coord, dr: isize, dc: isize) -> Option<Coord> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.contains((r, c)).then_some((r, c))
    }

    fn moore(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        MOORE
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(coord, dr, dc))
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.0 * self.size + coord.1)
    }

    /// Cells a new ship would cover, or why it cannot go there.
    fn footprint(
        &self,
        length: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, PlacementError> {
        if length == 0 {
            return Err(PlacementError::ZeroLength);
        }
        let mut cells = Vec::with_capacity(length);
        for part in 0..length {
            let (row, col) = orientation
                .step(origin, part)
                .filter(|&c| self.contains(c))
                .ok_or(PlacementError::OutOfBounds {
                    row: origin.0,
                    col: origin.1,
                })?;
            if self.cell((row, col)) != Some(Cell::Empty) {
                return Err(PlacementError::Occupied { row, col });
            }
            let touching = self
                .moore((row, col))
                .any(|n| matches!(self.cell(n), Some(Cell::Occupied { .. })));
            if touching {
                return Err(PlacementError::Adjacent { row, col });
            }
            cells.push((row, col));
        }
        Ok(cells)
    }

    fn insert(&mut self, id: ShipId, ship: Ship, cells: &[Coord]) {
        for (part, &coord) in cells.iter().enumerate() {
            if let Some(i) = self.index(coord) {
                self.cells[i] = Cell::Occupied { ship: id, part };
            }
        }
        self.ships.insert(id, ship);
    }

    fn take_ship(&mut self, coord: Coord) -> Option<(ShipId, Ship)> {
        let id = match self.cell(coord)? {
            Cell::Occupied { ship, .. } => ship,
            _ => return None,
        };
        let ship = self.ships.remove(&id)?;
        for c in ship.cells() {
            if let Some(i) = self.index(c) {
                self.cells[i] = Cell::Empty;
            }
        }
        Some((id, ship))
    }

    /// Lift the ship at `coord`, try it at the position chosen by `target`,
    /// and put it back untouched if that fails.
    fn relocate<F>(&mut self, coord: Coord, target: F) -> bool
    where
        F: FnOnce(&ShipPlacement) -> (Coord, Orientation),
    {
        let Some((id, ship)) = self.take_ship(coord) else {
            return false;
        };
        let old = ship.placement();
        let (origin, orientation) = target(&old);
        match self.footprint(old.length, origin, orientation) {
            Ok(cells) => {
                self.insert(id, Ship::new(old.length, origin, orientation), &cells);
                debug!("ship {:?} now at {:?} {:?}", id, origin, orientation);
                true
            }
            Err(reason) => {
                debug!("ship {:?} stays put: {}", id, reason);
                let cells: Vec<Coord> = ship.cells().collect();
                self.insert(id, ship, &cells);
                false
            }
        }
    }

    fn strike(&mut self, id: ShipId, part: usize) -> Result<Option<GuessResult>, BoardError> {
        let Some(ship) = self.ships.get_mut(&id) else {
            return Ok(None);
        };
        if ship.is_hit(part) {
            return Ok(None);
        }
        ship.hit(part)?;
        if !ship.is_sunk() {
            return Ok(Some(GuessResult::Hit));
        }
        let wreck: Vec<Coord> = ship.cells().collect();
        let ring: Vec<usize> = wreck
            .iter()
            .flat_map(|&c| self.moore(c))
            .filter_map(|n| self.index(n))
            .filter(|&i| self.cells[i] == Cell::Empty)
            .collect();
        for i in ring {
            self.cells[i] = Cell::Miss;
        }
        Ok(Some(GuessResult::Sink))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, ships: {:?} }}", self.size, self.ships)?;
        write!(f, "{}", self)
    }
}

/// `S` intact segment, `X` hit segment, `o` miss, `.` untouched water.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let ch = match self.cells[r * self.size + c] {
                    Cell::Empty => '.',
                    Cell::Miss => 'o',
                    Cell::Occupied { ship, part } => {
                        if self.ships.get(&ship).is_some_and(|s| s.is_hit(part)) {
                            'X'
                        } else {
                            'S'
                        }
                    }
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
