//! Ship definitions and per-segment hit tracking.

use core::fmt;

use crate::common::{Coord, ShipError};

/// Orientation of a ship on the board.
///
/// Horizontal ships extend along the column axis, vertical ships along the
/// row axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Coordinate of segment `part` for a ship anchored at `origin`.
    /// Returns `None` if the addition overflows.
    pub(crate) fn step(self, origin: Coord, part: usize) -> Option<Coord> {
        let (row, col) = origin;
        match self {
            Orientation::Horizontal => col.checked_add(part).map(|c| (row, c)),
            Orientation::Vertical => row.checked_add(part).map(|r| (r, col)),
        }
    }
}

/// Length, origin and orientation of a ship: everything needed to place it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub length: usize,
    pub origin: Coord,
    pub orientation: Orientation,
}

/// A ship placed on a board, with one hit flag per segment.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    origin: Coord,
    orientation: Orientation,
    hits: Vec<bool>,
}

impl Ship {
    /// Create an undamaged ship. Board bounds are not checked here.
    pub fn new(length: usize, origin: Coord, orientation: Orientation) -> Self {
        Ship {
            origin,
            orientation,
            hits: vec![false; length],
        }
    }

    /// Number of segments.
    pub fn length(&self) -> usize {
        self.hits.len()
    }

    /// Anchor cell (segment 0).
    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Hit flags in segment order.
    pub fn hits(&self) -> &[bool] {
        &self.hits
    }

    pub fn placement(&self) -> ShipPlacement {
        ShipPlacement {
            length: self.length(),
            origin: self.origin,
            orientation: self.orientation,
        }
    }

    /// Mark segment `part` as hit.
    pub fn hit(&mut self, part: usize) -> Result<(), ShipError> {
        let length = self.length();
        let slot = self
            .hits
            .get_mut(part)
            .ok_or(ShipError::OutOfRange { part, length })?;
        *slot = true;
        Ok(())
    }

    /// Whether segment `part` has been hit. Out-of-range parts report `false`.
    pub fn is_hit(&self, part: usize) -> bool {
        self.hits.get(part).copied().unwrap_or(false)
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.iter().all(|&h| h)
    }

    /// Segment index covering `coord`, if any.
    pub fn part_index(&self, coord: Coord) -> Option<usize> {
        let (row, col) = coord;
        let (orow, ocol) = self.origin;
        let part = match self.orientation {
            Orientation::Horizontal if row == orow => col.checked_sub(ocol)?,
            Orientation::Vertical if col == ocol => row.checked_sub(orow)?,
            _ => return None,
        };
        (part < self.length()).then_some(part)
    }

    /// Covered cells in segment order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.length()).filter_map(move |i| self.orientation.step(self.origin, i))
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ length: {}, origin: ({}, {}), orientation: {:?}, hits: {} }}",
            self.length(),
            self.origin.0,
            self.origin.1,
            self.orientation,
            self.hits.iter().filter(|&&h| h).count(),
        )
    }
}
