//! Hunt/search targeting against an opponent board.
//! Only the attacker's knowledge is used: which cells were hit, missed or left alone.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::{Board, BoardState};
use crate::common::Coord;

/// Orthogonal neighbour offsets.
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Cells worth finishing off: untouched-empty orthogonal neighbours of every
/// hit segment whose ship is still afloat, sorted and without duplicates.
///
/// Intact segments never qualify, even when they border a hit.
pub fn hunt_candidates(board: &Board, state: &BoardState) -> Vec<Coord> {
    let mut candidates = Vec::new();
    for &hit in &state.ship_hit {
        if board.ship_at(hit).map_or(true, |ship| ship.is_sunk()) {
            continue;
        }
        for &(dr, dc) in &ORTHOGONAL {
            if let Some(n) = board.offset(hit, dr, dc) {
                if is_open_water(state, n) {
                    candidates.push(n);
                }
            }
        }
    }
    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

/// Every cell not yet attacked.
pub fn search_candidates(state: &BoardState) -> Vec<Coord> {
    state
        .ship_intact
        .iter()
        .chain(state.untouched.iter())
        .copied()
        .collect()
}

/// Pick the next cell to attack on `board`, or `None` when every cell has
/// already been resolved.
pub fn choose_target<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Coord> {
    let state = board.derived_state();
    let hunt = hunt_candidates(board, &state);
    if let Some(&target) = hunt.choose(rng) {
        return Some(target);
    }
    search_candidates(&state).choose(rng).copied()
}

fn is_open_water(state: &BoardState, coord: Coord) -> bool {
    // `untouched` is row-major, so binary search works.
    state.untouched.binary_search(&coord).is_ok()
}
