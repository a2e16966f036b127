//! Transition rule (B3/S23).

use super::{ALIVE, DEAD};

/// Next state of a cell given its current state and live neighbour count.
///
/// A live cell survives with 2 or 3 live neighbours; a dead cell is born
/// with exactly 3.
#[inline]
pub fn next_state(current: u8, live_neighbours: u8) -> u8 {
    match (current == ALIVE, live_neighbours) {
        (true, 2) | (true, 3) => ALIVE,
        (false, 3) => ALIVE,
        _ => DEAD,
    }
}
