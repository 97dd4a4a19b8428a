//! Attack detection

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::rules::{self, Reach};
use crate::types::{Color, Coord};

/// Returns `true` if the square `coord` is attacked by any piece of color `by`
///
/// The contents of `coord` itself don't matter, so this can be used both to detect checks and to
/// test whether the king may pass through an empty square.
pub fn is_cell_attacked(b: &Board, coord: Coord, by: Color) -> bool {
    b.color(by).into_iter().any(|src| attacks(b, src, coord))
}

/// Returns the set of pieces of color `by` attacking the square `coord`
pub fn cell_attackers(b: &Board, coord: Coord, by: Color) -> Bitboard {
    b.color(by)
        .into_iter()
        .filter(|&src| attacks(b, src, coord))
        .collect()
}

#[inline]
fn attacks(b: &Board, src: Coord, dst: Coord) -> bool {
    match b.get(src).parts() {
        Some((color, piece)) => rules::is_pseudo_legal(b, color, piece, src, dst, Reach::Attack),
        None => false,
    }
}
