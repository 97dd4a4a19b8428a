//! Castling legality and application

use crate::attack;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::types::{CastlingRights, CastlingSide, Cell, Color, Coord, Piece};

/// Squares between the king and the rook, which must be empty to castle
#[inline]
pub const fn pass(c: Color, s: CastlingSide) -> Bitboard {
    let x = match s {
        CastlingSide::King => 0x60,
        CastlingSide::Queen => 0x0e,
    };
    Bitboard::from_raw(match c {
        Color::White => x << 56,
        Color::Black => x,
    })
}

/// Squares the king passes through, destination included, which must not be attacked
#[inline]
pub const fn king_path(c: Color, s: CastlingSide) -> Bitboard {
    let x = match s {
        CastlingSide::King => 0x60,
        CastlingSide::Queen => 0x0c,
    };
    Bitboard::from_raw(match c {
        Color::White => x << 56,
        Color::Black => x,
    })
}

/// Returns the castling side if the king move `src` -> `dst` of color `c` looks like castling
///
/// Only the squares are compared. Whether castling is actually allowed is decided by
/// [`is_legal()`].
pub fn side_of(c: Color, src: Coord, dst: Coord) -> Option<CastlingSide> {
    if src != geometry::king_src(c) {
        return None;
    }
    [CastlingSide::King, CastlingSide::Queen]
        .into_iter()
        .find(|&s| dst == geometry::castling_king_dst(c, s))
}

/// Returns `true` if the side `c` can castle to the side `s` on board `b`
pub fn is_legal(b: &Board, rights: CastlingRights, c: Color, s: CastlingSide) -> bool {
    if !rights.has(c, s) {
        return false;
    }
    let king = geometry::king_src(c);
    if b.get(king) != Cell::from_parts(c, Piece::King)
        || b.get(geometry::castling_rook_src(c, s)) != Cell::from_parts(c, Piece::Rook)
    {
        return false;
    }
    if (b.occupied() & pass(c, s)).is_nonempty() {
        return false;
    }
    let inv = c.inv();
    !attack::is_cell_attacked(b, king, inv)
        && !king_path(c, s)
            .into_iter()
            .any(|coord| attack::is_cell_attacked(b, coord, inv))
}

/// Moves the king and the rook of color `c` to their places after castling to the side `s`
///
/// The move is not validated, use [`is_legal()`] first.
pub fn apply(b: &mut Board, c: Color, s: CastlingSide) {
    b.put(geometry::king_src(c), Cell::EMPTY);
    b.put(geometry::castling_rook_src(c, s), Cell::EMPTY);
    b.put(
        geometry::castling_king_dst(c, s),
        Cell::from_parts(c, Piece::King),
    );
    b.put(
        geometry::castling_rook_dst(c, s),
        Cell::from_parts(c, Piece::Rook),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HomePiece;

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_masks() {
        let bb = |sq: &[&str]| sq.iter().map(|s| c(s)).collect::<Bitboard>();
        assert_eq!(pass(Color::White, CastlingSide::King), bb(&["f1", "g1"]));
        assert_eq!(
            pass(Color::White, CastlingSide::Queen),
            bb(&["b1", "c1", "d1"])
        );
        assert_eq!(pass(Color::Black, CastlingSide::King), bb(&["f8", "g8"]));
        assert_eq!(king_path(Color::Black, CastlingSide::Queen), bb(&["c8", "d8"]));
        assert_eq!(
            king_path(Color::White, CastlingSide::King),
            pass(Color::White, CastlingSide::King)
        );
    }

    #[test]
    fn test_side_of() {
        assert_eq!(side_of(Color::White, c("e1"), c("g1")), Some(CastlingSide::King));
        assert_eq!(side_of(Color::White, c("e1"), c("c1")), Some(CastlingSide::Queen));
        assert_eq!(side_of(Color::Black, c("e8"), c("g8")), Some(CastlingSide::King));
        assert_eq!(side_of(Color::White, c("e1"), c("f1")), None);
        assert_eq!(side_of(Color::White, c("e8"), c("g8")), None);
        assert_eq!(side_of(Color::Black, c("e1"), c("g1")), None);
    }

    #[test]
    fn test_legal() {
        let b = Board::from_diagram(
            "
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
            ",
        )
        .unwrap();
        let rights = CastlingRights::FRESH;
        for color in [Color::White, Color::Black] {
            for side in [CastlingSide::King, CastlingSide::Queen] {
                assert!(is_legal(&b, rights, color, side));
            }
        }

        let rights = rights.with_moved(Color::White, HomePiece::QueensideRook);
        assert!(is_legal(&b, rights, Color::White, CastlingSide::King));
        assert!(!is_legal(&b, rights, Color::White, CastlingSide::Queen));

        let rights = rights.with_moved(Color::Black, HomePiece::King);
        assert!(!is_legal(&b, rights, Color::Black, CastlingSide::King));
        assert!(!is_legal(&b, rights, Color::Black, CastlingSide::Queen));

        assert!(!is_legal(
            &Board::initial(),
            CastlingRights::FRESH,
            Color::White,
            CastlingSide::King
        ));
    }

    #[test]
    fn test_attacked() {
        // Bishop on a6 covers f1, rook on d8 covers d1
        let b = Board::from_diagram(
            "
            ...rk...
            ........
            b.......
            ........
            ........
            ........
            ........
            R...K..R
            ",
        )
        .unwrap();
        assert!(!is_legal(&b, CastlingRights::FRESH, Color::White, CastlingSide::King));
        assert!(!is_legal(&b, CastlingRights::FRESH, Color::White, CastlingSide::Queen));

        let b = Board::from_diagram(
            "
            .r..k...
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
            ",
        )
        .unwrap();
        // Only the squares the king passes must be safe
        assert!(is_legal(&b, CastlingRights::FRESH, Color::White, CastlingSide::Queen));

        // Pawns cover their diagonals even when they are empty
        let b = Board::from_diagram(
            "
            ....k...
            ........
            ........
            ........
            ........
            ........
            ......p.
            R...K..R
            ",
        )
        .unwrap();
        assert!(!is_legal(&b, CastlingRights::FRESH, Color::White, CastlingSide::King));
        assert!(is_legal(&b, CastlingRights::FRESH, Color::White, CastlingSide::Queen));

        // No castling out of check
        let b = Board::from_diagram(
            "
            ....r.k.
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
            ",
        )
        .unwrap();
        assert!(!is_legal(&b, CastlingRights::FRESH, Color::White, CastlingSide::King));
        assert!(!is_legal(&b, CastlingRights::FRESH, Color::White, CastlingSide::Queen));
    }

    #[test]
    fn test_missing_rook() {
        let b = Board::from_diagram(
            "
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..n
            ",
        )
        .unwrap();
        assert!(!is_legal(&b, CastlingRights::FRESH, Color::White, CastlingSide::King));
        assert!(is_legal(&b, CastlingRights::FRESH, Color::White, CastlingSide::Queen));
    }

    #[test]
    fn test_apply() {
        let mut b = Board::from_diagram(
            "r...k..r/......../......../......../......../......../......../R...K..R",
        )
        .unwrap();
        apply(&mut b, Color::White, CastlingSide::King);
        apply(&mut b, Color::Black, CastlingSide::Queen);
        assert_eq!(
            b.to_string(),
            "..kr...r/......../......../......../......../......../......../R....RK."
        );
        assert_eq!(b.piece_count(), 6);
    }
}
