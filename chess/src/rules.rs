//! Per-piece movement rules

use crate::board::Board;
use crate::geometry;
use crate::types::{Color, Coord, Piece};

/// What a movement check is asked for
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Reach {
    /// Whether the piece may actually move to the destination
    Move,
    /// Whether the piece attacks the destination
    ///
    /// The contents of the destination are ignored, and pawns reach only their diagonal capture
    /// squares.
    Attack,
}

/// Returns `true` if a piece `piece` of color `color` standing on `src` can reach `dst`
///
/// The check is purely geometric: it doesn't verify that `src` actually holds such a piece and
/// doesn't care whether the move leaves the king in check. Castling is not a king move here.
///
/// # Example
///
/// ```
/// # use chessrules::{Board, Color, Piece};
/// # use chessrules::rules::{self, Reach};
/// #
/// let b = Board::initial();
/// let e2 = "e2".parse().unwrap();
/// let e4 = "e4".parse().unwrap();
/// let d3 = "d3".parse().unwrap();
///
/// assert!(rules::is_pseudo_legal(&b, Color::White, Piece::Pawn, e2, e4, Reach::Move));
/// assert!(!rules::is_pseudo_legal(&b, Color::White, Piece::Pawn, e2, d3, Reach::Move));
/// assert!(rules::is_pseudo_legal(&b, Color::White, Piece::Pawn, e2, d3, Reach::Attack));
/// ```
pub fn is_pseudo_legal(
    b: &Board,
    color: Color,
    piece: Piece,
    src: Coord,
    dst: Coord,
    reach: Reach,
) -> bool {
    if src == dst {
        return false;
    }
    if reach == Reach::Move && b.get(dst).color() == Some(color) {
        return false;
    }

    let delta_file = dst.file().index() as isize - src.file().index() as isize;
    let delta_rank = dst.rank().index() as isize - src.rank().index() as isize;
    let (abs_file, abs_rank) = (delta_file.abs(), delta_rank.abs());

    match piece {
        Piece::Pawn => is_pawn_reachable(b, color, src, dst, delta_file, delta_rank, reach),
        Piece::King => abs_file <= 1 && abs_rank <= 1,
        Piece::Knight => matches!((abs_file, abs_rank), (1, 2) | (2, 1)),
        Piece::Bishop => abs_file == abs_rank && clear_path(b, src, dst),
        Piece::Rook => (delta_file == 0 || delta_rank == 0) && clear_path(b, src, dst),
        Piece::Queen => {
            (abs_file == abs_rank || delta_file == 0 || delta_rank == 0) && clear_path(b, src, dst)
        }
    }
}

fn is_pawn_reachable(
    b: &Board,
    color: Color,
    src: Coord,
    dst: Coord,
    delta_file: isize,
    delta_rank: isize,
    reach: Reach,
) -> bool {
    let forward = geometry::pawn_forward_delta(color);
    if delta_file.abs() == 1 && delta_rank == forward {
        return match reach {
            Reach::Attack => true,
            Reach::Move => b.get(dst).color() == Some(color.inv()),
        };
    }
    if reach == Reach::Attack || delta_file != 0 {
        return false;
    }
    if delta_rank == forward {
        return b.is_empty(dst);
    }
    if delta_rank == 2 * forward && src.rank() == geometry::pawn_home_rank(color) {
        return match src.try_shift(0, forward) {
            Some(mid) => b.is_empty(mid) && b.is_empty(dst),
            None => false,
        };
    }
    false
}

/// Returns `true` if all the squares strictly between `src` and `dst` are empty
///
/// The walk goes in unit steps towards `dst`, so the result makes sense only when `src` and
/// `dst` lie on one line or diagonal. If the walk leaves the board without hitting `dst`,
/// `false` is returned.
pub fn clear_path(b: &Board, src: Coord, dst: Coord) -> bool {
    let step_file = (dst.file().index() as isize - src.file().index() as isize).signum();
    let step_rank = (dst.rank().index() as isize - src.rank().index() as isize).signum();
    let mut cur = src;
    loop {
        cur = match cur.try_shift(step_file, step_rank) {
            Some(next) => next,
            None => return false,
        };
        if cur == dst {
            return true;
        }
        if !b.is_empty(cur) {
            return false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn can_move(b: &Board, src: &str, dst: &str) -> bool {
        let (color, piece) = b.get(c(src)).parts().unwrap();
        is_pseudo_legal(b, color, piece, c(src), c(dst), Reach::Move)
    }

    fn can_attack(b: &Board, src: &str, dst: &str) -> bool {
        let (color, piece) = b.get(c(src)).parts().unwrap();
        is_pseudo_legal(b, color, piece, c(src), c(dst), Reach::Attack)
    }

    #[test]
    fn test_pawn() {
        let b = Board::from_diagram(
            "
            ....k...
            ..p.....
            ...P....
            ........
            ........
            ...p....
            ....P...
            ....K...
            ",
        )
        .unwrap();

        assert!(can_move(&b, "e2", "e3"));
        assert!(can_move(&b, "e2", "e4"));
        assert!(can_move(&b, "e2", "d3"));
        assert!(!can_move(&b, "e2", "f3"));
        assert!(!can_move(&b, "e2", "e5"));
        assert!(!can_move(&b, "e2", "e1"));

        // Black pawn moves downwards
        assert!(can_move(&b, "c7", "c6"));
        assert!(can_move(&b, "c7", "c5"));
        assert!(can_move(&b, "c7", "d6"));
        assert!(!can_move(&b, "c7", "b6"));
        assert!(!can_move(&b, "c7", "c8"));

        // Double step only from the home rank
        assert!(can_move(&b, "d6", "d7"));
        assert!(!can_move(&b, "d6", "d8"));
        assert!(!can_move(&b, "d3", "d1"));
        assert!(can_move(&b, "d3", "e2"));
    }

    #[test]
    fn test_pawn_blocked() {
        let b = Board::from_diagram(
            "
            ....k...
            ........
            ........
            ........
            ........
            ....n...
            ....P..P
            ....K..r
            ",
        )
        .unwrap();
        assert!(!can_move(&b, "e2", "e3"));
        assert!(!can_move(&b, "e2", "e4"));
        assert!(can_move(&b, "h2", "h4"));
        assert!(!can_move(&b, "h2", "h1"));
    }

    #[test]
    fn test_pawn_attack() {
        let b = Board::from_diagram(
            "
            ....k...
            ........
            ........
            ........
            ........
            ........
            P...P...
            ....K...
            ",
        )
        .unwrap();
        assert!(can_attack(&b, "e2", "d3"));
        assert!(can_attack(&b, "e2", "f3"));
        assert!(!can_attack(&b, "e2", "e3"));
        assert!(!can_attack(&b, "e2", "e4"));
        assert!(!can_attack(&b, "e2", "d1"));
        assert!(can_attack(&b, "a2", "b3"));
        assert!(!can_attack(&b, "a2", "h3"));
    }

    #[test]
    fn test_sliders() {
        let b = Board::from_diagram(
            "
            ....k...
            ........
            ........
            ...p....
            ........
            .B...n..
            ........
            R...K..Q
            ",
        )
        .unwrap();

        assert!(can_move(&b, "a1", "a8"));
        assert!(can_move(&b, "a1", "d1"));
        assert!(!can_move(&b, "a1", "e1"));
        assert!(!can_move(&b, "a1", "h1"));
        assert!(!can_move(&b, "a1", "b2"));

        assert!(can_move(&b, "b3", "d5"));
        assert!(!can_move(&b, "b3", "e6"));
        assert!(can_move(&b, "b3", "a2"));
        assert!(can_move(&b, "b3", "d1"));
        assert!(!can_move(&b, "b3", "b4"));

        assert!(can_move(&b, "h1", "h8"));
        assert!(can_move(&b, "h1", "f3"));
        assert!(!can_move(&b, "h1", "e4"));
        assert!(can_move(&b, "h1", "f1"));
        assert!(!can_move(&b, "h1", "d1"));
        assert!(!can_move(&b, "h1", "g3"));
    }

    #[test]
    fn test_leapers() {
        let b = Board::initial();
        assert!(can_move(&b, "g1", "f3"));
        assert!(can_move(&b, "g1", "h3"));
        assert!(!can_move(&b, "g1", "e2"));
        assert!(!can_move(&b, "g1", "g3"));

        assert!(!can_move(&b, "e1", "e2"));
        assert!(!can_move(&b, "e1", "g1"));
        assert!(can_attack(&b, "e1", "e2"));
        assert!(can_attack(&b, "e1", "d2"));
    }

    #[test]
    fn test_same_square() {
        let b = Board::initial();
        for sq in ["a1", "b1", "c1", "d1", "e1", "e2"] {
            assert!(!can_move(&b, sq, sq));
            assert!(!can_attack(&b, sq, sq));
        }
    }

    #[test]
    fn test_clear_path() {
        let b = Board::initial();
        assert!(clear_path(&b, c("a2"), c("a7")));
        assert!(!clear_path(&b, c("a1"), c("a8")));
        assert!(clear_path(&b, c("c1"), c("d2")));
        assert!(clear_path(&b, c("b2"), c("g7")));
        assert!(!clear_path(&b, c("a1"), c("c1")));
        // Not on one line: the walk misses the destination and runs off the board
        assert!(!clear_path(
            &Board::empty(),
            Coord::from_parts(File::A, Rank::R1),
            Coord::from_parts(File::B, Rank::R4)
        ));
    }
}
