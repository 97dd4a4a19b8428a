//! Check detection and legality of moves

use crate::attack;
use crate::bitboard::Bitboard;
use crate::board::{Board, KingNotFound};
use crate::castling;
use crate::geometry;
use crate::rules::{self, Reach};
use crate::types::{CastlingRights, CastlingSide, Cell, Color, Coord, Outcome};

/// Returns `true` if the king of color `c` is attacked
pub fn is_check(b: &Board, c: Color) -> Result<bool, KingNotFound> {
    let king = b.find_king(c)?;
    Ok(attack::is_cell_attacked(b, king, c.inv()))
}

/// Returns the pieces giving check to the king of color `c`
pub fn checkers(b: &Board, c: Color) -> Result<Bitboard, KingNotFound> {
    let king = b.find_king(c)?;
    Ok(attack::cell_attackers(b, king, c.inv()))
}

/// Temporarily makes moves on a board to see whether they expose the king
///
/// Each simulated move is taken back before the checker returns, so the board is the same
/// afterwards, whatever the result is.
struct Checker<'a> {
    board: &'a mut Board,
    side: Color,
}

struct Undo {
    src: Cell,
    dst: Cell,
}

impl<'a> Checker<'a> {
    fn new(board: &'a mut Board, side: Color) -> Self {
        Checker { board, side }
    }

    fn make_move(&mut self, src: Coord, dst: Coord) -> Undo {
        let undo = Undo {
            src: self.board.get(src),
            dst: self.board.get(dst),
        };
        self.board.put(dst, undo.src);
        self.board.put(src, Cell::EMPTY);
        undo
    }

    fn unmake_move(&mut self, src: Coord, dst: Coord, u: Undo) {
        self.board.put(src, u.src);
        self.board.put(dst, u.dst);
    }

    fn leaves_check(&mut self, src: Coord, dst: Coord) -> Result<bool, KingNotFound> {
        let u = self.make_move(src, dst);
        let res = is_check(self.board, self.side);
        self.unmake_move(src, dst, u);
        res
    }

    fn is_legal(&mut self, src: Coord, dst: Coord) -> Result<bool, KingNotFound> {
        let (color, piece) = match self.board.get(src).parts() {
            Some(parts) => parts,
            None => return Ok(false),
        };
        if !rules::is_pseudo_legal(self.board, color, piece, src, dst, Reach::Move) {
            return Ok(false);
        }
        Ok(!self.leaves_check(src, dst)?)
    }
}

/// Returns `true` if moving the piece from `src` to `dst` leaves the king of color `c` in check
///
/// The move is simulated on `b` and then taken back, so `b` is unchanged when the function
/// returns, even on error. The move itself is not validated.
///
/// # Example
///
/// ```
/// # use chessrules::{legal, Board, Color};
/// #
/// let mut b = Board::from_diagram(
///     "....k.../....r.../......../......../......../......../....B.../....K...",
/// )
/// .unwrap();
/// let before = b.clone();
///
/// // The bishop is pinned
/// let e2 = "e2".parse().unwrap();
/// let d3 = "d3".parse().unwrap();
/// assert_eq!(legal::would_leave_king_in_check(&mut b, e2, d3, Color::White), Ok(true));
/// assert_eq!(b, before);
/// ```
pub fn would_leave_king_in_check(
    b: &mut Board,
    src: Coord,
    dst: Coord,
    c: Color,
) -> Result<bool, KingNotFound> {
    Checker::new(b, c).leaves_check(src, dst)
}

/// Returns `true` if the side `c` has at least one legal move
///
/// Castling is not tried: whenever castling is legal, the king can also legally make a single
/// step towards the rook, so the answer doesn't change.
pub fn has_legal_moves(b: &mut Board, c: Color) -> Result<bool, KingNotFound> {
    let mut checker = Checker::new(b, c);
    for src in checker.board.color(c) {
        for dst in Coord::iter() {
            if checker.is_legal(src, dst)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Returns all the squares where the piece on `src` can legally go, castling included
///
/// If `src` is empty, the result is empty. The piece is moved as if it was its side's turn.
pub fn legal_destinations(
    b: &mut Board,
    rights: CastlingRights,
    src: Coord,
) -> Result<Bitboard, KingNotFound> {
    let c = match b.get(src).color() {
        Some(c) => c,
        None => return Ok(Bitboard::EMPTY),
    };
    let mut res = Bitboard::EMPTY;
    {
        let mut checker = Checker::new(b, c);
        for dst in Coord::iter() {
            if checker.is_legal(src, dst)? {
                res.set(dst);
            }
        }
    }
    for s in [CastlingSide::King, CastlingSide::Queen] {
        let dst = geometry::castling_king_dst(c, s);
        if castling::side_of(c, src, dst) == Some(s) && castling::is_legal(b, rights, c, s) {
            res.set(dst);
        }
    }
    Ok(res)
}

/// Classifies the position for the side to move `side`
pub fn calc_outcome(b: &mut Board, side: Color) -> Result<Outcome, KingNotFound> {
    let check = is_check(b, side)?;
    let can_move = has_legal_moves(b, side)?;
    Ok(match (check, can_move) {
        (true, true) => Outcome::Check(side),
        (true, false) => Outcome::Checkmate { winner: side.inv() },
        (false, true) => Outcome::Ongoing,
        (false, false) => Outcome::Stalemate,
    })
}
