//! Board and related things

use crate::bitboard::Bitboard;
use crate::types::{Cell, Color, Coord, File, Piece, Rank};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error indicating that the king of the given color is missing from the board
///
/// A well-formed game always has exactly one king of each color, so this error means that the
/// board was broken by the caller.
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
#[error("no king of color {0:?}")]
pub struct KingNotFound(pub Color);

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// One of the sides doesn't have a king
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// The king of the side not to move is under attack
    #[error("opponent's king is attacked")]
    OpponentKingAttacked,
}

impl From<KingNotFound> for ValidateError {
    #[inline]
    fn from(e: KingNotFound) -> Self {
        ValidateError::NoKing(e.0)
    }
}

/// Error parsing a board diagram
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum DiagramParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Chess board
///
/// The board is a plain grid of 64 cells. Alongside the cells it keeps the sets of squares
/// occupied by each color, so that all the pieces of one side can be enumerated without scanning
/// the grid. Both are updated together by [`Board::put()`].
///
/// The board doesn't know whose move it is and doesn't track castling; see
/// [`GameState`](crate::game::GameState) for that.
///
/// # Example
///
/// ```
/// # use chessrules::{Board, Cell, Color, Coord, File, Piece, Rank};
/// #
/// let mut b = Board::empty();
/// b.put2(File::B, Rank::R2, Cell::from_parts(Color::White, Piece::King));
/// b.put2(File::D, Rank::R5, Cell::from_parts(Color::Black, Piece::King));
///
/// assert_eq!(b.find_king(Color::White), Ok(Coord::from_parts(File::B, Rank::R2)));
/// assert!(b.is_empty(Coord::from_parts(File::A, Rank::R1)));
/// assert_eq!(b.piece_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; 64],
    white: Bitboard,
    black: Bitboard,
}

impl Board {
    /// Returns an empty board
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; 64],
            white: Bitboard::EMPTY,
            black: Bitboard::EMPTY,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::Rook));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Queen));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::King));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::Rook));
        }
        res
    }

    /// Parses a board from a diagram
    ///
    /// Does the same as [`Board::from_str`]. See the [`Display`] implementation for the format.
    #[inline]
    pub fn from_diagram(s: &str) -> Result<Board, DiagramParseError> {
        Board::from_str(s)
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        unsafe { *self.cells.get_unchecked(c.index()) }
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` to the square with coordinate `c`
    ///
    /// Putting [`Cell::EMPTY`] clears the square.
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        if let Some(old) = self.get(c).color() {
            self.color_mut(old).unset(c);
        }
        if let Some(new) = cell.color() {
            self.color_mut(new).set(c);
        }
        unsafe {
            *self.cells.get_unchecked_mut(c.index()) = cell;
        }
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Returns `true` if the square with coordinate `c` holds no piece
    #[inline]
    pub fn is_empty(&self, c: Coord) -> bool {
        self.get(c).is_empty()
    }

    /// Returns the set of squares occupied by pieces of color `c`
    #[inline]
    pub fn color(&self, c: Color) -> Bitboard {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline]
    fn color_mut(&mut self, c: Color) -> &mut Bitboard {
        match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Returns the set of all the occupied squares
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.white | self.black
    }

    /// Returns the set of squares holding pieces of color `c` and kind `p`
    pub fn piece2(&self, c: Color, p: Piece) -> Bitboard {
        let cell = Cell::from_parts(c, p);
        self.color(c)
            .into_iter()
            .filter(|&coord| self.get(coord) == cell)
            .collect()
    }

    /// Returns the total number of pieces on the board
    #[inline]
    pub fn piece_count(&self) -> u32 {
        self.occupied().popcount()
    }

    /// Returns the position of the king of color `c`
    ///
    /// If there are several kings of this color, the one with the smallest square index is
    /// returned. Use [`Board::validate()`] to make sure it doesn't happen.
    #[inline]
    pub fn find_king(&self, c: Color) -> Result<Coord, KingNotFound> {
        let king = Cell::from_parts(c, Piece::King);
        self.color(c)
            .into_iter()
            .find(|&coord| self.get(coord) == king)
            .ok_or(KingNotFound(c))
    }

    /// Checks that each side has exactly one king
    pub fn validate(&self) -> Result<(), ValidateError> {
        for color in [Color::White, Color::Black] {
            match self.piece2(color, Piece::King).popcount() {
                0 => return Err(ValidateError::NoKing(color)),
                1 => {}
                _ => return Err(ValidateError::TooManyKings(color)),
            }
        }
        Ok(())
    }

    /// Wraps the board to allow pretty-printing with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use chessrules::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    ///
    /// let res = r#"
    /// 8│♜♞♝♛♚♝♞♜
    /// 7│♟♟♟♟♟♟♟♟
    /// 6│........
    /// 5│........
    /// 4│........
    /// 3│........
    /// 2│♙♙♙♙♙♙♙♙
    /// 1│♖♘♗♕♔♗♘♖
    /// ─┼────────
    ///  │abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Utf8).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty {
            board: self,
            side: None,
            style,
        }
    }

    /// Same as [`Board::pretty()`], but also marks the side to move `side` in the lower left corner
    #[inline]
    pub fn pretty_with_side(&self, style: PrettyStyle, side: Color) -> Pretty<'_> {
        Pretty {
            board: self,
            side: Some(side),
            style,
        }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

fn parse_cells(s: &str) -> Result<Board, DiagramParseError> {
    type Error = DiagramParseError;

    let mut board = Board::empty();
    let mut rows = s
        .split(|c: char| c == '/' || c == '\n')
        .map(str::trim)
        .filter(|row| !row.is_empty());
    for rank in Rank::iter() {
        let row = rows.next().ok_or(Error::Underflow)?;
        let mut files = File::iter();
        for ch in row.chars() {
            let cell = Cell::from_char(ch).ok_or(Error::UnexpectedChar(ch))?;
            let file = files.next().ok_or(Error::RankOverflow(rank))?;
            board.put2(file, rank, cell);
        }
        if files.next().is_some() {
            return Err(Error::RankUnderflow(rank));
        }
    }
    if rows.next().is_some() {
        return Err(Error::Overflow);
    }
    Ok(board)
}

impl FromStr for Board {
    type Err = DiagramParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        parse_cells(s)
    }
}

/// Formats the board as a diagram
///
/// The diagram consists of eight rows separated by `/`, starting from rank 8. Each row contains
/// eight cell characters: `PKNBRQ` for White, `pknbrq` for Black and `.` for an empty square.
/// [`Board::from_str`] accepts the same format, and also allows newlines as row separators.
impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank.index() != 0 {
                write!(f, "/")?;
            }
            for file in File::iter() {
                write!(f, "{}", self.get2(file, rank))?;
            }
        }
        Ok(())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrettyStyle {
    /// Use only ASCII characters
    Ascii,
    /// Use Unicode chess pieces and box-drawing characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See [`Board::pretty()`] doc for details.
pub struct Pretty<'a> {
    board: &'a Board,
    side: Option<Color>,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;

    fn cell(c: Cell) -> char;

    fn indicator(c: Option<Color>) -> char {
        match c {
            Some(Color::White) => Self::WHITE_INDICATOR,
            Some(Color::Black) => Self::BLACK_INDICATOR,
            None => ' ',
        }
    }

    fn fmt(b: &Board, side: Option<Color>, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(b.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(side), Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, self.side, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, self.side, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INITIAL: &str =
        "rnbqkbnr/pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR";

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(b.to_string(), INITIAL);
        assert_eq!(Board::from_diagram(INITIAL), Ok(b.clone()));
        assert_eq!(b.piece_count(), 32);
        assert_eq!(b.color(Color::White).popcount(), 16);
        assert_eq!(b.color(Color::Black).popcount(), 16);
        assert_eq!(b.find_king(Color::White), Ok(Coord::from_index(60)));
        assert_eq!(b.find_king(Color::Black), Ok(Coord::from_index(4)));
        assert_eq!(b.validate(), Ok(()));
    }

    #[test]
    fn test_put() {
        let mut b = Board::initial();
        let e2 = Coord::from_parts(File::E, Rank::R2);
        let e4 = Coord::from_parts(File::E, Rank::R4);
        let d7 = Coord::from_parts(File::D, Rank::R7);

        let pawn = b.get(e2);
        b.put(e2, Cell::EMPTY);
        b.put(e4, pawn);
        assert!(b.is_empty(e2));
        assert_eq!(b.get(e4), Cell::from_parts(Color::White, Piece::Pawn));
        assert!(b.color(Color::White).has(e4));
        assert!(!b.color(Color::White).has(e2));

        // Replacing a piece of one color with a piece of another
        b.put(d7, pawn);
        assert!(b.color(Color::White).has(d7));
        assert!(!b.color(Color::Black).has(d7));
        assert_eq!(b.piece_count(), 32);
        assert_eq!(b.color(Color::Black).popcount(), 15);
    }

    #[test]
    fn test_diagram() {
        let b = Board::from_diagram(
            "
            ....k...
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
        assert_eq!(b.piece_count(), 4);
        assert_eq!(
            b.get2(File::H, Rank::R1),
            Cell::from_parts(Color::White, Piece::Rook)
        );
        assert_eq!(
            b.to_string(),
            "....k.../......../......../......../......../......../......../R...K..R"
        );
    }

    #[test]
    fn test_diagram_errors() {
        assert_eq!(
            Board::from_diagram("rnbqkbnr/pppppppp"),
            Err(DiagramParseError::Underflow)
        );
        assert_eq!(
            Board::from_diagram(&format!("{}/........", INITIAL)),
            Err(DiagramParseError::Overflow)
        );
        assert_eq!(
            Board::from_diagram(
                "rnbqkbnr./pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR"
            ),
            Err(DiagramParseError::RankOverflow(Rank::R8))
        );
        assert_eq!(
            Board::from_diagram(
                "rnbqkbnr/ppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR"
            ),
            Err(DiagramParseError::RankUnderflow(Rank::R7))
        );
        assert_eq!(
            Board::from_diagram(
                "rnbqkbnr/pppppppp/...x..../......../......../......../PPPPPPPP/RNBQKBNR"
            ),
            Err(DiagramParseError::UnexpectedChar('x'))
        );
    }

    #[test]
    fn test_validate() {
        let mut b = Board::initial();
        b.put2(File::E, Rank::R8, Cell::EMPTY);
        assert_eq!(b.validate(), Err(ValidateError::NoKing(Color::Black)));
        assert_eq!(b.find_king(Color::Black), Err(KingNotFound(Color::Black)));

        let mut b = Board::initial();
        b.put2(File::D, Rank::R1, Cell::from_parts(Color::White, Piece::King));
        assert_eq!(b.validate(), Err(ValidateError::TooManyKings(Color::White)));
    }

    #[test]
    fn test_pretty_side() {
        let b = Board::initial();
        let s = b.pretty_with_side(PrettyStyle::Ascii, Color::Black).to_string();
        assert!(s.ends_with("B|abcdefgh\n"));
    }
}
