//! Moves and results of move attempts

use crate::board::KingNotFound;
use crate::types::{CastlingSide, Color, Coord, Outcome, Piece};

use std::fmt;

use thiserror::Error;

/// Move kind
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Any move or capture, except castling and promotion
    #[default]
    Simple = 0,
    /// Kingside castling
    CastlingKingside = 1,
    /// Queenside castling
    CastlingQueenside = 2,
    /// Pawn promote to knight (either non-capture or capture)
    PromoteKnight = 3,
    /// Pawn promote to bishop (either non-capture or capture)
    PromoteBishop = 4,
    /// Pawn promote to rook (either non-capture or capture)
    PromoteRook = 5,
    /// Pawn promote to queen (either non-capture or capture)
    PromoteQueen = 6,
}

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl PromotePiece {
    /// Converts the answer of a promotion provider into a promotion target
    ///
    /// Anything which is not a valid promotion target (including no answer at all) becomes
    /// [`PromotePiece::Queen`].
    #[inline]
    pub fn from_choice(choice: Option<Piece>) -> PromotePiece {
        choice
            .and_then(|p| PromotePiece::try_from(p).ok())
            .unwrap_or(PromotePiece::Queen)
    }

    fn as_char(self) -> char {
        match self {
            PromotePiece::Knight => 'n',
            PromotePiece::Bishop => 'b',
            PromotePiece::Rook => 'r',
            PromotePiece::Queen => 'q',
        }
    }
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => Piece::Knight,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Queen => Piece::Queen,
        }
    }
}

impl TryFrom<Piece> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: Piece) -> Result<Self, Self::Error> {
        match p {
            Piece::Knight => Ok(PromotePiece::Knight),
            Piece::Bishop => Ok(PromotePiece::Bishop),
            Piece::Rook => Ok(PromotePiece::Rook),
            Piece::Queen => Ok(PromotePiece::Queen),
            _ => Err(()),
        }
    }
}

impl From<CastlingSide> for MoveKind {
    #[inline]
    fn from(side: CastlingSide) -> Self {
        match side {
            CastlingSide::King => Self::CastlingKingside,
            CastlingSide::Queen => Self::CastlingQueenside,
        }
    }
}

impl TryFrom<MoveKind> for CastlingSide {
    type Error = ();

    #[inline]
    fn try_from(kind: MoveKind) -> Result<Self, Self::Error> {
        match kind {
            MoveKind::CastlingKingside => Ok(Self::King),
            MoveKind::CastlingQueenside => Ok(Self::Queen),
            _ => Err(()),
        }
    }
}

impl From<PromotePiece> for MoveKind {
    #[inline]
    fn from(kind: PromotePiece) -> Self {
        match kind {
            PromotePiece::Knight => Self::PromoteKnight,
            PromotePiece::Bishop => Self::PromoteBishop,
            PromotePiece::Rook => Self::PromoteRook,
            PromotePiece::Queen => Self::PromoteQueen,
        }
    }
}

impl TryFrom<MoveKind> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(kind: MoveKind) -> Result<Self, Self::Error> {
        match kind {
            MoveKind::PromoteKnight => Ok(Self::Knight),
            MoveKind::PromoteBishop => Ok(Self::Bishop),
            MoveKind::PromoteRook => Ok(Self::Rook),
            MoveKind::PromoteQueen => Ok(Self::Queen),
            _ => Err(()),
        }
    }
}

impl MoveKind {
    /// Returns the piece after promote if this move kind represents a promote
    ///
    /// Otherwise, returns `None`.
    #[inline]
    pub fn promote(self) -> Option<Piece> {
        let piece: PromotePiece = self.try_into().ok()?;
        Some(piece.into())
    }

    /// Returns the castling side if this move kind represents castling
    #[inline]
    pub fn castling(self) -> Option<CastlingSide> {
        self.try_into().ok()
    }
}

/// Chess move
///
/// Castling is represented as the king move, i.e. `e1g1` or `e8c8`.
///
/// Moves are only produced by [`GameState`](crate::game::GameState) after they are applied, so
/// every `Move` you get from this crate was legal in the position it was made in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    src: Coord,
    dst: Coord,
}

impl Move {
    #[inline]
    pub const fn new(kind: MoveKind, src: Coord, dst: Coord) -> Move {
        Move { kind, src, dst }
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Ok(p) = PromotePiece::try_from(self.kind) {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

/// Applied move together with what it did to the board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    /// The move itself
    pub mv: Move,
    /// Color of the side which made the move
    pub color: Color,
    /// Kind of the moved piece before the move (i.e. [`Piece::Pawn`] for promotions)
    pub piece: Piece,
    /// Captured piece, if any
    pub captured: Option<Piece>,
}

/// Result of [`GameState::attempt_move()`](crate::game::BaseGameState::attempt_move)
///
/// Rejections are normal answers, not errors: the game state is left exactly as it was.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveResult {
    /// The move was made, and the game is now in the given state
    Applied(Outcome),
    /// The piece cannot move this way
    RejectedIllegalMove,
    /// The move would leave the mover's own king in check
    RejectedSelfCheck,
}

impl MoveResult {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(*self, MoveResult::Applied(_))
    }

    /// Returns the outcome if the move was applied
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        match *self {
            MoveResult::Applied(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Error attempting a move
///
/// Unlike [`MoveResult`] rejections, these indicate a bug in the caller or a broken board.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// Source square is empty
    #[error("no piece at square {0}")]
    NoPieceAtSquare(Coord),
    /// King is missing
    #[error(transparent)]
    KingNotFound(#[from] KingNotFound),
}
