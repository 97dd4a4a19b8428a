//! Game state and the move protocol

use crate::bitboard::Bitboard;
use crate::board::{Board, KingNotFound, Pretty, PrettyStyle, ValidateError};
use crate::moves::{Move, MoveError, MoveKind, MoveRecord, MoveResult, PromotePiece};
use crate::rules::{self, Reach};
use crate::types::{CastlingRights, CastlingSide, Cell, Color, Coord, HomePiece, Outcome, Piece};
use crate::{attack, castling, geometry, legal};

use arrayvec::ArrayVec;

/// Source of promotion choices
///
/// When a pawn reaches the last rank, [`BaseGameState::attempt_move()`] asks the promoter which
/// piece the pawn becomes. Answers other than knight, bishop, rook or queen (including `None`)
/// are treated as queen.
///
/// Closures `FnMut(Color) -> Option<Piece>` are promoters, too.
pub trait Promoter {
    /// Chooses the piece for a promoting pawn of color `color`
    fn choose_promotion(&mut self, color: Color) -> Option<Piece>;
}

/// Promoter which always chooses a queen
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AutoQueen;

impl Promoter for AutoQueen {
    #[inline]
    fn choose_promotion(&mut self, _color: Color) -> Option<Piece> {
        Some(Piece::Queen)
    }
}

impl<F: FnMut(Color) -> Option<Piece>> Promoter for F {
    #[inline]
    fn choose_promotion(&mut self, color: Color) -> Option<Piece> {
        self(color)
    }
}

/// Position before a move, restored if the move cannot be completed
struct Undo {
    board: Board,
    castling: CastlingRights,
}

/// Game with the default promoter, which always promotes to queen
pub type GameState = BaseGameState<AutoQueen>;

type CapturedList = ArrayVec<Piece, 64>;

/// State of a single game
///
/// Owns the board, the side to move, the castling flags, and everything that happened during the
/// game so far. The only way to change it is [`BaseGameState::attempt_move()`].
///
/// # Example
///
/// ```
/// # use chessrules::{GameState, MoveResult, Outcome, Color};
/// #
/// let mut game = GameState::new();
/// let res = game.attempt_move("e2".parse().unwrap(), "e4".parse().unwrap());
/// assert_eq!(res, Ok(MoveResult::Applied(Outcome::Ongoing)));
/// assert_eq!(game.side(), Color::Black);
///
/// // Knights cannot move like this
/// let res = game.attempt_move("g8".parse().unwrap(), "g6".parse().unwrap());
/// assert_eq!(res, Ok(MoveResult::RejectedIllegalMove));
/// assert_eq!(game.side(), Color::Black);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseGameState<P: Promoter> {
    board: Board,
    side: Color,
    castling: CastlingRights,
    outcome: Outcome,
    captured: [CapturedList; 2],
    history: Vec<MoveRecord>,
    promoter: P,
}

impl<P: Promoter + Default> BaseGameState<P> {
    /// Starts a new game from the initial position
    pub fn new() -> Self {
        Self::with_promoter(P::default())
    }
}

impl<P: Promoter + Default> Default for BaseGameState<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Promoter> BaseGameState<P> {
    /// Starts a new game from the initial position, with the given promoter
    pub fn with_promoter(promoter: P) -> Self {
        BaseGameState {
            board: Board::initial(),
            side: Color::White,
            castling: CastlingRights::FRESH,
            outcome: Outcome::Ongoing,
            captured: [CapturedList::new(), CapturedList::new()],
            history: Vec::new(),
            promoter,
        }
    }

    /// Starts a game from an arbitrary position
    ///
    /// The board must contain exactly one king of each color, and the king of the side not to move
    /// must not be under attack. Castling flags are taken as is, but
    /// castling additionally requires the king and the rook to stand on their home squares.
    ///
    /// # Example
    ///
    /// ```
    /// # use chessrules::{game::BaseGameState, Board, CastlingRights, Color, Piece};
    /// #
    /// let b = Board::from_diagram(
    ///     "....k.../P......./......../......../......../......../......../....K...",
    /// )
    /// .unwrap();
    /// let mut game = BaseGameState::from_position(
    ///     b,
    ///     Color::White,
    ///     CastlingRights::SPENT,
    ///     |_: Color| Some(Piece::Knight),
    /// )
    /// .unwrap();
    /// game.attempt_move("a7".parse().unwrap(), "a8".parse().unwrap()).unwrap();
    /// assert_eq!(game.board().to_string().get(0..1), Some("N"));
    /// ```
    pub fn from_position(
        mut board: Board,
        side: Color,
        castling: CastlingRights,
        promoter: P,
    ) -> Result<Self, ValidateError> {
        board.validate()?;
        let opponent_king = board.find_king(side.inv())?;
        if attack::is_cell_attacked(&board, opponent_king, side) {
            return Err(ValidateError::OpponentKingAttacked);
        }
        let outcome = legal::calc_outcome(&mut board, side)?;
        Ok(BaseGameState {
            board,
            side,
            castling,
            outcome,
            captured: [CapturedList::new(), CapturedList::new()],
            history: Vec::new(),
            promoter,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the state of the game for the side to move
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the pieces of color `c` captured so far, in the order of capture
    #[inline]
    pub fn captured(&self, c: Color) -> &[Piece] {
        &self.captured[c.index()]
    }

    /// Returns all the moves made so far
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    #[inline]
    pub fn promoter(&self) -> &P {
        &self.promoter
    }

    /// Returns the squares holding pieces of color `c`
    ///
    /// Meant for restricting which pieces the player may pick up.
    #[inline]
    pub fn selectable_pieces(&self, c: Color) -> Bitboard {
        self.board.color(c)
    }

    /// Returns the position of the king of color `c` if it is in check
    pub fn checked_king(&self, c: Color) -> Result<Option<Coord>, KingNotFound> {
        let king = self.board.find_king(c)?;
        Ok(attack::is_cell_attacked(&self.board, king, c.inv()).then_some(king))
    }

    /// Returns the pieces giving check to the side to move
    pub fn checkers(&self) -> Result<Bitboard, KingNotFound> {
        legal::checkers(&self.board, self.side)
    }

    /// Returns the squares where the piece on `src` can legally move, castling included
    pub fn legal_destinations(&self, src: Coord) -> Result<Bitboard, MoveError> {
        if self.board.is_empty(src) {
            return Err(MoveError::NoPieceAtSquare(src));
        }
        let mut board = self.board.clone();
        Ok(legal::legal_destinations(&mut board, self.castling, src)?)
    }

    /// Wraps the game to pretty-print the board, marking the side to move
    ///
    /// See [`Board::pretty()`] for details.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.board.pretty_with_side(style, self.side)
    }

    /// Tries to move the piece from `src` to `dst`
    ///
    /// King moves from the home square to `g1`/`c1` (or `g8`/`c8`) are castling. When a pawn
    /// reaches the last rank, the promoter is asked for the new piece.
    ///
    /// If the move is rejected, nothing in the game changes. Whether the piece on `src` belongs
    /// to the side to move is not checked: use [`BaseGameState::selectable_pieces()`] for that.
    /// Once the game is finished, all the moves are rejected.
    ///
    /// # Errors
    ///
    /// [`MoveError::NoPieceAtSquare`] if `src` is empty, and [`MoveError::KingNotFound`] if one of
    /// the kings disappeared from the board, which is possible only with a broken position.
    pub fn attempt_move(&mut self, src: Coord, dst: Coord) -> Result<MoveResult, MoveError> {
        let (color, piece) = self
            .board
            .get(src)
            .parts()
            .ok_or(MoveError::NoPieceAtSquare(src))?;
        if self.outcome.is_finished() {
            return Ok(MoveResult::RejectedIllegalMove);
        }

        if piece == Piece::King {
            if let Some(s) = castling::side_of(color, src, dst) {
                if castling::is_legal(&self.board, self.castling, color, s) {
                    return self.do_castling(color, s, src, dst);
                }
            }
        }

        if !rules::is_pseudo_legal(&self.board, color, piece, src, dst, Reach::Move) {
            return Ok(MoveResult::RejectedIllegalMove);
        }
        if legal::would_leave_king_in_check(&mut self.board, src, dst, self.side)? {
            return Ok(MoveResult::RejectedSelfCheck);
        }

        let mut kind = MoveKind::Simple;
        let mut cell = Cell::from_parts(color, piece);
        if piece == Piece::Pawn && dst.rank() == geometry::promote_dst_rank(color) {
            let promote = PromotePiece::from_choice(self.promoter.choose_promotion(color));
            kind = promote.into();
            cell = Cell::from_parts(color, promote.into());
        }

        let undo = Undo {
            board: self.board.clone(),
            castling: self.castling,
        };
        let captured = self.board.get(dst).parts();
        self.board.put(src, Cell::EMPTY);
        self.board.put(dst, cell);
        self.update_castling(color, piece, src, dst);

        self.finish_move(
            MoveRecord {
                mv: Move::new(kind, src, dst),
                color,
                piece,
                captured: captured.map(|(_, p)| p),
            },
            undo,
        )
    }

    fn do_castling(
        &mut self,
        c: Color,
        s: CastlingSide,
        src: Coord,
        dst: Coord,
    ) -> Result<MoveResult, MoveError> {
        let undo = Undo {
            board: self.board.clone(),
            castling: self.castling,
        };
        castling::apply(&mut self.board, c, s);
        self.castling.mark_moved(c, HomePiece::King);
        self.castling.mark_moved(c, HomePiece::rook(s));
        self.finish_move(
            MoveRecord {
                mv: Move::new(s.into(), src, dst),
                color: c,
                piece: Piece::King,
                captured: None,
            },
            undo,
        )
    }

    fn update_castling(&mut self, c: Color, piece: Piece, src: Coord, dst: Coord) {
        if piece == Piece::King {
            self.castling.mark_moved(c, HomePiece::King);
        }
        for color in [Color::White, Color::Black] {
            for s in [CastlingSide::King, CastlingSide::Queen] {
                let home = geometry::castling_rook_src(color, s);
                if src == home || dst == home {
                    self.castling.mark_moved(color, HomePiece::rook(s));
                }
            }
        }
    }

    fn finish_move(&mut self, record: MoveRecord, undo: Undo) -> Result<MoveResult, MoveError> {
        let outcome = match legal::calc_outcome(&mut self.board, self.side.inv()) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.board = undo.board;
                self.castling = undo.castling;
                return Err(e.into());
            }
        };
        if let Some(p) = record.captured {
            self.captured[record.color.inv().index()].push(p);
        }
        self.side = self.side.inv();
        self.outcome = outcome;
        self.history.push(record);
        #[cfg(feature = "selftest")]
        self.selftest();
        Ok(MoveResult::Applied(outcome))
    }

    #[cfg(feature = "selftest")]
    fn selftest(&self) {
        if let Err(e) = self.board.validate() {
            panic!("board is broken after move {}: {}", self.history.len(), e);
        }
    }
}
