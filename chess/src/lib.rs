//! # Chess rules engine
//!
//! Decides whether a move is legal, applies it (castling and promotion included), and tells
//! whether the side to move is in check, checkmated or stalemated.
//!
//! The main entry point is [`GameState`]. Lower-level building blocks are available in
//! [`rules`], [`attack`], [`castling`] and [`legal`].
//!
//! # Example
//!
//! ```
//! use chessrules::{Color, GameState, Outcome};
//!
//! let mut game = GameState::new();
//! for (src, dst) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     let res = game.attempt_move(src.parse().unwrap(), dst.parse().unwrap()).unwrap();
//!     assert!(res.is_applied());
//! }
//! assert_eq!(game.outcome(), Outcome::Checkmate { winner: Color::Black });
//! ```

pub mod attack;
pub mod board;
pub mod castling;
pub mod game;
pub mod legal;
pub mod moves;
pub mod rules;

pub use chessrules_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::{Board, KingNotFound, ValidateError};
pub use game::{AutoQueen, BaseGameState, GameState, Promoter};
pub use moves::{Move, MoveError, MoveKind, MoveRecord, MoveResult, PromotePiece};
pub use types::{
    CastlingRights, CastlingSide, Cell, Color, Coord, File, HomePiece, Outcome, Piece, Rank,
};
