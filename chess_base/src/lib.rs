//! # Base types for chessrules
//!
//! This is an auxiliary crate for `chessrules`, which contains the plain value types: squares,
//! pieces, cells, castling flags, outcomes and square sets. It is split from the main crate so the
//! types stay free of any rules logic.
//!
//! Normally you don't want to use this crate directly. Use `chessrules` instead.

pub mod bitboard;
pub mod geometry;
pub mod types;
