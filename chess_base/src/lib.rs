//! # Base types for rookery
//!
//! This is an auxiliary crate for `rookery`, which contains the plain value types used by the rules
//! and the search: squares, pieces, colors, castling rights and square sets. Nothing here knows how
//! the pieces move.
//!
//! Normally you don't want to use this crate directly. Use `rookery` instead, which re-exports
//! everything from here.

pub mod bitboard;
pub mod geometry;
pub mod types;
