//! Rookery is a small chess rules library with a built-in computer opponent.
//!
//! It decides whether a move is legal given the board, the move history and the castling
//! rights, detects check, checkmate and stalemate, and picks moves with a fixed-depth minimax
//! search with alpha-beta pruning.
//!
//! Boards are plain values. Nothing in the library changes a board in place: [`Board::apply()`]
//! returns a new board, and all the rule functions only read their inputs.
//!
//! # Example
//!
//! ```
//! use rookery::{Game, Outcome, Square};
//! use std::str::FromStr;
//!
//! let sq = |s: &str| Square::from_str(s).unwrap();
//! let mut game = Game::new();
//! game.play(sq("f2"), sq("f3"), None).unwrap();
//! game.play(sq("e7"), sq("e5"), None).unwrap();
//! game.play(sq("g2"), sq("g4"), None).unwrap();
//! game.play(sq("d8"), sq("h4"), None).unwrap();
//! assert_eq!(game.status(), Outcome::Checkmate);
//! ```

pub mod attack;
pub mod board;
pub mod castling;
pub mod eval;
pub mod game;
pub mod history;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod outcome;
pub mod search;

pub use rookery_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::Board;
pub use eval::MaterialBalance;
pub use game::{Game, MoveError};
pub use history::{History, Replay};
pub use legal::Position;
pub use moves::MoveRecord;
pub use outcome::Outcome;
pub use search::{SearchConfig, Searcher};
pub use types::{CastlingRights, CastlingSide, Color, File, Piece, PieceKind, Rank, Square};
