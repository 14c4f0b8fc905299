//! Static evaluation
//!
//! The score is material plus a piece-square bonus, counted positive for White and negative
//! for Black.

use crate::board::Board;
use crate::types::{Color, PieceKind, Square};

/// Evaluation score, in centipawns, from White's point of view
pub type Score = i32;

/// Material values, indexed by [`PieceKind::index()`]
pub const PIECE_VALUES: [Score; PieceKind::COUNT] = [100, 320, 330, 500, 900, 20000];

/// Material points of each piece kind, used for the material readout of a game
pub const MATERIAL_POINTS: [u32; PieceKind::COUNT] = [1, 3, 3, 5, 9, 0];

/// Material points of both sides
///
/// Each side is credited with its pieces on the board plus the pieces it has captured.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct MaterialBalance {
    pub white: u32,
    pub black: u32,
}

impl MaterialBalance {
    #[inline]
    pub fn get(&self, c: Color) -> u32 {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline]
    pub fn add(&mut self, c: Color, kind: PieceKind) {
        let points = MATERIAL_POINTS[kind.index()];
        match c {
            Color::White => self.white += points,
            Color::Black => self.black += points,
        }
    }

    /// Share of color `c` in the total points, in percent rounded to the nearest integer
    ///
    /// The shares of both colors add up to 100. With no material at all, each side gets 50.
    pub fn percent(&self, c: Color) -> u32 {
        let total = self.white + self.black;
        if total == 0 {
            return 50;
        }
        let white = (self.white * 200 + total) / (total * 2);
        match c {
            Color::White => white,
            Color::Black => 100 - white,
        }
    }
}

type Table = [[Score; 8]; 8];

const PAWN_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

const QUEEN_TABLE: Table = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

const KING_TABLE: Table = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

const TABLES: [&Table; PieceKind::COUNT] = [
    &PAWN_TABLE,
    &KNIGHT_TABLE,
    &BISHOP_TABLE,
    &ROOK_TABLE,
    &QUEEN_TABLE,
    &KING_TABLE,
];

/// How Black's pieces read the piece-square tables
///
/// The tables are written from White's side of the board, with row 0 being the far rank.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum TableOrientation {
    /// Black reads the tables flipped vertically, so both sides get the same bonus for
    /// mirrored positions
    #[default]
    Mirrored,
    /// Both colors read the tables as written
    Shared,
}

/// Returns the piece-square bonus for a piece of kind `kind` and color `color` on `sq`
#[inline]
pub fn square_bonus(kind: PieceKind, color: Color, sq: Square, orient: TableOrientation) -> Score {
    let row = match (color, orient) {
        (Color::Black, TableOrientation::Mirrored) => 7 - sq.row(),
        _ => sq.row(),
    };
    TABLES[kind.index()][row][sq.col()]
}

/// Evaluates the board `b` from White's point of view
pub fn evaluate(b: &Board, orient: TableOrientation) -> Score {
    b.pieces()
        .map(|(sq, p)| {
            let value = PIECE_VALUES[p.kind.index()] + square_bonus(p.kind, p.color, sq, orient);
            match p.color {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum()
}
