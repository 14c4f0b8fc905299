//! Move generation
//!
//! Candidate destinations are collected per piece kind into a [`Bitboard`], then every
//! candidate is confirmed by [`legal::is_pseudo_legal()`]. Thus, the generated moves are
//! exactly the ones the legality predicates accept, in square index order.

use crate::attack::{self, DIAG_DIRS, KING_DELTAS, KNIGHT_DELTAS, LINE_DIRS};
use crate::bitboard::Bitboard;
use crate::geometry;
use crate::legal::{self, Position};
use crate::moves::MoveRecord;
use crate::types::{Color, Piece, PieceKind, Square};

use arrayvec::ArrayVec;
use std::ops::{Deref, DerefMut};
use tracing::warn;

const MAX_MOVES: usize = 256;

/// List of moves
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList(ArrayVec<MoveRecord, MAX_MOVES>);

impl Deref for MoveList {
    type Target = ArrayVec<MoveRecord, MAX_MOVES>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a MoveRecord;
    type IntoIter = std::slice::Iter<'a, MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = MoveRecord;
    type IntoIter = arrayvec::IntoIter<MoveRecord, MAX_MOVES>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MoveList {
    /// Maximum number of moves in the list
    ///
    /// No position reachable from the initial one has more than 218 legal moves. Arbitrary
    /// boards built with [`Board::put()`](crate::board::Board::put) are not bounded this way, so
    /// generation stops once the list is full.
    pub const CAPACITY: usize = MAX_MOVES;

    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }

    /// Appends `mv`, returning `false` if the list is already full
    fn add(&mut self, mv: MoveRecord) -> bool {
        match self.0.try_push(mv) {
            Ok(()) => true,
            Err(_) => {
                warn!(capacity = Self::CAPACITY, "move list overflow, generation truncated");
                false
            }
        }
    }
}

/// Which promotions to generate for a pawn reaching the last rank
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Promotions {
    /// Knight, bishop, rook and queen, in this order
    #[default]
    All,
    /// Queen only
    QueenOnly,
}

impl Promotions {
    fn kinds(self) -> &'static [PieceKind] {
        match self {
            Promotions::All => &PieceKind::PROMOTIONS,
            Promotions::QueenOnly => &[PieceKind::Queen],
        }
    }
}

fn add_deltas(res: &mut Bitboard, sq: Square, deltas: &[(isize, isize)]) {
    for &(dr, dc) in deltas {
        if let Some(dst) = sq.try_shift(dr, dc) {
            res.set(dst);
        }
    }
}

fn add_rays(res: &mut Bitboard, pos: &Position, sq: Square, dirs: &[(isize, isize)]) {
    for &dir in dirs {
        let stop = attack::ray_hit(&pos.board, sq, dir).map(|(at, _)| at);
        let mut cur = sq;
        while let Some(next) = cur.try_shift(dir.0, dir.1) {
            res.set(next);
            if Some(next) == stop {
                break;
            }
            cur = next;
        }
    }
}

/// Squares which the piece on `sq` may be able to reach, a superset of its pseudo-legal moves
fn candidates(pos: &Position, piece: Piece, sq: Square) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    match piece.kind {
        PieceKind::Pawn => {
            let fwd = geometry::pawn_forward(piece.color);
            add_deltas(&mut res, sq, &[(fwd, 0), (2 * fwd, 0), (fwd, -1), (fwd, 1)]);
        }
        PieceKind::Knight => add_deltas(&mut res, sq, &KNIGHT_DELTAS),
        PieceKind::King => {
            add_deltas(&mut res, sq, &KING_DELTAS);
            add_deltas(&mut res, sq, &[(0, -2), (0, 2)]);
        }
        PieceKind::Bishop => add_rays(&mut res, pos, sq, &DIAG_DIRS),
        PieceKind::Rook => add_rays(&mut res, pos, sq, &LINE_DIRS),
        PieceKind::Queen => {
            add_rays(&mut res, pos, sq, &DIAG_DIRS);
            add_rays(&mut res, pos, sq, &LINE_DIRS);
        }
    }
    res
}

fn for_each_pseudo<F>(pos: &Position, color: Color, promotions: Promotions, mut f: F) -> bool
where
    F: FnMut(MoveRecord) -> bool,
{
    let own = pos.board.color(color);
    for (from, piece) in pos.board.pieces_of(color) {
        for to in candidates(pos, piece, from) & !own {
            if !legal::is_pseudo_legal(pos, piece, from, to) {
                continue;
            }
            let mv = pos.record(piece, from, to);
            if piece.kind == PieceKind::Pawn && to.rank() == geometry::promote_rank(color) {
                for &kind in promotions.kinds() {
                    if !f(mv.promoted_to(kind)) {
                        return false;
                    }
                }
            } else if !f(mv) {
                return false;
            }
        }
    }
    true
}

/// Generates all pseudo-legal moves of color `color`
///
/// Moves are ordered by source square, then by destination square, then by promotion kind.
pub fn gen_pseudo(pos: &Position, color: Color, promotions: Promotions) -> MoveList {
    let mut res = MoveList::new();
    for_each_pseudo(pos, color, promotions, |mv| res.add(mv));
    res
}

/// Generates all legal moves of color `color`, in the same order as [`gen_pseudo()`]
pub fn gen_legal(pos: &Position, color: Color, promotions: Promotions) -> MoveList {
    let mut res = MoveList::new();
    for_each_pseudo(pos, color, promotions, |mv| {
        !legal::is_safe(pos, &mv) || res.add(mv)
    });
    res
}

/// Returns `true` if color `color` has at least one legal move
pub fn has_legal_moves(pos: &Position, color: Color) -> bool {
    !for_each_pseudo(pos, color, Promotions::QueenOnly, |mv| {
        !legal::is_safe(pos, &mv)
    })
}

/// Returns the squares the piece on `from` can legally move to
pub fn legal_destinations(pos: &Position, from: Square) -> Bitboard {
    let piece = match pos.board.get(from) {
        Some(piece) => piece,
        None => return Bitboard::EMPTY,
    };
    candidates(pos, piece, from)
        .into_iter()
        .filter(|&to| legal::is_legal_in(pos, piece, from, to))
        .collect()
}
