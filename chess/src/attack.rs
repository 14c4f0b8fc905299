//! Attack detection
//!
//! Attacks are traced from the attacked square outward: for each pattern we look where an
//! attacker of the given kind would have to stand, and check whether it actually stands there.
//! Nothing here knows about legality, so the legality code can freely build on top of it.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::types::{Color, Piece, PieceKind, Square};

pub(crate) const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_DELTAS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const DIAG_DIRS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(crate) const LINE_DIRS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Returns the first occupied square along the ray from `sq` in direction `dir`
pub(crate) fn ray_hit(b: &Board, sq: Square, dir: (isize, isize)) -> Option<(Square, Piece)> {
    let mut cur = sq;
    loop {
        cur = cur.try_shift(dir.0, dir.1)?;
        if let Some(p) = b.get(cur) {
            return Some((cur, p));
        }
    }
}

fn do_attackers<const STOP_EARLY: bool>(sq: Square, color: Color, b: &Board) -> Bitboard {
    let mut res = Bitboard::EMPTY;

    macro_rules! found {
        ($at:expr) => {{
            res.set($at);
            if STOP_EARLY {
                return res;
            }
        }};
    }

    // A pawn of `color` attacks `sq` if it stands one row behind it (from its own point of
    // view) on an adjacent column.
    let pawn = Piece::new(color, PieceKind::Pawn);
    let back = -geometry::pawn_forward(color);
    for dc in [-1, 1] {
        if let Some(at) = sq.try_shift(back, dc) {
            if b.get(at) == Some(pawn) {
                found!(at);
            }
        }
    }

    for (deltas, kind) in [
        (&KNIGHT_DELTAS, PieceKind::Knight),
        (&KING_DELTAS, PieceKind::King),
    ] {
        let piece = Piece::new(color, kind);
        for &(dr, dc) in deltas {
            if let Some(at) = sq.try_shift(dr, dc) {
                if b.get(at) == Some(piece) {
                    found!(at);
                }
            }
        }
    }

    for (dirs, kind) in [(&DIAG_DIRS, PieceKind::Bishop), (&LINE_DIRS, PieceKind::Rook)] {
        for &dir in dirs {
            if let Some((at, p)) = ray_hit(b, sq, dir) {
                if p.color == color && (p.kind == kind || p.kind == PieceKind::Queen) {
                    found!(at);
                }
            }
        }
    }

    res
}

/// Returns `true` if the square `sq` is attacked by any piece of color `color`
///
/// The square need not be occupied. Pawns attack only diagonally, so a pawn standing right
/// in front of `sq` does not attack it.
pub fn is_square_attacked(sq: Square, color: Color, b: &Board) -> bool {
    do_attackers::<true>(sq, color, b).is_nonempty()
}

/// Returns the squares of all the pieces of color `color` which attack `sq`
pub fn attackers(sq: Square, color: Color, b: &Board) -> Bitboard {
    do_attackers::<false>(sq, color, b)
}

/// Returns `true` if the king of color `color` is attacked
///
/// A board without such king is reported as being in check.
pub fn is_king_in_check(color: Color, b: &Board) -> bool {
    match b.king_square(color) {
        Some(king) => is_square_attacked(king, color.inv(), b),
        None => true,
    }
}
