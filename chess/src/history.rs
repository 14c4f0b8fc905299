//! Move history

use crate::board::Board;
use crate::castling;
use crate::geometry;
use crate::moves::MoveRecord;
use crate::types::{CastlingRights, CastlingSide, Color, Piece, PieceKind, Square};

/// Append-only log of the moves made in a game
///
/// The history is the only source of the en passant target: it is recomputed from the last
/// move, so it exists only right after a pawn advanced two squares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    moves: Vec<MoveRecord>,
}

/// Game state obtained by replaying a prefix of the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    /// Number of moves replayed
    pub ply: usize,
    pub board: Board,
    pub castling: CastlingRights,
    captured: [Vec<Piece>; 2],
}

impl Replay {
    /// Side to move after the replayed moves, given the side which made the first one
    pub fn side(&self, first: Color) -> Color {
        if self.ply % 2 == 0 {
            first
        } else {
            first.inv()
        }
    }

    /// Pieces captured by color `c` so far, in capture order
    pub fn captured_by(&self, c: Color) -> &[Piece] {
        &self.captured[c.index()]
    }
}

impl History {
    #[inline]
    pub fn new() -> History {
        History::default()
    }

    #[inline]
    pub fn push(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&MoveRecord> {
        self.moves.get(idx)
    }

    #[inline]
    pub fn as_slice(&self) -> &[MoveRecord] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> + '_ {
        self.moves.iter()
    }

    /// Returns the square a pawn may capture onto en passant, if any
    ///
    /// This is the square passed over by the last move, if it was a pawn double step.
    pub fn en_passant_target(&self) -> Option<Square> {
        let last = self.moves.last()?;
        if !last.is_double_step() {
            return None;
        }
        Square::new((last.from.row() + last.to.row()) / 2, last.from.col())
    }

    /// Returns `true` if a rook of color `c` has ever moved away from its home square on side `s`
    pub fn rook_left_home(&self, c: Color, s: CastlingSide) -> bool {
        let rook = Piece::new(c, PieceKind::Rook);
        let home = geometry::rook_home(c, s);
        self.moves.iter().any(|mv| mv.piece == rook && mv.from == home)
    }

    /// Returns the pieces captured by color `c`, in capture order
    pub fn captured_by(&self, c: Color) -> impl Iterator<Item = Piece> + '_ {
        self.moves
            .iter()
            .filter(move |mv| mv.piece.color == c)
            .filter_map(|mv| mv.captured)
    }

    /// Replays the first `ply` moves starting from `start` with castling rights `rights`
    ///
    /// If `ply` exceeds the length of the history, the whole history is replayed.
    pub fn replay(&self, start: &Board, rights: CastlingRights, ply: usize) -> Replay {
        let mut res = Replay {
            ply: 0,
            board: *start,
            castling: rights,
            captured: [Vec::new(), Vec::new()],
        };
        for mv in self.moves.iter().take(ply) {
            res.board = res.board.apply(mv);
            res.castling = castling::update(res.castling, mv);
            if let Some(captured) = mv.captured {
                res.captured[mv.piece.color.index()].push(captured);
            }
            res.ply += 1;
        }
        res
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a MoveRecord;
    type IntoIter = std::slice::Iter<'a, MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl FromIterator<MoveRecord> for History {
    fn from_iter<I: IntoIterator<Item = MoveRecord>>(iter: I) -> Self {
        History {
            moves: iter.into_iter().collect(),
        }
    }
}
