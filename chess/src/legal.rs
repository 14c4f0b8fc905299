//! Move legality

use crate::attack;
use crate::board::Board;
use crate::castling;
use crate::geometry;
use crate::history::History;
use crate::moves::MoveRecord;
use crate::types::{CastlingRights, CastlingSide, Color, Piece, PieceKind, Square};

/// Snapshot of everything the rules need to know about the game
///
/// Besides the board, a position holds the en passant target and the castling rights. Both are
/// derived from the move history; see [`Position::from_history()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub ep_target: Option<Square>,
    pub castling: CastlingRights,
}

impl Position {
    #[inline]
    pub fn new(board: Board, ep_target: Option<Square>, castling: CastlingRights) -> Position {
        Position {
            board,
            ep_target,
            castling,
        }
    }

    /// Returns the position at the start of the game
    pub fn initial() -> Position {
        Position::new(Board::initial(), None, CastlingRights::FULL)
    }

    /// Builds the position from the board, the move history and the castling rights
    ///
    /// The en passant target is taken from the history. A castling right is dropped if the
    /// history shows that the corresponding rook has ever left its home square, even if the
    /// rights passed in still hold it.
    pub fn from_history(board: &Board, history: &History, rights: CastlingRights) -> Position {
        let mut castling = rights;
        for color in [Color::White, Color::Black] {
            for side in [CastlingSide::Queen, CastlingSide::King] {
                if castling.has(color, side) && history.rook_left_home(color, side) {
                    castling.unset(color, side);
                }
            }
        }
        Position::new(*board, history.en_passant_target(), castling)
    }

    /// Returns the position after the move `mv`
    ///
    /// The move is not validated.
    pub fn make_move(&self, mv: &MoveRecord) -> Position {
        let ep_target = if mv.is_double_step() {
            Square::new((mv.from.row() + mv.to.row()) / 2, mv.from.col())
        } else {
            None
        };
        Position {
            board: self.board.apply(mv),
            ep_target,
            castling: castling::update(self.castling, mv),
        }
    }

    /// Describes the move of `piece` from `from` to `to` in this position
    #[inline]
    pub fn record(&self, piece: Piece, from: Square, to: Square) -> MoveRecord {
        MoveRecord::new(piece, from, to, &self.board)
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::initial()
    }
}

/// Checks that all the squares strictly between `from` and `to` are empty
///
/// The squares must lie on a common line or diagonal.
fn is_path_clear(b: &Board, from: Square, to: Square) -> bool {
    let dr = (to.row() as isize - from.row() as isize).signum();
    let dc = (to.col() as isize - from.col() as isize).signum();
    let mut cur = from;
    loop {
        cur = match cur.try_shift(dr, dc) {
            Some(sq) => sq,
            None => return false,
        };
        if cur == to {
            return true;
        }
        if !b.is_empty_at(cur) {
            return false;
        }
    }
}

fn is_pawn_move(pos: &Position, piece: Piece, from: Square, to: Square) -> bool {
    let b = &pos.board;
    let fwd = geometry::pawn_forward(piece.color);
    let dr = to.row() as isize - from.row() as isize;
    let dc = to.col() as isize - from.col() as isize;

    if dc == 0 {
        if dr == fwd {
            return b.is_empty_at(to);
        }
        if dr == 2 * fwd && from.rank() == geometry::pawn_start_rank(piece.color) {
            return from
                .try_shift(fwd, 0)
                .map_or(false, |mid| b.is_empty_at(mid))
                && b.is_empty_at(to);
        }
        return false;
    }

    if dr != fwd || dc.abs() != 1 {
        return false;
    }
    match b.get(to) {
        Some(p) => p.color != piece.color,
        None => {
            // En passant: the captured pawn stands beside the mover, on the column of `to`.
            let beside = Square::new(from.row(), to.col()).and_then(|sq| b.get(sq));
            pos.ep_target == Some(to)
                && beside == Some(Piece::new(piece.color.inv(), PieceKind::Pawn))
        }
    }
}

fn is_castling_move(pos: &Position, color: Color, from: Square, to: Square) -> bool {
    let b = &pos.board;
    if from != geometry::king_home(color) || to.row() != from.row() {
        return false;
    }
    let side = if to.col() > from.col() {
        CastlingSide::King
    } else {
        CastlingSide::Queen
    };
    if to.file() != geometry::castling_king_dst_file(side) || !pos.castling.has(color, side) {
        return false;
    }
    let rook_sq = geometry::rook_home(color, side);
    if b.get(rook_sq) != Some(Piece::new(color, PieceKind::Rook)) {
        return false;
    }
    if !is_path_clear(b, from, rook_sq) {
        return false;
    }
    // The king may not castle out of, through or into check.
    let enemy = color.inv();
    let transit = Square::from_parts(geometry::castling_rook_dst_file(side), from.rank());
    [from, transit, to]
        .into_iter()
        .all(|sq| !attack::is_square_attacked(sq, enemy, b))
}

/// Returns `true` if `piece` standing on `from` can geometrically move to `to`
///
/// This ignores whether the move leaves the own king in check. All the other rules are applied:
/// `from` must hold `piece`, `to` must differ from `from` and must not hold a piece of the same
/// color, sliding pieces need a clear path, and castling needs all of its conditions except the
/// history of rook moves, which is folded into [`Position::castling`].
pub fn is_pseudo_legal(pos: &Position, piece: Piece, from: Square, to: Square) -> bool {
    let b = &pos.board;
    if from == to || b.get(from) != Some(piece) {
        return false;
    }
    if let Some(dst) = b.get(to) {
        if dst.color == piece.color {
            return false;
        }
    }

    let dr = to.row().abs_diff(from.row());
    let dc = to.col().abs_diff(from.col());
    match piece.kind {
        PieceKind::Pawn => is_pawn_move(pos, piece, from, to),
        PieceKind::Knight => (dr == 1 && dc == 2) || (dr == 2 && dc == 1),
        PieceKind::Bishop => dr == dc && is_path_clear(b, from, to),
        PieceKind::Rook => (dr == 0 || dc == 0) && is_path_clear(b, from, to),
        PieceKind::Queen => (dr == dc || dr == 0 || dc == 0) && is_path_clear(b, from, to),
        PieceKind::King => {
            if dr <= 1 && dc <= 1 {
                return true;
            }
            dr == 0 && dc == 2 && is_castling_move(pos, piece.color, from, to)
        }
    }
}

/// Returns `true` if the move `mv` does not leave the mover's king attacked
///
/// The move is assumed to be pseudo-legal.
pub fn is_safe(pos: &Position, mv: &MoveRecord) -> bool {
    let after = pos.board.apply(mv);
    !attack::is_king_in_check(mv.piece.color, &after)
}

/// Returns `true` if `piece` can legally move from `from` to `to` in the position `pos`
pub fn is_legal_in(pos: &Position, piece: Piece, from: Square, to: Square) -> bool {
    is_pseudo_legal(pos, piece, from, to) && is_safe(pos, &pos.record(piece, from, to))
}

/// Returns `true` if `piece` can legally move from `from` to `to`
///
/// The en passant target and the castling restrictions are derived from `history` and
/// `rights`. Inconsistent input, like `from` not holding `piece`, results in `false`.
///
/// # Example
///
/// ```
/// # use rookery::{Board, CastlingRights, Color, History, Piece, PieceKind, Square};
/// # use rookery::legal;
/// # use std::str::FromStr;
/// #
/// let b = Board::initial();
/// let pawn = Piece::new(Color::White, PieceKind::Pawn);
/// let e2 = Square::from_str("e2").unwrap();
/// let e4 = Square::from_str("e4").unwrap();
/// let e5 = Square::from_str("e5").unwrap();
/// assert!(legal::is_legal(pawn, e2, e4, &b, &History::new(), CastlingRights::FULL));
/// assert!(!legal::is_legal(pawn, e2, e5, &b, &History::new(), CastlingRights::FULL));
/// ```
pub fn is_legal(
    piece: Piece,
    from: Square,
    to: Square,
    board: &Board,
    history: &History,
    rights: CastlingRights,
) -> bool {
    is_legal_in(&Position::from_history(board, history, rights), piece, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    fn pos(diagram: &str, ep: Option<&str>, rights: &str) -> Position {
        Position::new(
            Board::from_placement(diagram).unwrap(),
            ep.map(sq),
            CastlingRights::from_str(rights).unwrap(),
        )
    }

    fn piece(c: char) -> Piece {
        Piece::from_char(c).unwrap()
    }

    #[test]
    fn test_basic_rejections() {
        let p = Position::initial();
        // Wrong piece on the source square
        assert!(!is_legal_in(&p, piece('N'), sq("e2"), sq("e4")));
        // Empty source square
        assert!(!is_legal_in(&p, piece('P'), sq("e4"), sq("e5")));
        // Same square
        assert!(!is_legal_in(&p, piece('P'), sq("e2"), sq("e2")));
        // Self-capture
        assert!(!is_legal_in(&p, piece('R'), sq("a1"), sq("a2")));
        assert!(!is_legal_in(&p, piece('N'), sq("g1"), sq("e2")));
    }

    #[test]
    fn test_piece_geometry() {
        let p = pos("4k3/8/8/3p4/8/2N1B3/8/R3K2Q", None, "-");
        assert!(is_legal_in(&p, piece('N'), sq("c3"), sq("d5")));
        assert!(is_legal_in(&p, piece('N'), sq("c3"), sq("b1")));
        assert!(!is_legal_in(&p, piece('N'), sq("c3"), sq("c5")));
        assert!(is_legal_in(&p, piece('B'), sq("e3"), sq("a7")));
        assert!(!is_legal_in(&p, piece('B'), sq("e3"), sq("e4")));
        assert!(is_legal_in(&p, piece('R'), sq("a1"), sq("a8")));
        assert!(is_legal_in(&p, piece('R'), sq("a1"), sq("d1")));
        assert!(!is_legal_in(&p, piece('R'), sq("a1"), sq("f1")));
        assert!(!is_legal_in(&p, piece('R'), sq("a1"), sq("b2")));
        assert!(is_legal_in(&p, piece('Q'), sq("h1"), sq("d5")));
        assert!(!is_legal_in(&p, piece('Q'), sq("h1"), sq("a8")));
        assert!(is_legal_in(&p, piece('Q'), sq("h1"), sq("h8")));
        assert!(!is_legal_in(&p, piece('Q'), sq("h1"), sq("g3")));
        assert!(is_legal_in(&p, piece('K'), sq("e1"), sq("f2")));
        assert!(!is_legal_in(&p, piece('K'), sq("e1"), sq("e3")));
        assert!(!is_legal_in(&p, piece('K'), sq("e1"), sq("g1")));
    }

    #[test]
    fn test_pawns() {
        let p = pos("4k3/8/8/8/8/1p6/P1P3P1/4K3", None, "-");
        assert!(is_legal_in(&p, piece('P'), sq("a2"), sq("a3")));
        assert!(is_legal_in(&p, piece('P'), sq("a2"), sq("a4")));
        assert!(is_legal_in(&p, piece('P'), sq("a2"), sq("b3")));
        assert!(is_legal_in(&p, piece('P'), sq("c2"), sq("b3")));
        assert!(!is_legal_in(&p, piece('P'), sq("c2"), sq("d3")));
        assert!(!is_legal_in(&p, piece('P'), sq("g2"), sq("g5")));
        assert!(!is_legal_in(&p, piece('P'), sq("g2"), sq("g1")));
        assert!(is_legal_in(&p, piece('p'), sq("b3"), sq("a2")));
        assert!(!is_legal_in(&p, piece('p'), sq("b3"), sq("b4")));

        let p = pos("4k3/8/8/8/8/1p6/1P6/4K3", None, "-");
        assert!(!is_legal_in(&p, piece('P'), sq("b2"), sq("b3")));
        assert!(!is_legal_in(&p, piece('P'), sq("b2"), sq("b4")));
    }

    #[test]
    fn test_en_passant() {
        // Black pawn has just gone from (1,4) to (3,4), next to the white pawn on (3,3).
        let mut b = Board::from_placement("4k3/4p3/8/3P4/8/8/8/4K3").unwrap();
        let mut h = History::new();
        let black_pawn = piece('p');
        let mv = MoveRecord::new(
            black_pawn,
            Square::new(1, 4).unwrap(),
            Square::new(3, 4).unwrap(),
            &b,
        );
        b = b.apply(&mv);
        h.push(mv);
        assert_eq!(h.en_passant_target(), Square::new(2, 4));

        let white_pawn = piece('P');
        let from = Square::new(3, 3).unwrap();
        let to = Square::new(2, 4).unwrap();
        assert!(is_legal(white_pawn, from, to, &b, &h, CastlingRights::EMPTY));

        let mv = MoveRecord::new(white_pawn, from, to, &b);
        assert!(mv.is_en_passant);
        let after = b.apply(&mv);
        assert_eq!(after.get(Square::new(3, 4).unwrap()), None);
        assert_eq!(after.get(to), Some(white_pawn));

        // Without the double step in the history, the capture is not allowed.
        assert!(!is_legal(
            white_pawn,
            from,
            to,
            &b,
            &History::new(),
            CastlingRights::EMPTY
        ));
    }

    #[test]
    fn test_en_passant_expires() {
        let p = pos("4k3/8/8/3Pp3/8/8/8/4K3", Some("e6"), "-");
        assert!(is_legal_in(&p, piece('P'), sq("d5"), sq("e6")));
        let mv = p.record(piece('K'), sq("e1"), sq("d1"));
        let p = p.make_move(&mv);
        assert_eq!(p.ep_target, None);
        assert!(!is_legal_in(&p, piece('P'), sq("d5"), sq("e6")));
    }

    #[test]
    fn test_castling() {
        let b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let h = History::new();
        let king = piece('K');
        let (e1, g1, c1) = (
            Square::new(7, 4).unwrap(),
            Square::new(7, 6).unwrap(),
            Square::new(7, 2).unwrap(),
        );
        assert!(is_legal(king, e1, g1, &b, &h, CastlingRights::FULL));
        assert!(is_legal(king, e1, c1, &b, &h, CastlingRights::FULL));

        let mv = MoveRecord::new(king, e1, g1, &b);
        assert!(mv.is_castling);
        let after = b.apply(&mv);
        assert_eq!(after.get(Square::new(7, 7).unwrap()), None);
        assert_eq!(after.get(Square::new(7, 5).unwrap()), Some(piece('R')));

        // No rights
        assert!(!is_legal(king, e1, g1, &b, &h, CastlingRights::EMPTY));
        assert!(!is_legal(
            king,
            e1,
            g1,
            &b,
            &h,
            CastlingRights::from_str("Qkq").unwrap()
        ));

        // Transit square (7,5) attacked
        let b2 = Board::from_placement("r3kr2/8/8/8/8/8/8/R3K2R").unwrap();
        assert!(!is_legal(king, e1, g1, &b2, &h, CastlingRights::FULL));
        assert!(is_legal(king, e1, c1, &b2, &h, CastlingRights::FULL));

        // Destination (7,6) attacked
        let b3 = Board::from_placement("r3k1r1/8/8/8/8/8/8/R3K2R").unwrap();
        assert!(!is_legal(king, e1, g1, &b3, &h, CastlingRights::FULL));

        // King in check
        let b4 = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let b4 = {
            let mut b = b4;
            b.put(sq("e4"), Some(piece('q')));
            b
        };
        assert!(!is_legal(king, e1, g1, &b4, &h, CastlingRights::FULL));

        // Blocked path
        let b5 = Board::from_placement("r3k2r/8/8/8/8/8/8/RN2K2R").unwrap();
        assert!(!is_legal(king, e1, c1, &b5, &h, CastlingRights::FULL));
        assert!(is_legal(king, e1, g1, &b5, &h, CastlingRights::FULL));
    }

    #[test]
    fn test_castling_rook_history() {
        let mut b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let mut h = History::new();
        for (from, to) in [("h1", "h3"), ("a8", "a7"), ("h3", "h1"), ("a7", "a8")] {
            let mv = MoveRecord::new(b.get(sq(from)).unwrap(), sq(from), sq(to), &b);
            b = b.apply(&mv);
            h.push(mv);
        }
        // The caller still claims full rights, but the rooks have left their homes.
        assert!(!is_legal(piece('K'), sq("e1"), sq("g1"), &b, &h, CastlingRights::FULL));
        assert!(is_legal(piece('K'), sq("e1"), sq("c1"), &b, &h, CastlingRights::FULL));
        let p = Position::from_history(&b, &h, CastlingRights::FULL);
        assert_eq!(p.castling, CastlingRights::from_str("Qk").unwrap());
    }

    #[test]
    fn test_self_check() {
        // Pinned knight
        let p = pos("4k3/4r3/8/8/8/8/4N3/4K3", None, "-");
        assert!(is_pseudo_legal(&p, piece('N'), sq("e2"), sq("c3")));
        assert!(!is_legal_in(&p, piece('N'), sq("e2"), sq("c3")));
        // King may not step into an attacked square
        assert!(!is_legal_in(&p, piece('K'), sq("e1"), sq("e2")));
        assert!(is_legal_in(&p, piece('K'), sq("e1"), sq("d1")));

        // In check, only evasions are legal
        let p = pos("4k3/8/8/8/8/8/3P4/r3K3", None, "-");
        assert!(!is_legal_in(&p, piece('P'), sq("d2"), sq("d3")));
        assert!(is_legal_in(&p, piece('K'), sq("e1"), sq("e2")));
        assert!(!is_legal_in(&p, piece('K'), sq("e1"), sq("f1")));
    }

    #[test]
    fn test_en_passant_discovered_check() {
        // Capturing en passant would open the fifth rank to the rook.
        let p = pos("8/8/8/K2Pp2r/8/8/8/4k3", Some("e6"), "-");
        assert!(is_pseudo_legal(&p, piece('P'), sq("d5"), sq("e6")));
        assert!(!is_legal_in(&p, piece('P'), sq("d5"), sq("e6")));
    }

    #[test]
    fn test_deterministic() {
        let b = Board::initial();
        let h = History::new();
        for from in Square::iter() {
            let Some(p) = b.get(from) else { continue };
            for to in Square::iter() {
                let first = is_legal(p, from, to, &b, &h, CastlingRights::FULL);
                let second = is_legal(p, from, to, &b, &h, CastlingRights::FULL);
                assert_eq!(first, second);
            }
        }
    }
}
