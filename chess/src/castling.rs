//! Castling rights bookkeeping

use crate::geometry;
use crate::moves::MoveRecord;
use crate::types::{CastlingRights, CastlingSide, Color, PieceKind, Square};

const SIDES: [CastlingSide; 2] = [CastlingSide::Queen, CastlingSide::King];

/// Returns the side whose castling rook starts on `sq` for color `c`, if any
pub fn rook_side(c: Color, sq: Square) -> Option<CastlingSide> {
    SIDES
        .into_iter()
        .find(|&s| geometry::rook_home(c, s) == sq)
}

/// Returns the castling rights after the move `mv` is made
///
/// A king move revokes both rights of its color. A rook leaving its home square revokes the
/// right on that side, and so does capturing a rook which still stands on its home square.
/// Rights are never restored.
pub fn update(rights: CastlingRights, mv: &MoveRecord) -> CastlingRights {
    let mut res = rights;
    let color = mv.piece.color;
    match mv.piece.kind {
        PieceKind::King => res.unset_color(color),
        PieceKind::Rook => {
            if let Some(side) = rook_side(color, mv.from) {
                res.unset(color, side);
            }
        }
        _ => {}
    }
    if let Some(captured) = mv.captured {
        if captured.kind == PieceKind::Rook && !mv.is_en_passant {
            if let Some(side) = rook_side(captured.color, mv.to) {
                res.unset(captured.color, side);
            }
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::Piece;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    fn rights(s: &str) -> CastlingRights {
        CastlingRights::from_str(s).unwrap()
    }

    #[test]
    fn test_king_move() {
        let b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let king = Piece::new(Color::White, PieceKind::King);
        let mv = MoveRecord::new(king, sq("e1"), sq("f1"), &b);
        assert_eq!(update(CastlingRights::FULL, &mv), rights("kq"));
        let mv = MoveRecord::new(king, sq("e1"), sq("c1"), &b);
        assert_eq!(update(CastlingRights::FULL, &mv), rights("kq"));
    }

    #[test]
    fn test_rook_move() {
        let b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let rook = Piece::new(Color::Black, PieceKind::Rook);
        let mv = MoveRecord::new(rook, sq("h8"), sq("h5"), &b);
        assert_eq!(update(CastlingRights::FULL, &mv), rights("KQq"));
        let mv = MoveRecord::new(rook, sq("a8"), sq("b8"), &b);
        assert_eq!(update(rights("KQq"), &mv), rights("KQ"));
    }

    #[test]
    fn test_rook_captured() {
        let b = Board::from_placement("r3k2r/8/8/8/8/8/6b1/R3K2R").unwrap();
        let bishop = Piece::new(Color::Black, PieceKind::Bishop);
        let mv = MoveRecord::new(bishop, sq("g2"), sq("h1"), &b);
        assert_eq!(update(CastlingRights::FULL, &mv), rights("Qkq"));
    }

    #[test]
    fn test_other_moves() {
        let b = Board::initial();
        let knight = Piece::new(Color::White, PieceKind::Knight);
        let mv = MoveRecord::new(knight, sq("b1"), sq("c3"), &b);
        assert_eq!(update(CastlingRights::FULL, &mv), CastlingRights::FULL);
        assert_eq!(rook_side(Color::White, sq("a1")), Some(CastlingSide::Queen));
        assert_eq!(rook_side(Color::Black, sq("h8")), Some(CastlingSide::King));
        assert_eq!(rook_side(Color::Black, sq("h1")), None);
    }
}
