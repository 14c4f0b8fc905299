//! Move records

use crate::board::Board;
use crate::types::{Piece, PieceKind, Square};

use std::fmt;

/// Fully described move
///
/// The record carries everything needed to replay the move on the board it was made on:
/// the piece as it stood before moving, the captured piece (for en passant, the pawn beside
/// the mover, not the piece on `to`) and the special-move flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Piece which made the move, as it was before moving
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Kind the pawn turns into, if this is a promotion
    pub promotion: Option<PieceKind>,
    pub is_castling: bool,
    pub is_en_passant: bool,
}

impl MoveRecord {
    /// Describes a move of `piece` from `from` to `to` made on the board `b`
    ///
    /// The special-move flags and the captured piece are derived from the geometry: a king
    /// moving two columns along its row castles, and a pawn moving diagonally onto an empty
    /// square captures en passant. The move itself is not validated.
    pub fn new(piece: Piece, from: Square, to: Square, b: &Board) -> MoveRecord {
        let is_castling = piece.kind == PieceKind::King
            && from.row() == to.row()
            && from.col().abs_diff(to.col()) == 2;
        let is_en_passant =
            piece.kind == PieceKind::Pawn && from.col() != to.col() && b.is_empty_at(to);
        let captured = if is_en_passant {
            Square::new(from.row(), to.col()).and_then(|sq| b.get(sq))
        } else {
            b.get(to)
        };
        MoveRecord {
            from,
            to,
            piece,
            captured,
            promotion: None,
            is_castling,
            is_en_passant,
        }
    }

    /// Returns the same move promoting to `kind`
    #[inline]
    pub fn promoted_to(self, kind: PieceKind) -> MoveRecord {
        MoveRecord {
            promotion: Some(kind),
            ..self
        }
    }

    /// Returns the piece which lands on `to`
    #[inline]
    pub fn placed(&self) -> Piece {
        match self.promotion {
            Some(kind) => self.piece.with_kind(kind),
            None => self.piece,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns `true` if this is a pawn advancing two squares
    #[inline]
    pub fn is_double_step(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
            && self.from.col() == self.to.col()
            && self.from.row().abs_diff(self.to.row()) == 2
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.as_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn test_flags() {
        let b = Board::initial();
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let mv = MoveRecord::new(pawn, sq("e2"), sq("e4"), &b);
        assert!(mv.is_double_step());
        assert!(!mv.is_capture());
        assert!(!mv.is_en_passant);
        assert_eq!(mv.placed(), pawn);
        assert_eq!(mv.to_string(), "e2e4");

        let mv = MoveRecord::new(pawn, sq("e2"), sq("e3"), &b);
        assert!(!mv.is_double_step());
    }

    #[test]
    fn test_capture() {
        let b = Board::from_placement("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let mv = MoveRecord::new(pawn, sq("e4"), sq("d5"), &b);
        assert_eq!(mv.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert!(!mv.is_en_passant);
    }

    #[test]
    fn test_promotion() {
        let b = Board::from_placement("4k3/P7/8/8/8/8/8/4K3").unwrap();
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let mv = MoveRecord::new(pawn, sq("a7"), sq("a8"), &b).promoted_to(PieceKind::Knight);
        assert_eq!(mv.piece, pawn);
        assert_eq!(mv.placed(), Piece::new(Color::White, PieceKind::Knight));
        assert_eq!(mv.to_string(), "a7a8n");
    }
}
