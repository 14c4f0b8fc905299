//! Check, checkmate and stalemate detection

use crate::attack;
use crate::board::Board;
use crate::history::History;
use crate::legal::Position;
use crate::movegen;
use crate::types::{CastlingRights, Color};

use std::fmt;

use tracing::trace;

/// State of one side after the opponent's move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Not in check, and there is a legal move
    Normal,
    /// In check, and there is a legal move
    Check,
    /// In check, and there is no legal move
    Checkmate,
    /// Not in check, and there is no legal move
    Stalemate,
}

impl Outcome {
    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self, Outcome::Checkmate | Outcome::Stalemate)
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        matches!(self, Outcome::Check | Outcome::Checkmate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Normal => "normal",
            Outcome::Check => "check",
            Outcome::Checkmate => "checkmate",
            Outcome::Stalemate => "stalemate",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Computes the outcome for color `color` in the position `pos`
///
/// A missing king counts as being in check, so such a side is either in check or checkmated.
pub fn outcome_in(pos: &Position, color: Color) -> Outcome {
    let in_check = attack::is_king_in_check(color, &pos.board);
    let can_move = movegen::has_legal_moves(pos, color);
    let res = match (in_check, can_move) {
        (true, true) => Outcome::Check,
        (true, false) => Outcome::Checkmate,
        (false, true) => Outcome::Normal,
        (false, false) => Outcome::Stalemate,
    };
    trace!(%color, outcome = %res, "computed outcome");
    res
}

/// Computes the outcome for color `color`, taking the en passant target and castling
/// restrictions from `history` and `rights`
pub fn outcome(color: Color, board: &Board, history: &History, rights: CastlingRights) -> Outcome {
    outcome_in(&Position::from_history(board, history, rights), color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveRecord;
    use crate::types::{Piece, PieceKind, Square};
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    fn board(s: &str) -> Board {
        Board::from_placement(s).unwrap()
    }

    #[test]
    fn test_fools_mate() {
        let mut b = Board::initial();
        let mut h = History::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            let mv = MoveRecord::new(b.get(sq(from)).unwrap(), sq(from), sq(to), &b);
            b = b.apply(&mv);
            h.push(mv);
        }
        assert_eq!(
            outcome(Color::White, &b, &h, CastlingRights::FULL),
            Outcome::Checkmate
        );
        assert!(Outcome::Checkmate.is_game_over());

        // Without the attacking queen, nothing is left of the mate.
        b.put(sq("h4"), None);
        assert_eq!(
            outcome(Color::White, &b, &h, CastlingRights::FULL),
            Outcome::Normal
        );
    }

    #[test]
    fn test_check() {
        let b = board("4k3/8/8/8/8/8/8/r3K3");
        let h = History::new();
        assert_eq!(
            outcome(Color::White, &b, &h, CastlingRights::EMPTY),
            Outcome::Check
        );
        assert_eq!(
            outcome(Color::Black, &b, &h, CastlingRights::EMPTY),
            Outcome::Normal
        );
        assert!(!Outcome::Check.is_game_over());
    }

    #[test]
    fn test_stalemate() {
        let b = board("7k/5Q2/6K1/8/8/8/8/8");
        let h = History::new();
        assert_eq!(
            outcome(Color::Black, &b, &h, CastlingRights::EMPTY),
            Outcome::Stalemate
        );
        assert!(Outcome::Stalemate.is_game_over());
        assert!(!Outcome::Stalemate.is_check());
    }

    #[test]
    fn test_missing_king() {
        let b = board("8/8/8/8/8/8/8/4K3");
        let h = History::new();
        assert_eq!(
            outcome(Color::Black, &b, &h, CastlingRights::EMPTY),
            Outcome::Checkmate
        );
    }

    #[test]
    fn test_en_passant_escape() {
        // The only way out of the pawn check is to capture the pawn en passant.
        let mut b = board("3b3k/1p6/2p5/2P5/KP6/PP6/8/8");
        let mut h = History::new();
        let mv = MoveRecord::new(
            Piece::new(Color::Black, PieceKind::Pawn),
            sq("b7"),
            sq("b5"),
            &b,
        );
        b = b.apply(&mv);
        h.push(mv);
        assert_eq!(
            outcome(Color::White, &b, &h, CastlingRights::EMPTY),
            Outcome::Check
        );
        assert_eq!(
            outcome(Color::White, &b, &History::new(), CastlingRights::EMPTY),
            Outcome::Checkmate
        );
    }
}
