//! Game driver
//!
//! [`Game`] owns the state of one game and sequences the rule functions: validate the move,
//! apply it, record it, update the castling rights and find the outcome for the opponent.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castling;
use crate::eval::MaterialBalance;
use crate::geometry;
use crate::history::{History, Replay};
use crate::legal::{self, Position};
use crate::movegen;
use crate::moves::MoveRecord;
use crate::outcome::{self, Outcome};
use crate::search::{SearchConfig, Searcher};
use crate::types::{CastlingRights, Color, Piece, PieceKind, Square};

use thiserror::Error;
use tracing::{debug, warn};

/// Error making a move in a [`Game`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("game is over: {0}")]
    GameOver(Outcome),
    #[error("no piece on {0}")]
    EmptySquare(Square),
    #[error("piece on {square} is not {side}")]
    WrongSide { square: Square, side: Color },
    #[error("move {from}{to} is illegal")]
    Illegal { from: Square, to: Square },
    #[error("pawn reaching the last rank needs a promotion piece")]
    PromotionRequired,
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}

/// Single game, with its full move history
#[derive(Debug, Clone)]
pub struct Game {
    start: Board,
    start_side: Color,
    start_rights: CastlingRights,
    board: Board,
    history: History,
    rights: CastlingRights,
    side: Color,
    status: Outcome,
    engine: SearchConfig,
}

impl Game {
    /// Starts a game from the initial position
    pub fn new() -> Game {
        Game::from_board(Board::initial(), Color::White, CastlingRights::FULL)
    }

    /// Starts a game from the board `board` with `side` to move
    pub fn from_board(board: Board, side: Color, rights: CastlingRights) -> Game {
        let status = outcome::outcome_in(&Position::new(board, None, rights), side);
        Game {
            start: board,
            start_side: side,
            start_rights: rights,
            board,
            history: History::new(),
            rights,
            side,
            status,
            engine: SearchConfig::default(),
        }
    }

    /// Sets the search settings used by [`Game::play_engine()`]
    pub fn with_engine(self, engine: SearchConfig) -> Game {
        Game { engine, ..self }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.rights
    }

    /// Side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Outcome for the side to move
    #[inline]
    pub fn status(&self) -> Outcome {
        self.status
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status.is_game_over()
    }

    /// Current position, with the en passant target and castling restrictions applied
    pub fn position(&self) -> Position {
        Position::from_history(&self.board, &self.history, self.rights)
    }

    fn check_promotion(
        piece: Piece,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), MoveError> {
        let promoting =
            piece.kind == PieceKind::Pawn && to.rank() == geometry::promote_rank(piece.color);
        match (promoting, promotion) {
            (true, None) => Err(MoveError::PromotionRequired),
            (true, Some(kind)) if !kind.is_promotion_target() => {
                Err(MoveError::InvalidPromotion(kind))
            }
            (false, Some(kind)) => Err(MoveError::InvalidPromotion(kind)),
            _ => Ok(()),
        }
    }

    fn commit(&mut self, mv: MoveRecord) {
        self.board = self.board.apply(&mv);
        self.rights = castling::update(self.rights, &mv);
        self.history.push(mv);
        self.side = self.side.inv();
        self.status = outcome::outcome_in(&self.position(), self.side);
        debug!(ply = self.history.len(), %mv, status = %self.status, "move played");
        if self.status.is_game_over() {
            debug!(side = %self.side, outcome = %self.status, "game finished");
        }
    }

    /// Plays the move of the piece on `from` to `to`
    ///
    /// A pawn reaching the last rank must be given its promotion kind in `promotion`; any other
    /// move must have `promotion` set to `None`.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveRecord, MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameOver(self.status));
        }
        let piece = self.board.get(from).ok_or(MoveError::EmptySquare(from))?;
        if piece.color != self.side {
            return Err(MoveError::WrongSide {
                square: from,
                side: self.side,
            });
        }
        let pos = self.position();
        if !legal::is_legal_in(&pos, piece, from, to) {
            return Err(MoveError::Illegal { from, to });
        }
        Self::check_promotion(piece, to, promotion)?;

        let mut mv = pos.record(piece, from, to);
        if let Some(kind) = promotion {
            mv = mv.promoted_to(kind);
        }
        self.commit(mv);
        Ok(mv)
    }

    /// Lets the engine choose and play a move for the side to move
    ///
    /// Pawns reaching the last rank are promoted to queens.
    pub fn play_engine(&mut self) -> Result<Option<MoveRecord>, MoveError> {
        if self.is_finished() {
            warn!(outcome = %self.status, "engine asked to move in a finished game");
            return Err(MoveError::GameOver(self.status));
        }
        let mv = match Searcher::new(self.engine).choose_move(&self.position(), self.side) {
            Some(mv) => mv,
            None => return Ok(None),
        };
        self.play(mv.from, mv.to, mv.promotion).map(Some)
    }

    /// Replays the first `ply` moves from the start of the game
    pub fn position_at(&self, ply: usize) -> Replay {
        self.history.replay(&self.start, self.start_rights, ply)
    }

    /// Side to move after the first `ply` moves
    pub fn side_at(&self, ply: usize) -> Color {
        self.position_at(ply).side(self.start_side)
    }

    /// Pieces captured by color `c` so far
    pub fn captured_by(&self, c: Color) -> Vec<Piece> {
        self.history.captured_by(c).collect()
    }

    /// Material readout: the pieces each side has on the board plus the pieces it captured
    pub fn material_balance(&self) -> MaterialBalance {
        let mut res = MaterialBalance::default();
        for (_, p) in self.board.pieces() {
            res.add(p.color, p.kind);
        }
        for c in [Color::White, Color::Black] {
            for p in self.history.captured_by(c) {
                res.add(c, p.kind);
            }
        }
        res
    }

    /// Squares the piece on `from` can legally move to
    ///
    /// Returns an empty set if the square is empty or holds a piece of the side not to move.
    pub fn legal_destinations(&self, from: Square) -> Bitboard {
        match self.board.get(from) {
            Some(p) if p.color == self.side && !self.is_finished() => {
                movegen::legal_destinations(&self.position(), from)
            }
            _ => Bitboard::EMPTY,
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
