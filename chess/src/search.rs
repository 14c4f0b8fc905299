//! Minimax search with alpha-beta pruning
//!
//! The search works to a fixed depth. At the root only legal moves are considered, so the chosen
//! move is always legal. Deeper nodes use pseudo-legal moves, which means that a king left in
//! check simply gets captured on the next ply, and the static evaluation sees it as a loss of the
//! king's material value. A side that is not in check but has only such moves is stalemated, and
//! the node is scored as a draw instead.

use crate::attack;
use crate::board::Board;
use crate::eval::{self, Score, TableOrientation};
use crate::history::History;
use crate::legal::Position;
use crate::movegen::{self, Promotions};
use crate::moves::MoveRecord;
use crate::types::{CastlingRights, Color};

use tracing::{debug, trace};

/// Score of a drawn position
pub const DRAW_SCORE: Score = 0;

/// Search settings
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SearchConfig {
    /// Number of plies to search, including the root move
    pub depth: u8,
    pub orientation: TableOrientation,
}

impl SearchConfig {
    pub const DEFAULT_DEPTH: u8 = 3;

    #[inline]
    pub fn with_depth(self, depth: u8) -> SearchConfig {
        SearchConfig { depth, ..self }
    }

    #[inline]
    pub fn with_orientation(self, orientation: TableOrientation) -> SearchConfig {
        SearchConfig {
            orientation,
            ..self
        }
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            depth: Self::DEFAULT_DEPTH,
            orientation: TableOrientation::default(),
        }
    }
}

/// Move chosen by the search, together with its score
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub mv: MoveRecord,
    /// Minimax score of the move, from White's point of view
    pub score: Score,
    /// Number of visited nodes
    pub nodes: u64,
}

/// Move searcher
///
/// White is the maximizing side and Black is the minimizing one, whichever color is asked to
/// move. A searcher keeps no state between searches except its configuration.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    config: SearchConfig,
    nodes: u64,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Searcher {
        Searcher { config, nodes: 0 }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn minimax(
        &mut self,
        pos: &Position,
        side: Color,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.nodes += 1;
        if depth == 0 || pos.board.king_square(side).is_none() {
            return eval::evaluate(&pos.board, self.config.orientation);
        }
        if !attack::is_king_in_check(side, &pos.board) && !movegen::has_legal_moves(pos, side) {
            return DRAW_SCORE;
        }
        let moves = movegen::gen_pseudo(pos, side, Promotions::QueenOnly);
        if moves.is_empty() {
            return eval::evaluate(&pos.board, self.config.orientation);
        }

        match side {
            Color::White => {
                let mut best = Score::MIN;
                for mv in &moves {
                    let child = pos.make_move(mv);
                    let score = self.minimax(&child, side.inv(), depth - 1, alpha, beta);
                    best = best.max(score);
                    alpha = alpha.max(score);
                    if beta <= alpha {
                        break;
                    }
                }
                best
            }
            Color::Black => {
                let mut best = Score::MAX;
                for mv in &moves {
                    let child = pos.make_move(mv);
                    let score = self.minimax(&child, side.inv(), depth - 1, alpha, beta);
                    best = best.min(score);
                    beta = beta.min(score);
                    if beta <= alpha {
                        break;
                    }
                }
                best
            }
        }
    }

    /// Searches for the best move of color `color` in the position `pos`
    ///
    /// Returns `None` if `color` has no legal moves. A depth of zero is treated as one, so the
    /// root moves are always compared by the evaluation of the resulting positions.
    pub fn search(&mut self, pos: &Position, color: Color) -> Option<SearchResult> {
        self.nodes = 0;
        let depth = self.config.depth.max(1);
        let moves = movegen::gen_legal(pos, color, Promotions::QueenOnly);

        let mut alpha = Score::MIN;
        let mut beta = Score::MAX;
        let mut best: Option<(MoveRecord, Score)> = None;
        for mv in &moves {
            let child = pos.make_move(mv);
            let score = self.minimax(&child, color.inv(), depth - 1, alpha, beta);
            trace!(%mv, score, "root move");
            let better = match (best, color) {
                (None, _) => true,
                (Some((_, cur)), Color::White) => score > cur,
                (Some((_, cur)), Color::Black) => score < cur,
            };
            if better {
                best = Some((*mv, score));
            }
            match color {
                Color::White => alpha = alpha.max(score),
                Color::Black => beta = beta.min(score),
            }
        }

        let res = best.map(|(mv, score)| SearchResult {
            mv,
            score,
            nodes: self.nodes,
        });
        match &res {
            Some(r) => debug!(
                %color,
                depth,
                root_moves = moves.len(),
                nodes = r.nodes,
                mv = %r.mv,
                score = r.score,
                "search finished"
            ),
            None => debug!(%color, depth, "no legal moves to search"),
        }
        res
    }

    /// Chooses a move of color `color` in the position `pos`
    pub fn choose_move(&mut self, pos: &Position, color: Color) -> Option<MoveRecord> {
        self.search(pos, color).map(|r| r.mv)
    }

    /// Chooses a move of color `color`, taking the en passant target and castling restrictions
    /// from `history` and `rights`
    pub fn choose_move_with_history(
        &mut self,
        board: &Board,
        history: &History,
        rights: CastlingRights,
        color: Color,
    ) -> Option<MoveRecord> {
        self.choose_move(&Position::from_history(board, history, rights), color)
    }
}

/// Chooses a move of color `color` on the board `board` with the default settings
///
/// The board alone carries no en passant target and no castling rights, so neither kind of
/// move is considered.
///
/// # Example
///
/// ```
/// # use rookery::{Board, Color, search};
/// #
/// let mv = search::choose_move(&Board::initial(), Color::Black).unwrap();
/// assert_eq!(mv.piece.color, Color::Black);
/// ```
pub fn choose_move(board: &Board, color: Color) -> Option<MoveRecord> {
    let pos = Position::new(*board, None, CastlingRights::EMPTY);
    Searcher::new(SearchConfig::default()).choose_move(&pos, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legal;
    use crate::outcome::{self, Outcome};
    use crate::types::{Piece, PieceKind, Square};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    fn board(s: &str) -> Board {
        Board::from_placement(s).unwrap()
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        let h = History::new();
        for color in [Color::White, Color::Black] {
            let mv = choose_move(&b, color).unwrap();
            assert_eq!(mv.piece.color, color);
            assert!(legal::is_legal(mv.piece, mv.from, mv.to, &b, &h, CastlingRights::FULL));
        }
    }

    #[test]
    fn test_takes_queen() {
        let b = board("4k3/8/8/3q4/8/8/8/3RK3");
        let mv = choose_move(&b, Color::White).unwrap();
        assert_eq!((mv.from, mv.to), (sq("d1"), sq("d5")));
        assert_eq!(mv.captured, Some(Piece::new(Color::Black, PieceKind::Queen)));
    }

    #[test]
    fn test_finds_mate() {
        let mut b = Board::initial();
        let mut h = History::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
            let mv = MoveRecord::new(b.get(sq(from)).unwrap(), sq(from), sq(to), &b);
            b = b.apply(&mv);
            h.push(mv);
        }
        let mut searcher = Searcher::new(SearchConfig::default());
        let mv = searcher
            .choose_move_with_history(&b, &h, CastlingRights::FULL, Color::Black)
            .unwrap();
        assert_eq!((mv.from, mv.to), (sq("d8"), sq("h4")));
    }

    #[test]
    fn test_promotes_to_queen() {
        let b = board("7k/P7/8/8/8/8/8/K7");
        let res = Searcher::new(SearchConfig::default().with_depth(1))
            .search(&Position::new(b, None, CastlingRights::EMPTY), Color::White)
            .unwrap();
        assert_eq!((res.mv.from, res.mv.to), (sq("a7"), sq("a8")));
        assert_eq!(res.mv.promotion, Some(PieceKind::Queen));
        assert_eq!(res.mv.placed(), Piece::new(Color::White, PieceKind::Queen));
        assert_eq!(res.nodes, 4);
    }

    #[test]
    fn test_no_moves() {
        let mate = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR");
        assert_eq!(choose_move(&mate, Color::White), None);
        let stalemate = board("7k/5Q2/6K1/8/8/8/8/8");
        assert_eq!(choose_move(&stalemate, Color::Black), None);
        let no_pieces = board("8/8/8/8/8/8/8/4K3");
        assert_eq!(choose_move(&no_pieces, Color::Black), None);
    }

    #[test]
    fn test_avoids_stalemate() {
        // Qc7 stalemates the lone king, though the queen is worth keeping.
        let b = board("k7/8/8/8/8/8/8/2Q4K");
        let mv = choose_move(&b, Color::White).unwrap();
        assert_ne!((mv.from, mv.to), (sq("c1"), sq("c7")));
        let after = b.apply(&mv);
        let res = outcome::outcome(Color::Black, &after, &History::new(), CastlingRights::EMPTY);
        assert_ne!(res, Outcome::Stalemate);
        assert!(!res.is_game_over());
    }

    #[test]
    fn test_stalemate_scores_draw() {
        let mut searcher = Searcher::new(SearchConfig::default().with_depth(3));
        let pos = Position::new(board("k7/8/8/8/8/8/8/2Q4K"), None, CastlingRights::EMPTY);
        let stalemating = MoveRecord::new(
            Piece::new(Color::White, PieceKind::Queen),
            sq("c1"),
            sq("c7"),
            &pos.board,
        );
        let child = pos.make_move(&stalemating);
        let score = searcher.minimax(&child, Color::Black, 2, Score::MIN, Score::MAX);
        assert_eq!(score, DRAW_SCORE);
        let best = searcher.search(&pos, Color::White).unwrap();
        assert!(best.score > DRAW_SCORE);
    }

    #[test]
    fn test_deterministic() {
        let b = board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R");
        let first = choose_move(&b, Color::White);
        let second = choose_move(&b, Color::White);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_orientation() {
        let b = Board::initial();
        let cfg = SearchConfig::default()
            .with_depth(2)
            .with_orientation(TableOrientation::Shared);
        assert_eq!(cfg.orientation, TableOrientation::Shared);
        let pos = Position::new(b, None, CastlingRights::EMPTY);
        let mv = Searcher::new(cfg).choose_move(&pos, Color::Black).unwrap();
        assert!(legal::is_legal_in(&pos, mv.piece, mv.from, mv.to));
    }

    #[test]
    fn test_random_positions() {
        let mut rng = StdRng::seed_from_u64(0x6d696e696d6178);
        let mut searcher = Searcher::new(SearchConfig::default().with_depth(2));
        for _ in 0..4 {
            let mut pos = Position::initial();
            let mut side = Color::White;
            for _ in 0..30 {
                let moves = movegen::gen_legal(&pos, side, Promotions::All);
                let chosen = searcher.choose_move(&pos, side);
                assert_eq!(chosen.is_some(), !moves.is_empty());
                if let Some(mv) = chosen {
                    assert!(legal::is_legal_in(&pos, mv.piece, mv.from, mv.to));
                }
                let mv = match moves.choose(&mut rng) {
                    Some(mv) => *mv,
                    None => break,
                };
                pos = pos.make_move(&mv);
                side = side.inv();
            }
        }
    }
}
