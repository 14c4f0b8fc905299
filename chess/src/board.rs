//! Board and related things

use crate::bitboard::Bitboard;
use crate::geometry;
use crate::moves::MoveRecord;
use crate::types::{Color, File, Piece, PieceKind, Rank, Square};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a piece placement diagram
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlacementParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Chess board
///
/// The board is a plain 8×8 grid of optional pieces and has no behavior of its own besides
/// lookups. It is a `Copy` value: making a move never changes the board in place, but
/// produces a new board via [`Board::apply()`].
///
/// Nothing forces a board to contain exactly one king of each color. A board without a king
/// is still valid to query; the rule functions treat the missing king as being in check.
///
/// # Example
///
/// ```
/// # use rookery::{Board, Color, File, Piece, PieceKind, Rank, Square};
/// #
/// let mut board = Board::empty();
/// board.put(
///     Square::from_parts(File::B, Rank::R2),
///     Some(Piece::new(Color::White, PieceKind::King)),
/// );
/// board.put(
///     Square::from_parts(File::D, Rank::R5),
///     Some(Piece::new(Color::Black, PieceKind::King)),
/// );
/// assert_eq!(board.to_string(), "8/8/8/3k4/8/8/1K6/8");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Returns a board without any pieces
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [None; Square::COUNT],
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Some(Piece::new(Color::White, PieceKind::Pawn)));
            res.put2(file, Rank::R7, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        }
        for color in [Color::White, Color::Black] {
            let rank = geometry::home_rank(color);
            for (file, kind) in File::iter().zip([
                PieceKind::Rook,
                PieceKind::Knight,
                PieceKind::Bishop,
                PieceKind::Queen,
                PieceKind::King,
                PieceKind::Bishop,
                PieceKind::Knight,
                PieceKind::Rook,
            ]) {
                res.put2(file, rank, Some(Piece::new(color, kind)));
            }
        }
        res
    }

    /// Parses a board from a piece placement diagram
    ///
    /// The diagram is the first field of FEN: ranks from 8 down to 1 separated by `/`, digits
    /// for runs of empty squares. Does the same as [`Board::from_str`].
    #[inline]
    pub fn from_placement(s: &str) -> Result<Board, PlacementParseError> {
        Board::from_str(s)
    }

    /// Returns the contents of the square `sq`
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<Piece> {
        self.get(Square::from_parts(file, rank))
    }

    /// Puts `piece` to the square `sq`
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index()] = piece;
    }

    /// Puts `piece` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, piece: Option<Piece>) {
        self.put(Square::from_parts(file, rank), piece);
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates over all the pieces on the board in square index order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates over all the pieces of color `c` in square index order
    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == c)
    }

    /// Returns the set of squares occupied by color `c`
    pub fn color(&self, c: Color) -> Bitboard {
        self.pieces_of(c).map(|(sq, _)| sq).collect()
    }

    /// Returns the position of the king of color `c`, or `None` if there is no such king
    ///
    /// If there is more than one king, the first one in square index order is returned.
    pub fn king_square(&self, c: Color) -> Option<Square> {
        let king = Piece::new(c, PieceKind::King);
        Square::iter().find(|&sq| self.get(sq) == Some(king))
    }

    /// Returns the board after the move `mv` is made
    ///
    /// The move is not validated. The moved piece (or its promotion) lands on `mv.to`, castling
    /// also relocates the rook, and en passant also removes the captured pawn, which stands on
    /// the source row of the capturing pawn.
    pub fn apply(&self, mv: &MoveRecord) -> Board {
        let mut res = *self;
        res.put(mv.from, None);
        if mv.is_castling {
            let row = mv.from.row();
            let (rook_col, rook_dst_col) = if mv.to.col() > mv.from.col() {
                (7, mv.to.col() - 1)
            } else {
                (0, mv.to.col() + 1)
            };
            if let (Some(rook_src), Some(rook_dst)) =
                (Square::new(row, rook_col), Square::new(row, rook_dst_col))
            {
                let rook = res.get(rook_src);
                res.put(rook_src, None);
                res.put(rook_dst, rook);
            }
        }
        if mv.is_en_passant {
            if let Some(taken) = Square::new(mv.from.row(), mv.to.col()) {
                res.put(taken, None);
            }
        }
        res.put(mv.to, Some(mv.placed()));
        res
    }

    /// Wraps the board to allow pretty-printing with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use rookery::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }

    /// Converts the board into a piece placement diagram
    ///
    /// Does the same as `Board::to_string()`.
    #[inline]
    pub fn as_placement(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::initial()
    }
}

impl FromStr for Board {
    type Err = PlacementParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = PlacementParseError;

        let mut col = 0_usize;
        let mut row = 0_usize;
        let mut res = Board::empty();
        for c in s.chars() {
            match c {
                '1'..='8' => {
                    let add = (c as u8 - b'0') as usize;
                    if col + add > 8 {
                        return Err(Error::RankOverflow(Rank::from_index(row)));
                    }
                    col += add;
                }
                '/' => {
                    if col < 8 {
                        return Err(Error::RankUnderflow(Rank::from_index(row)));
                    }
                    row += 1;
                    col = 0;
                    if row >= 8 {
                        return Err(Error::Overflow);
                    }
                }
                _ => {
                    if col >= 8 {
                        return Err(Error::RankOverflow(Rank::from_index(row)));
                    }
                    let piece = Piece::from_char(c).ok_or(Error::UnexpectedChar(c))?;
                    res.put(Square::from_index(row * 8 + col), Some(piece));
                    col += 1;
                }
            };
        }

        if col < 8 {
            return Err(Error::RankUnderflow(Rank::from_index(row)));
        }
        if row < 7 {
            return Err(Error::Underflow);
        }

        Ok(res)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank.index() != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                let piece = match self.get2(file, rank) {
                    Some(piece) => piece,
                    None => {
                        empty += 1;
                        continue;
                    }
                };
                if empty != 0 {
                    write!(f, "{}", empty)?;
                    empty = 0;
                }
                write!(f, "{}", piece)?;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;

    fn cell(p: Option<Piece>) -> char;

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(b.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn cell(p: Option<Piece>) -> char {
        p.map_or('.', |p| p.as_char())
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn cell(p: Option<Piece>) -> char {
        p.map_or('.', |p| p.as_utf8_char())
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
