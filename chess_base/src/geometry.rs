use crate::types::{CastlingSide, Color, File, Rank, Square};

/// Row holding the king and rooks of color `c` at the start of the game
pub const fn home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

/// Row from which pawns of color `c` may make a double step
pub const fn pawn_start_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Row on which pawns of color `c` promote
pub const fn promote_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Row delta of a single pawn step forward
pub const fn pawn_forward(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

pub const fn castling_rook_file(s: CastlingSide) -> File {
    match s {
        CastlingSide::King => File::H,
        CastlingSide::Queen => File::A,
    }
}

pub const fn castling_king_dst_file(s: CastlingSide) -> File {
    match s {
        CastlingSide::King => File::G,
        CastlingSide::Queen => File::C,
    }
}

pub const fn castling_rook_dst_file(s: CastlingSide) -> File {
    match s {
        CastlingSide::King => File::F,
        CastlingSide::Queen => File::D,
    }
}

pub const fn king_home(c: Color) -> Square {
    Square::from_parts(File::E, home_rank(c))
}

pub const fn rook_home(c: Color, s: CastlingSide) -> Square {
    Square::from_parts(castling_rook_file(s), home_rank(c))
}
