// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// Per-color constants (home rank, pawn direction, ...) are stored in small
// tables indexed by color, so any type implementing To and FromPrimitive can
// be used as a table index.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// A square on the board, addressed by `(rank, file)`.
///
/// Ranks count down the board from black's side: rank 0 is black's back
/// rank (algebraic rank 8) and rank 7 is white's back rank (algebraic rank
/// 1). File 0 is the a-file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    pub fn new(rank: u8, file: u8) -> Square {
        assert!(rank < 8 && file < 8, "square ({}, {}) is off the board", rank, file);
        Square { rank, file }
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file(self) -> u8 {
        self.file
    }

    /// Returns the square `(dr, dc)` away from this one, or `None` if that
    /// square lies off the board. This is the only way to step between
    /// squares, so every board access is preceded by an on-board check.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let rank = self.rank as i8 + dr;
        let file = self.file as i8 + dc;
        if on_board(rank, file) {
            Some(Square::new(rank as u8, file as u8))
        } else {
            None
        }
    }

    /// All 64 squares in scan order: rank-major, file-minor.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square::new(rank, file)))
    }
}

pub fn on_board(rank: i8, file: i8) -> bool {
    0 <= rank && rank < 8 && 0 <= file && file < 8
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.file) as char)?;
        f.write_char((b'8' - self.rank) as char)
    }
}

impl<'a> TryFrom<&'a str> for Square {
    type Error = ();

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        let bytes = value.as_bytes();
        if bytes.len() != 2 {
            return Err(());
        }

        let (file, rank) = (bytes[0], bytes[1]);
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return Err(());
        }

        Ok(Square::new(b'8' - rank, file - b'a'))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

static HOME_RANKS: [u8; 2] = [7, 0];
static PAWN_START_RANKS: [u8; 2] = [6, 1];
static PROMOTION_RANKS: [u8; 2] = [0, 7];
static EN_PASSANT_RANKS: [u8; 2] = [3, 4];
static PAWN_DIRECTIONS: [i8; 2] = [-1, 1];

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The rank this color's king and rooks start on.
    pub fn home_rank(self) -> u8 {
        HOME_RANKS[self.as_index()]
    }

    /// The rank this color's pawns start on, from which they may double-step.
    pub fn pawn_start_rank(self) -> u8 {
        PAWN_START_RANKS[self.as_index()]
    }

    /// The rank on which this color's pawns promote.
    pub fn promotion_rank(self) -> u8 {
        PROMOTION_RANKS[self.as_index()]
    }

    /// The rank a pawn of this color must stand on to capture en-passant.
    pub fn en_passant_rank(self) -> u8 {
        EN_PASSANT_RANKS[self.as_index()]
    }

    /// Rank delta of a forward pawn step: white moves toward rank 0.
    pub fn pawn_direction(self) -> i8 {
        PAWN_DIRECTIONS[self.as_index()]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn is_sliding(self) -> bool {
        match self {
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => true,
            _ => false,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.as_char())
    }
}

/// Piece kinds a pawn may promote to, in the order promotion moves are
/// generated.
pub static PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

bitflags! {
    pub struct CastleStatus: u8 {
        const NONE = 0;
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE =0b0000_0010;
        const WHITE = Self::WHITE_KINGSIDE.bits | Self::WHITE_QUEENSIDE.bits;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
        const BLACK = Self::BLACK_KINGSIDE.bits | Self::BLACK_QUEENSIDE.bits;
    }
}

impl CastleStatus {
    pub fn kingside(color: Color) -> CastleStatus {
        match color {
            Color::White => CastleStatus::WHITE_KINGSIDE,
            Color::Black => CastleStatus::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(color: Color) -> CastleStatus {
        match color {
            Color::White => CastleStatus::WHITE_QUEENSIDE,
            Color::Black => CastleStatus::BLACK_QUEENSIDE,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };

        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = self.kind.as_char();
        match self.color {
            Color::White => f.write_char(chr.to_ascii_uppercase()),
            Color::Black => f.write_char(chr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_algebraic() {
        let e1 = Square::try_from("e1").unwrap();
        assert_eq!(7, e1.rank());
        assert_eq!(4, e1.file());
        assert_eq!("e1", e1.to_string());

        let a8 = Square::try_from("a8").unwrap();
        assert_eq!(Square::new(0, 0), a8);
        assert!(Square::try_from("i1").is_err());
        assert!(Square::try_from("a9").is_err());
        assert!(Square::try_from("a").is_err());
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Square::new(0, 0);
        assert_eq!(None, corner.offset(-1, 0));
        assert_eq!(None, corner.offset(0, -1));
        assert_eq!(Some(Square::new(1, 2)), corner.offset(1, 2));
        assert_eq!(None, Square::new(7, 7).offset(1, 1));
    }

    #[test]
    fn scan_order_is_rank_major() {
        let squares: Vec<_> = Square::all().collect();
        assert_eq!(64, squares.len());
        assert_eq!(Square::new(0, 0), squares[0]);
        assert_eq!(Square::new(0, 1), squares[1]);
        assert_eq!(Square::new(1, 0), squares[8]);
        assert_eq!(Square::new(7, 7), squares[63]);
    }

    #[test]
    fn per_color_tables() {
        assert_eq!(7, Color::White.home_rank());
        assert_eq!(0, Color::Black.home_rank());
        assert_eq!(-1, Color::White.pawn_direction());
        assert_eq!(1, Color::Black.pawn_direction());
        assert_eq!(6, Color::White.pawn_start_rank());
        assert_eq!(3, Color::White.en_passant_rank());
        assert_eq!(4, Color::Black.en_passant_rank());
        assert_eq!(Color::Black, Color::White.toggle());
        assert_eq!(Color::Black, Color::from_index(1));
    }

    #[test]
    fn piece_chars() {
        let piece = Piece::try_from('N').unwrap();
        assert_eq!(Piece::new(PieceKind::Knight, Color::White), piece);
        assert_eq!("N", piece.to_string());
        assert_eq!("q", Piece::new(PieceKind::Queen, Color::Black).to_string());
        assert!(Piece::try_from('x').is_err());
    }
}
