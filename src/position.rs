// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use crate::moves::{Move, SpecialMove};
use crate::types::{CastleStatus, Color, Piece, PieceKind, Square, COLORS};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

lazy_static! {
    static ref START_POSITION: Position =
        Position::from_fen(START_FEN).expect("start position FEN is valid");
}

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of FEN"),
            FenParseError::InvalidDigit => write!(f, "empty-square count must be 1 through 8"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not sum to eight files"),
            FenParseError::UnknownPiece => write!(f, "unknown piece character"),
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenParseError::InvalidCastle => write!(f, "invalid castling field"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en-passant field"),
            FenParseError::EmptyHalfmove => write!(f, "empty halfmove clock"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock"),
            FenParseError::EmptyFullmove => write!(f, "empty fullmove clock"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove clock"),
        }
    }
}

impl Error for FenParseError {}

/// The contents of a single square: the piece on it, if any, and whether the
/// piece on it has ever moved. The flag only matters for kings and rooks.
/// Squares that have been vacated carry `has_moved = true`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SquareContent {
    pub piece: Option<Piece>,
    pub has_moved: bool,
}

impl SquareContent {
    pub const EMPTY: SquareContent = SquareContent {
        piece: None,
        has_moved: true,
    };

    pub fn occupied(piece: Piece, has_moved: bool) -> SquareContent {
        SquareContent {
            piece: Some(piece),
            has_moved,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    pub fn color(&self) -> Option<Color> {
        self.piece.map(|p| p.color)
    }
}

/// A game state. Positions are values: move generation only reads them, and
/// applying a move produces a new position and leaves the old one untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    board: [[SquareContent; 8]; 8],
    side_to_move: Color,
    en_passant_file: Option<u8>,
}

//
// Board state getters
//

impl Position {
    /// An empty board with the given side to move.
    pub fn empty(side_to_move: Color) -> Position {
        Position {
            board: [[SquareContent::EMPTY; 8]; 8],
            side_to_move,
            en_passant_file: None,
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The file of the pawn that double-stepped on the previous move, if any.
    pub fn en_passant_file(&self) -> Option<u8> {
        self.en_passant_file
    }

    pub fn content(&self, square: Square) -> SquareContent {
        self.board[square.rank() as usize][square.file() as usize]
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.content(square).piece
    }

    pub fn has_moved(&self, square: Square) -> bool {
        self.content(square).has_moved
    }

    /// Returns whether the square holds an unmoved piece of the given kind and
    /// color. Used to decide castling eligibility.
    pub fn is_unmoved(&self, square: Square, kind: PieceKind, color: Color) -> bool {
        let content = self.content(square);
        content.piece == Some(Piece::new(kind, color)) && !content.has_moved
    }
}

//
// Position setup. These are for constructing positions from scratch; once a
// position exists, the only way to derive another is `apply_move`.
//

impl Position {
    pub fn with_piece(mut self, square: Square, piece: Piece, has_moved: bool) -> Position {
        self.set(square, SquareContent::occupied(piece, has_moved));
        self
    }

    pub fn with_en_passant_file(mut self, file: Option<u8>) -> Position {
        assert!(file.map_or(true, |f| f < 8), "en-passant file off the board");
        self.en_passant_file = file;
        self
    }

    fn set(&mut self, square: Square, content: SquareContent) {
        self.board[square.rank() as usize][square.file() as usize] = content;
    }

    fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square);
        self.set(square, SquareContent::EMPTY);
        piece
    }

    fn place(&mut self, square: Square, piece: Piece) {
        self.set(square, SquareContent::occupied(piece, true));
    }
}

//
// Move application
//

impl Position {
    /// Produces the position that results from playing `mov` in this
    /// position. The move is trusted to be geometrically consistent with the
    /// piece on its source square; a move from an empty square panics.
    pub fn apply_move(&self, mov: Move) -> Position {
        trace!("applying {} ({:?})", mov, mov.special());
        let mut next = self.clone();
        next.en_passant_file = None;

        let source = mov.source();
        let dest = mov.destination();
        match mov.special() {
            SpecialMove::EnPassant => {
                let pawn = next
                    .take(source)
                    .expect("invalid move: no piece at source square");
                next.place(dest, pawn);

                // The captured pawn sits beside the capturing pawn, not on the
                // destination square.
                let captured = Square::new(source.rank(), dest.file());
                next.take(captured)
                    .expect("invalid move: en-passant without a pawn to capture");
            }
            SpecialMove::KingsideCastle | SpecialMove::QueensideCastle => {
                let color = self.side_to_move;
                let (rook_square, rook_dest) = if mov.is_kingside_castle() {
                    (kingside_rook(color), Square::new(dest.rank(), dest.file() - 1))
                } else {
                    (queenside_rook(color), Square::new(dest.rank(), dest.file() + 1))
                };

                let king = next
                    .take(source)
                    .expect("invalid move: no piece at source square");
                let rook = next
                    .take(rook_square)
                    .expect("invalid move: castle without rook");
                next.place(dest, king);
                next.place(rook_dest, rook);
            }
            SpecialMove::Promotion(kind) => {
                let pawn = next
                    .take(source)
                    .expect("invalid move: no piece at source square");
                next.place(dest, Piece::new(kind, pawn.color));
            }
            SpecialMove::Ordinary => {
                let piece = next
                    .take(source)
                    .expect("invalid move: no piece at source square");
                next.place(dest, piece);
                let rank_delta = dest.rank() as i8 - source.rank() as i8;
                if piece.kind == PieceKind::Pawn && rank_delta.abs() == 2 {
                    next.en_passant_file = Some(dest.file());
                }
            }
        }

        next.side_to_move = self.side_to_move.toggle();
        next
    }
}

//
// FEN parsing and rendering. FEN castling rights are mapped onto has-moved
// flags: a right leaves the king and its rook unmoved.
//

impl Position {
    pub fn from_start_position() -> Position {
        START_POSITION.clone()
    }

    /// Constructs a new position from a FEN representation of a board
    /// position. The halfmove and fullmove clocks are optional and ignored.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn advance(iter: &mut Stream) {
            let _ = iter.next();
        }

        fn peek(iter: &mut Stream) -> Result<char, FenParseError> {
            iter.peek().cloned().ok_or(FenParseError::UnexpectedEnd)
        }

        fn eat_side_to_move(iter: &mut Stream) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            advance(iter);
            Ok(side)
        }

        fn eat_castle_status(iter: &mut Stream) -> Result<CastleStatus, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter);
                return Ok(CastleStatus::NONE);
            }

            let mut status = CastleStatus::NONE;
            for _ in 0..4 {
                match iter.peek().cloned() {
                    Some('K') => status |= CastleStatus::WHITE_KINGSIDE,
                    Some('k') => status |= CastleStatus::BLACK_KINGSIDE,
                    Some('Q') => status |= CastleStatus::WHITE_QUEENSIDE,
                    Some('q') => status |= CastleStatus::BLACK_QUEENSIDE,
                    Some(' ') | None => break,
                    _ => return Err(FenParseError::InvalidCastle),
                }

                advance(iter);
            }

            Ok(status)
        }

        fn eat_en_passant(iter: &mut Stream, side: Color) -> Result<Option<u8>, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter);
                return Ok(None);
            }

            let mut name = String::new();
            for _ in 0..2 {
                name.push(peek(iter)?);
                advance(iter);
            }

            // The target square is the one the capturing pawn would land on.
            let square = Square::try_from(name.as_str())
                .map_err(|_| FenParseError::InvalidEnPassant)?;
            let target_rank = side.en_passant_rank() as i8 + side.pawn_direction();
            if square.rank() as i8 != target_rank {
                return Err(FenParseError::InvalidEnPassant);
            }

            Ok(Some(square.file()))
        }

        fn eat_clock(
            iter: &mut Stream,
            empty: FenParseError,
            invalid: FenParseError,
        ) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            while let Some(&c) = iter.peek() {
                if !c.is_digit(10) {
                    break;
                }

                buf.push(c);
                advance(iter);
            }

            if buf.is_empty() {
                return Err(empty);
            }

            buf.parse::<u32>().map_err(|_| invalid)
        }

        let mut pos = Position::empty(Color::White);
        let iter = &mut fen.as_ref().trim().chars().peekable();
        for rank in 0..8u8 {
            let mut file = 0usize;
            while file < 8 {
                let c = peek(iter)?;
                if c == '/' {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += c as usize - '0' as usize;
                    if file > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    advance(iter);
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                let square = Square::new(rank, file as u8);
                let moved = piece.kind == PieceKind::Pawn
                    && rank != piece.color.pawn_start_rank();
                pos.set(square, SquareContent::occupied(piece, moved));
                advance(iter);
                file += 1;
            }

            if rank != 7 {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        pos.side_to_move = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        let castle_status = eat_castle_status(iter)?;
        eat(iter, ' ')?;
        pos.en_passant_file = eat_en_passant(iter, pos.side_to_move)?;
        if iter.peek().is_some() {
            eat(iter, ' ')?;
            eat_clock(
                iter,
                FenParseError::EmptyHalfmove,
                FenParseError::InvalidHalfmove,
            )?;
            eat(iter, ' ')?;
            eat_clock(
                iter,
                FenParseError::EmptyFullmove,
                FenParseError::InvalidFullmove,
            )?;
        }

        if let Some(c) = iter.next() {
            return Err(FenParseError::UnexpectedChar(c));
        }

        if let Some(file) = pos.en_passant_file {
            pos.check_en_passant(file)?;
        }

        pos.apply_castle_status(castle_status);
        Ok(pos)
    }

    // The pawn that just double-pushed must stand on the capturing rank, and
    // the square it skipped over must be empty.
    fn check_en_passant(&self, file: u8) -> Result<(), FenParseError> {
        let side = self.side_to_move;
        let pushed = Square::new(side.en_passant_rank(), file);
        let target_rank = side.en_passant_rank() as i8 + side.pawn_direction();
        let target = Square::new(target_rank as u8, file);
        let enemy_pawn = Some(Piece::new(PieceKind::Pawn, side.toggle()));
        if self.piece_at(pushed) != enemy_pawn || self.piece_at(target).is_some() {
            return Err(FenParseError::InvalidEnPassant);
        }

        Ok(())
    }

    // Every king and rook that is not backed by a castling right is marked as
    // having moved.
    fn apply_castle_status(&mut self, status: CastleStatus) {
        for square in Square::all() {
            if let Some(piece) = self.piece_at(square) {
                if piece.kind == PieceKind::King || piece.kind == PieceKind::Rook {
                    self.board[square.rank() as usize][square.file() as usize].has_moved = true;
                }
            }
        }

        for &color in &COLORS {
            let kingside = status.contains(CastleStatus::kingside(color));
            let queenside = status.contains(CastleStatus::queenside(color));
            let rooks = [
                (kingside, kingside_rook(color)),
                (queenside, queenside_rook(color)),
            ];
            for &(right, square) in &rooks {
                if right && self.piece_at(square) == Some(Piece::new(PieceKind::Rook, color)) {
                    self.board[square.rank() as usize][square.file() as usize].has_moved = false;
                }
            }

            let king = king_home(color);
            if (kingside || queenside)
                && self.piece_at(king) == Some(Piece::new(PieceKind::King, color))
            {
                self.board[king.rank() as usize][king.file() as usize].has_moved = false;
            }
        }
    }

    fn castle_status(&self) -> CastleStatus {
        let mut status = CastleStatus::NONE;
        for &color in &COLORS {
            if !self.is_unmoved(king_home(color), PieceKind::King, color) {
                continue;
            }

            if self.is_unmoved(kingside_rook(color), PieceKind::Rook, color) {
                status |= CastleStatus::kingside(color);
            }

            if self.is_unmoved(queenside_rook(color), PieceKind::Rook, color) {
                status |= CastleStatus::queenside(color);
            }
        }

        status
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for rank in 0..8u8 {
            let mut empty_squares = 0;
            for file in 0..8u8 {
                if let Some(piece) = self.piece_at(Square::new(rank, file)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if rank != 7 {
                buf.push('/');
            }
        }

        write!(&mut buf, " {} ", self.side_to_move).unwrap();
        let status = self.castle_status();
        if status.is_empty() {
            buf.push('-');
        } else {
            let flags = [
                (CastleStatus::WHITE_KINGSIDE, 'K'),
                (CastleStatus::WHITE_QUEENSIDE, 'Q'),
                (CastleStatus::BLACK_KINGSIDE, 'k'),
                (CastleStatus::BLACK_QUEENSIDE, 'q'),
            ];
            for &(flag, chr) in &flags {
                if status.contains(flag) {
                    buf.push(chr);
                }
            }
        }

        buf.push(' ');
        match self.en_passant_file {
            Some(file) => {
                let side = self.side_to_move;
                let rank = (side.en_passant_rank() as i8 + side.pawn_direction()) as u8;
                write!(&mut buf, "{}", Square::new(rank, file)).unwrap();
            }
            None => buf.push('-'),
        }

        buf.push_str(" 0 1");
        buf
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::from_start_position()
    }
}

//
// Helper functions
//

pub(crate) fn king_home(color: Color) -> Square {
    Square::new(color.home_rank(), 4)
}

pub(crate) fn kingside_rook(color: Color) -> Square {
    Square::new(color.home_rank(), 7)
}

pub(crate) fn queenside_rook(color: Color) -> Square {
    Square::new(color.home_rank(), 0)
}
