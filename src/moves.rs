// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of Moves in the chessmoves
//! rules engine.
//!
//! A move is a source square, a destination square, and a tag describing
//! which of chess's irregular moves (if any) it is. Exactly one tag applies
//! to each move; `Ordinary` covers everything that is not one of the others,
//! including captures and double pawn pushes.
//!
//! | Tag               | Source         | Destination                     |
//! |-------------------|----------------|---------------------------------|
//! | `Ordinary`        | moving piece   | target square                   |
//! | `EnPassant`       | capturing pawn | square behind the captured pawn |
//! | `KingsideCastle`  | king           | two squares toward the h-file   |
//! | `QueensideCastle` | king           | two squares toward the a-file   |
//! | `Promotion(kind)` | pawn           | square on the last rank         |
use std::fmt::{self, Write};

use crate::types::{PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialMove {
    Ordinary,
    EnPassant,
    KingsideCastle,
    QueensideCastle,
    Promotion(PieceKind),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    source: Square,
    destination: Square,
    special: SpecialMove,
}

impl Move {
    /// Constructs a new ordinary move from the source square to the
    /// destination square.
    pub fn ordinary(source: Square, dest: Square) -> Move {
        Move {
            source,
            destination: dest,
            special: SpecialMove::Ordinary,
        }
    }

    /// Constructs a new en passant capture. `dest` is the square the
    /// capturing pawn lands on, not the square of the captured pawn.
    pub fn en_passant(source: Square, dest: Square) -> Move {
        Move {
            source,
            destination: dest,
            special: SpecialMove::EnPassant,
        }
    }

    /// Constructs a new kingside castle, encoded as the king's movement.
    pub fn kingside_castle(source: Square, dest: Square) -> Move {
        Move {
            source,
            destination: dest,
            special: SpecialMove::KingsideCastle,
        }
    }

    /// Constructs a new queenside castle, encoded as the king's movement.
    pub fn queenside_castle(source: Square, dest: Square) -> Move {
        Move {
            source,
            destination: dest,
            special: SpecialMove::QueensideCastle,
        }
    }

    /// Constructs a new promotion of the pawn on the source square to the
    /// given piece kind. Panics if the kind is a pawn or a king.
    pub fn promotion(source: Square, dest: Square, promoted: PieceKind) -> Move {
        match promoted {
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {}
            _ => panic!("invalid move: cannot promote to {:?}", promoted),
        }

        Move {
            source,
            destination: dest,
            special: SpecialMove::Promotion(promoted),
        }
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn special(self) -> SpecialMove {
        self.special
    }

    pub fn is_ordinary(self) -> bool {
        self.special == SpecialMove::Ordinary
    }

    pub fn is_en_passant(self) -> bool {
        self.special == SpecialMove::EnPassant
    }

    pub fn is_kingside_castle(self) -> bool {
        self.special == SpecialMove::KingsideCastle
    }

    pub fn is_queenside_castle(self) -> bool {
        self.special == SpecialMove::QueensideCastle
    }

    pub fn is_castle(self) -> bool {
        self.is_kingside_castle() || self.is_queenside_castle()
    }

    pub fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// If this move is a promotion, returns the piece kind that the
    /// pawn is being promoted to.
    pub fn promotion_piece(self) -> Option<PieceKind> {
        match self.special {
            SpecialMove::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns a coordinate-notation string for this move, the way UCI
    /// spells moves.
    /// # Example
    /// ```
    /// use std::convert::TryFrom;
    /// use chessmoves::{Move, Square};
    ///
    /// let e2 = Square::try_from("e2").unwrap();
    /// let e4 = Square::try_from("e4").unwrap();
    /// assert_eq!("e2e4", Move::ordinary(e2, e4).as_uci());
    /// ```
    pub fn as_uci(self) -> String {
        let mut buf = String::new();
        write!(&mut buf, "{}{}", self.source, self.destination).unwrap();
        if let Some(kind) = self.promotion_piece() {
            buf.push(kind.as_char());
        }

        buf
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_uci())
    }
}
