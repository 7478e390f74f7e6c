// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal chess move generation and move application.
//!
//! `generate_moves` enumerates the moves available to the side to move,
//! including en passant captures, castles and promotions. `apply_move`
//! produces the position that follows a move. Positions are plain values,
//! so many moves can be tried from one position without undoing anything.
//!
//! ```
//! use chessmoves::{apply_move, generate_moves, Color, Position};
//!
//! let pos = Position::from_start_position();
//! let moves = generate_moves(&pos);
//! assert_eq!(20, moves.len());
//!
//! let next = apply_move(&pos, moves[0]);
//! assert_eq!(Color::Black, next.side_to_move());
//! ```

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod move_generator;
mod moves;
mod perft;
mod position;
pub mod probe;
mod special_moves;
mod types;

pub use move_generator::{generate_moves, piece_moves, MoveVec};
pub use moves::{Move, SpecialMove};
pub use perft::{divide, perft};
pub use position::{FenParseError, Position, SquareContent, START_FEN};
pub use types::{CastleStatus, Color, Piece, PieceKind, Square, TableIndex, PROMOTION_KINDS};

/// Produces the position that follows `mov`, leaving `pos` untouched.
pub fn apply_move(pos: &Position, mov: Move) -> Position {
    pos.apply_move(mov)
}
