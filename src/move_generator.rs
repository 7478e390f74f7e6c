// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::moves::Move;
use crate::position::Position;
use crate::probe::{extend_ray, probe, Destinations, ProbeFlags};
use crate::special_moves;
use crate::types::{Color, PieceKind, Square, PROMOTION_KINDS};

pub type MoveVec = Vec<Move>;

/// Generates every pseudo-legal move for the side to move.
///
/// Moves come out in square-scan order (rank 0 to rank 7, file a to file h),
/// and within a square in the fixed direction order of `piece_moves`. En
/// passant captures and castles follow, in that order. Moves that leave the
/// mover's own king attacked are not filtered out.
pub fn generate_moves(pos: &Position) -> MoveVec {
    let mut moves = MoveVec::new();
    let mut opponent_moves = MoveVec::new();
    let to_move = pos.side_to_move();
    for square in Square::all() {
        match pos.content(square).color() {
            Some(color) if color == to_move => piece_moves(pos, square, &mut moves),
            Some(_) => piece_moves(pos, square, &mut opponent_moves),
            None => {}
        }
    }

    special_moves::generate_special_moves(pos, &opponent_moves, &mut moves);
    debug!(
        "generated {} moves for {:?} ({} opponent moves considered)",
        moves.len(),
        to_move,
        opponent_moves.len()
    );
    moves
}

/// Appends the pseudo-legal moves of the piece on `square` to `moves`. An
/// empty square has no moves.
pub fn piece_moves(pos: &Position, square: Square, moves: &mut MoveVec) {
    let piece = match pos.piece_at(square) {
        Some(piece) => piece,
        None => return,
    };

    let mut dests = Destinations::new();
    match piece.kind {
        PieceKind::Pawn => {
            let forward = piece.color.pawn_direction();
            let steps = if square.rank() == piece.color.pawn_start_rank() {
                2
            } else {
                1
            };

            for i in 1..=steps {
                let outcome = probe(pos, square, forward * i, 0, ProbeFlags::PUSH, &mut dests);
                if !outcome.continue_ray {
                    break;
                }
            }

            probe(pos, square, forward, -1, ProbeFlags::CAPTURE, &mut dests);
            probe(pos, square, forward, 1, ProbeFlags::CAPTURE, &mut dests);
            add_pawn_moves(piece.color, square, &dests, moves);
            return;
        }
        PieceKind::Knight => {
            for dr in -2i8..=2 {
                for dc in -2i8..=2 {
                    if dr * dr + dc * dc == 5 {
                        probe(pos, square, dr, dc, ProbeFlags::MOVE_OR_CAPTURE, &mut dests);
                    }
                }
            }
        }
        PieceKind::Bishop => {
            for &dr in &[-1i8, 1] {
                for &dc in &[-1i8, 1] {
                    extend_ray(pos, square, dr, dc, &mut dests);
                }
            }
        }
        PieceKind::Rook => {
            for dr in -1i8..=1 {
                for dc in -1i8..=1 {
                    if dr * dr + dc * dc == 1 {
                        extend_ray(pos, square, dr, dc, &mut dests);
                    }
                }
            }
        }
        PieceKind::Queen => {
            for dr in -1i8..=1 {
                for dc in -1i8..=1 {
                    if (dr, dc) != (0, 0) {
                        extend_ray(pos, square, dr, dc, &mut dests);
                    }
                }
            }
        }
        PieceKind::King => {
            for dr in -1i8..=1 {
                for dc in -1i8..=1 {
                    if (dr, dc) != (0, 0) {
                        probe(pos, square, dr, dc, ProbeFlags::MOVE_OR_CAPTURE, &mut dests);
                    }
                }
            }
        }
    }

    moves.extend(dests.iter().map(|&dest| Move::ordinary(square, dest)));
}

// A pawn reaching the last rank produces one move per promotion kind instead
// of an ordinary move.
fn add_pawn_moves(color: Color, source: Square, dests: &[Square], moves: &mut MoveVec) {
    for &dest in dests {
        if dest.rank() == color.promotion_rank() {
            trace!("pawn on {} promotes on {}", source, dest);
            for &kind in &PROMOTION_KINDS {
                moves.push(Move::promotion(source, dest, kind));
            }
        } else {
            moves.push(Move::ordinary(source, dest));
        }
    }
}
