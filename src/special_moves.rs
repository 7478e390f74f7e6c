// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Moves that depend on position history rather than geometry alone: en
//! passant captures, which need the file of the last double pawn push, and
//! castles, which need the has-moved flags of the king and rook plus the
//! opponent's moves to decide whether the king's path is safe.
use crate::move_generator::MoveVec;
use crate::moves::Move;
use crate::position::{king_home, kingside_rook, queenside_rook, Position};
use crate::types::{Piece, PieceKind, Square};

/// Appends en passant captures and castles for the side to move. En passant
/// captures come first, then the kingside castle, then the queenside castle.
pub fn generate_special_moves(pos: &Position, opponent_moves: &[Move], moves: &mut MoveVec) {
    add_en_passant(pos, moves);
    add_castles(pos, opponent_moves, moves);
}

fn add_en_passant(pos: &Position, moves: &mut MoveVec) {
    let file = match pos.en_passant_file() {
        Some(file) => file,
        None => return,
    };

    let color = pos.side_to_move();
    let rank = color.en_passant_rank();
    let target_rank = (rank as i8 + color.pawn_direction()) as u8;
    let target = Square::new(target_rank, file);
    let pawn = Some(Piece::new(PieceKind::Pawn, color));
    for &dc in &[-1i8, 1] {
        let source = match Square::new(rank, file).offset(0, dc) {
            Some(source) => source,
            None => continue,
        };

        if pos.piece_at(source) == pawn {
            trace!("en passant available: {} takes on {}", source, target);
            moves.push(Move::en_passant(source, target));
        }
    }
}

fn add_castles(pos: &Position, opponent_moves: &[Move], moves: &mut MoveVec) {
    let color = pos.side_to_move();
    let king = king_home(color);
    if !pos.is_unmoved(king, PieceKind::King, color) {
        return;
    }

    if can_castle(pos, opponent_moves, kingside_rook(color), 1, 2) {
        moves.push(Move::kingside_castle(king, Square::new(king.rank(), king.file() + 2)));
    }

    if can_castle(pos, opponent_moves, queenside_rook(color), -1, 3) {
        moves.push(Move::queenside_castle(king, Square::new(king.rank(), king.file() - 2)));
    }
}

// The squares between king and rook must all be empty, and none of them may
// be the destination of an opponent move. On the queenside that includes the
// b-file square the king never crosses.
fn can_castle(
    pos: &Position,
    opponent_moves: &[Move],
    rook: Square,
    direction: i8,
    distance: i8,
) -> bool {
    let color = pos.side_to_move();
    if !pos.is_unmoved(rook, PieceKind::Rook, color) {
        return false;
    }

    let king = king_home(color);
    let path = || {
        (1..=distance)
            .map(move |n| Square::new(king.rank(), (king.file() as i8 + n * direction) as u8))
    };

    if let Some(blocker) = path().find(|&sq| pos.piece_at(sq).is_some()) {
        trace!("castle toward {} blocked on {}", rook, blocker);
        return false;
    }

    let attacked = |sq: Square| opponent_moves.iter().any(|m| m.destination() == sq);
    if let Some(square) = path().find(|&sq| attacked(sq)) {
        debug!("castle toward {} vetoed: {} is attacked", rook, square);
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generator::{generate_moves, piece_moves};
    use std::convert::TryFrom;

    fn sq(name: &str) -> Square {
        Square::try_from(name).unwrap()
    }

    fn special_moves(fen: &str) -> MoveVec {
        let pos = Position::from_fen(fen).unwrap();
        let mut opponent = MoveVec::new();
        for square in Square::all() {
            if pos.content(square).color() == Some(pos.side_to_move().toggle()) {
                piece_moves(&pos, square, &mut opponent);
            }
        }

        let mut moves = MoveVec::new();
        generate_special_moves(&pos, &opponent, &mut moves);
        moves
    }

    #[test]
    fn both_castles_in_order() {
        let moves = special_moves("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(
            vec![
                Move::kingside_castle(sq("e1"), sq("g1")),
                Move::queenside_castle(sq("e1"), sq("c1")),
            ],
            moves
        );
    }

    #[test]
    fn black_castles() {
        let moves = special_moves("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        assert_eq!(
            vec![
                Move::kingside_castle(sq("e8"), sq("g8")),
                Move::queenside_castle(sq("e8"), sq("c8")),
            ],
            moves
        );
    }

    #[test]
    fn queenside_blocked_on_b_file() {
        let moves = special_moves("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
        assert_eq!(vec![Move::kingside_castle(sq("e1"), sq("g1"))], moves);
    }

    #[test]
    fn moved_rook_cannot_castle() {
        let moves = special_moves("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1");
        assert_eq!(vec![Move::queenside_castle(sq("e1"), sq("c1"))], moves);
    }

    #[test]
    fn moved_king_cannot_castle() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let king = Piece::new(PieceKind::King, pos.side_to_move());
        let pos = pos.with_piece(sq("e1"), king, true);
        assert!(generate_moves(&pos).iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn attacked_path_vetoes_castle() {
        // black rook on f8 covers f1
        let moves = special_moves("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(vec![Move::queenside_castle(sq("e1"), sq("c1"))], moves);
    }

    #[test]
    fn attacked_b_file_vetoes_queenside() {
        // black rook on b8 covers b1
        let moves = special_moves("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(vec![Move::kingside_castle(sq("e1"), sq("g1"))], moves);
    }

    #[test]
    fn en_passant_from_both_sides() {
        let moves = special_moves("4k3/8/8/2PpP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(
            vec![
                Move::en_passant(sq("c5"), sq("d6")),
                Move::en_passant(sq("e5"), sq("d6")),
            ],
            moves
        );
    }

    #[test]
    fn black_en_passant() {
        let moves = special_moves("4k3/8/8/8/Pp6/8/8/4K3 b - a3 0 1");
        assert_eq!(vec![Move::en_passant(sq("b4"), sq("a3"))], moves);
    }

    #[test]
    fn no_en_passant_without_adjacent_pawn() {
        assert!(special_moves("4k3/8/8/3p4/8/8/8/4K3 w - d6 0 1").is_empty());
    }
}
