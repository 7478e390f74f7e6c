// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The step probe, the primitive every piece's move generation is built
//! from. A probe looks at the square a fixed displacement away from a piece
//! and reports two independent things: whether that square was recorded as a
//! destination, and whether a sliding piece may continue past it.
use arrayvec::ArrayVec;

use crate::position::Position;
use crate::types::Square;

/// Destination squares of a single piece. A queen in the middle of an empty
/// board has the most, at 27.
pub type Destinations = ArrayVec<[Square; 32]>;

/// Occupancy rules for a probed step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProbeFlags {
    /// The step may land on an enemy piece. False for pawn pushes.
    pub can_take: bool,
    /// The step is only valid if it lands on an enemy piece. True for pawn
    /// captures.
    pub must_take: bool,
}

impl ProbeFlags {
    /// Every piece except a pawn: moves to empty squares or captures.
    pub const MOVE_OR_CAPTURE: ProbeFlags = ProbeFlags {
        can_take: true,
        must_take: false,
    };

    /// A pawn push: only to empty squares.
    pub const PUSH: ProbeFlags = ProbeFlags {
        can_take: false,
        must_take: false,
    };

    /// A pawn capture: only onto enemy pieces.
    pub const CAPTURE: ProbeFlags = ProbeFlags {
        can_take: true,
        must_take: true,
    };
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub recorded: bool,
    pub continue_ray: bool,
}

impl ProbeOutcome {
    const BLOCKED: ProbeOutcome = ProbeOutcome {
        recorded: false,
        continue_ray: false,
    };
}

/// Probes the square `(dr, dc)` away from `source`, pushing it onto `dests`
/// if the piece on `source` may move there under `flags`.
pub fn probe(
    pos: &Position,
    source: Square,
    dr: i8,
    dc: i8,
    flags: ProbeFlags,
    dests: &mut Destinations,
) -> ProbeOutcome {
    let mover = pos
        .piece_at(source)
        .expect("probe from an empty square")
        .color;
    let dest = match source.offset(dr, dc) {
        Some(dest) => dest,
        None => return ProbeOutcome::BLOCKED,
    };

    let occupant = pos.content(dest).color();
    if occupant == Some(mover) {
        return ProbeOutcome::BLOCKED;
    }

    let is_enemy = occupant.is_some();
    let recorded = (flags.can_take || !is_enemy) && (!flags.must_take || is_enemy);
    if recorded {
        dests.push(dest);
    }

    ProbeOutcome {
        recorded,
        continue_ray: !is_enemy,
    }
}

/// Probes successive squares along the direction `(dr, dc)` until the probe
/// reports the ray is blocked.
pub fn extend_ray(pos: &Position, source: Square, dr: i8, dc: i8, dests: &mut Destinations) {
    for n in 1..8 {
        let outcome = probe(pos, source, n * dr, n * dc, ProbeFlags::MOVE_OR_CAPTURE, dests);
        if !outcome.continue_ray {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Piece, PieceKind};
    use std::convert::TryFrom;

    fn sq(name: &str) -> Square {
        Square::try_from(name).unwrap()
    }

    fn rook_on_d4() -> Position {
        Position::empty(Color::White)
            .with_piece(sq("d4"), Piece::new(PieceKind::Rook, Color::White), true)
            .with_piece(sq("d6"), Piece::new(PieceKind::Pawn, Color::Black), true)
            .with_piece(sq("f4"), Piece::new(PieceKind::Pawn, Color::White), true)
    }

    #[test]
    fn off_board_stops_ray() {
        let pos = Position::empty(Color::White).with_piece(
            sq("a1"),
            Piece::new(PieceKind::King, Color::White),
            true,
        );
        let mut dests = Destinations::new();
        let outcome = probe(&pos, sq("a1"), 1, 0, ProbeFlags::MOVE_OR_CAPTURE, &mut dests);
        assert_eq!(ProbeOutcome::BLOCKED, outcome);
        assert!(dests.is_empty());
    }

    #[test]
    fn own_piece_blocks_without_recording() {
        let pos = rook_on_d4();
        let mut dests = Destinations::new();
        let outcome = probe(&pos, sq("d4"), 0, 2, ProbeFlags::MOVE_OR_CAPTURE, &mut dests);
        assert_eq!(ProbeOutcome::BLOCKED, outcome);
        assert!(dests.is_empty());
    }

    #[test]
    fn enemy_piece_is_recorded_and_stops() {
        let pos = rook_on_d4();
        let mut dests = Destinations::new();
        let outcome = probe(&pos, sq("d4"), -2, 0, ProbeFlags::MOVE_OR_CAPTURE, &mut dests);
        assert!(outcome.recorded);
        assert!(!outcome.continue_ray);
        assert_eq!(&[sq("d6")], &dests[..]);
    }

    #[test]
    fn push_cannot_take() {
        let pos = rook_on_d4();
        let mut dests = Destinations::new();
        let outcome = probe(&pos, sq("d4"), -2, 0, ProbeFlags::PUSH, &mut dests);
        assert!(!outcome.recorded);
        assert!(!outcome.continue_ray);
        assert!(dests.is_empty());
    }

    #[test]
    fn capture_needs_a_target() {
        let pos = rook_on_d4();
        let mut dests = Destinations::new();
        let outcome = probe(&pos, sq("d4"), -1, 0, ProbeFlags::CAPTURE, &mut dests);
        assert!(!outcome.recorded);
        assert!(outcome.continue_ray);
        assert!(dests.is_empty());
    }

    #[test]
    fn ray_stops_at_blockers() {
        let pos = rook_on_d4();
        let mut dests = Destinations::new();
        extend_ray(&pos, sq("d4"), -1, 0, &mut dests);
        extend_ray(&pos, sq("d4"), 0, 1, &mut dests);
        assert_eq!(&[sq("d5"), sq("d6"), sq("e4")], &dests[..]);
    }
}
