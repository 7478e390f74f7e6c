// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::move_generator::generate_moves;
use crate::moves::Move;
use crate::position::Position;

/// Counts the leaves of the pseudo-legal move tree of the given depth.
///
/// The root position is shared read-only between workers; every child
/// position is owned by the worker that derived it.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    generate_moves(pos)
        .par_iter()
        .map(|&mov| perft(&pos.apply_move(mov), depth - 1))
        .sum()
}

/// Counts the leaves below each root move, in generation order.
pub fn divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    assert!(depth > 0, "divide needs a depth of at least one");
    let results: Vec<(Move, u64)> = generate_moves(pos)
        .par_iter()
        .map(|&mov| (mov, perft(&pos.apply_move(mov), depth - 1)))
        .collect();
    for &(mov, count) in &results {
        debug!("divide: {} => {}", mov, count);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::{divide, perft};
    use crate::position::Position;

    fn perft_test(fen: &'static str, depth: u32, count: u64) {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(count, perft(&pos, depth));
    }

    macro_rules! perft_tests {
        () => {};
        ($name:ident ($depth:expr): $fen:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            fn $name() {
                perft_test($fen, $depth, $count)
            }

            perft_tests!($($tail)*);
        };
    }

    perft_tests! {
        depth_zero(0): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 1;
        start_depth_1(1): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 20;
        start_depth_2(2): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 400;
        bare_kings_depth_1(1): "4k3/8/8/8/8/8/8/4K3 w - - 0 1" => 5;
        bare_kings_depth_2(2): "4k3/8/8/8/8/8/8/4K3 w - - 0 1" => 25;
        castling_rooks_depth_1(1): "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1" => 26;
    }

    #[test]
    fn divide_matches_perft() {
        let pos = Position::from_start_position();
        let results = divide(&pos, 2);
        assert_eq!(20, results.len());
        assert!(results.iter().all(|&(_, count)| count == 20));
        assert_eq!(
            perft(&pos, 2),
            results.iter().map(|&(_, count)| count).sum::<u64>()
        );
    }
}
