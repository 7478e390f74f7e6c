// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use chessmoves::{apply_move, generate_moves, perft, Position};
use criterion::black_box;
use criterion::Criterion;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("position clone", |b| {
        let pos = Position::from_start_position();
        b.iter(|| black_box(&pos).clone())
    });

    c.bench_function("generate moves start", |b| {
        let pos = Position::from_start_position();
        b.iter(|| generate_moves(black_box(&pos)))
    });

    c.bench_function("generate moves kiwipete", |b| {
        let pos = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| generate_moves(black_box(&pos)))
    });

    c.bench_function("apply all moves kiwipete", |b| {
        let pos = Position::from_fen(KIWIPETE).unwrap();
        let moves = generate_moves(&pos);
        b.iter(|| {
            for &mov in &moves {
                black_box(apply_move(&pos, mov));
            }
        })
    });

    c.bench_function("perft 3 start", |b| {
        let pos = Position::from_start_position();
        b.iter(|| perft(black_box(&pos), 3))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
