// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::process;
use std::time::Instant;

use chessmoves::{divide, generate_moves, perft, Position};
use clap::{App, Arg, ArgMatches, SubCommand};

fn fen_arg() -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position, or \"startpos\"")
        .required(true)
        .index(1)
}

fn depth_arg() -> Arg<'static, 'static> {
    Arg::with_name("depth")
        .help("Depth of move tree to search")
        .value_name("DEPTH")
        .short("d")
        .long("depth")
        .takes_value(true)
        .default_value("1")
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the moves available in a board position")
                .arg(fen_arg())
                .arg(
                    Arg::with_name("json")
                        .help("Print the moves as a JSON array")
                        .long("json"),
                ),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg())
                .arg(depth_arg()),
        )
        .subcommand(
            SubCommand::with_name("divide")
                .about("PERFT counts for each move of a board position")
                .arg(fen_arg())
                .arg(depth_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        ("moves", Some(matches)) => run_moves(matches),
        ("perft", Some(matches)) => run_perft(matches),
        ("divide", Some(matches)) => run_divide(matches),
        _ => {
            println!("{}", matches.usage());
            process::exit(1);
        }
    }
}

fn load_position(matches: &ArgMatches) -> Position {
    let fen = matches.value_of("FEN").unwrap();
    if fen == "startpos" {
        return Position::from_start_position();
    }

    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(err) => {
            println!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn run_moves(matches: &ArgMatches) -> ! {
    let pos = load_position(matches);
    let moves = generate_moves(&pos);
    if matches.is_present("json") {
        match serde_json::to_string_pretty(&moves) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                println!("failed to serialize moves: {}", err);
                process::exit(1);
            }
        }
    } else {
        println!("fen: {}", pos.as_fen());
        for mov in &moves {
            println!("{}", mov);
        }
        println!("{} moves", moves.len());
    }

    process::exit(0);
}

fn run_perft(matches: &ArgMatches) -> ! {
    let pos = load_position(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);

    println!("fen:   {}", pos.as_fen());
    println!("depth: {}", depth);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&pos, i);
        let duration = start.elapsed();
        println!(
            "perft({}) = {} ({} ms)",
            i,
            results,
            duration.as_secs() * 1000 + u64::from(duration.subsec_millis())
        );
    }

    process::exit(0);
}

fn run_divide(matches: &ArgMatches) -> ! {
    let pos = load_position(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);
    if depth == 0 {
        println!("depth must be at least 1");
        process::exit(1);
    }

    let results = divide(&pos, depth);
    for &(mov, count) in &results {
        println!("{}: {}", mov, count);
    }

    println!();
    println!("total: {}", results.iter().map(|&(_, count)| count).sum::<u64>());
    process::exit(0);
}
