#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from
)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use connect_four_ai::{
    AiPlayer, DEFAULT_SEARCH_DEPTH, Game, GameState, Gameboard, Piece, SearchConfig,
};
use log::info;
use rand::Rng;

const HUMAN: Piece = Piece::PlayerA;
const COMPUTER: Piece = Piece::PlayerB;

/// Search depth from the first argument, if any.
fn parse_depth() -> Result<usize> {
    let Some(arg) = std::env::args().nth(1) else {
        return Ok(DEFAULT_SEARCH_DEPTH);
    };
    let depth = arg
        .parse::<usize>()
        .with_context(|| format!("invalid search depth: {arg}"))?;
    if depth == 0 {
        bail!("search depth must be at least 1");
    }
    Ok(depth)
}

fn print_board(board: &Gameboard) {
    print!("{board}");

    for _ in 0..board.width() {
        print!("--");
    }
    println!();

    for col_id in (0..board.width()).map(|i| i + 1) {
        print!("{col_id},");
    }
    println!();
}

fn main() -> Result<()> {
    env_logger::init();

    let depth = parse_depth()?;
    let first = if rand::thread_rng().gen_bool(0.5) {
        HUMAN
    } else {
        COMPUTER
    };
    let computer = AiPlayer::new(COMPUTER, SearchConfig::default().with_depth(depth));
    let mut game = Game::<7, 6>::new(first);
    info!("search depth {depth}, {first:?} begins");

    let mut lines = io::stdin().lock().lines();

    println!("Let's play Connect Four against the computer.");
    loop {
        println!("----------------");
        print_board(game.board());
        println!();

        match game.state() {
            GameState::Ongoing => {}
            GameState::Won(HUMAN) => {
                println!("You won!");
                break;
            }
            GameState::Won(_) => {
                println!("Computer won!");
                break;
            }
            GameState::Draw => {
                println!("Gameover: draw");
                break;
            }
        }

        // Human player
        if game.current() == HUMAN {
            print!("Choose your move (column): ");
            for col in game.board().open_columns_iter().map(|x| x + 1) {
                print!("{col},");
            }
            println!();
            io::stdout().flush().context("failed to flush stdout")?;

            let Some(line) = lines.next() else {
                println!("Bye.");
                break;
            };
            let line = line.context("failed to read from stdin")?;

            // adapt to index
            let column = match line.trim().parse::<usize>() {
                Ok(column @ 1..) => column - 1,
                _ => {
                    println!("Invalid number: {}", line.trim());
                    continue;
                }
            };

            if let Err(err) = game.play(column) {
                println!("Invalid move: {err}");
            }
        }
        // Computer player
        else {
            let (column, _) = computer.play(&mut game)?;
            println!("Computer chose column {}", column + 1);
        }
    }

    Ok(())
}
