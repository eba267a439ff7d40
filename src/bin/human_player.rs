use clap::Parser;
use match3::game::Game;
use match3::selection::{SelectOutcome, Selection};
use match3::GameConfig;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play a timed match-3 round in the terminal", long_about = None)]
struct Args {
    /// Path to a TOML config file; defaults are used if it does not exist
    #[clap(short, long, default_value = "match3.toml")]
    config: PathBuf,

    /// Seed for the board and refills, overriding the config
    #[clap(short, long)]
    seed: Option<u64>,
}

/// Feeds the clock one tick per whole second elapsed since `started`.
/// Returns the final score if the round ended during these ticks.
fn catch_up_clock(game: &mut Game, started: Instant, ticked: &mut u64) -> Option<u32> {
    let elapsed = started.elapsed().as_secs();
    let mut final_score = None;
    while *ticked < elapsed {
        *ticked += 1;
        if let Some(score) = game.tick().final_score {
            final_score = Some(score);
        }
    }
    final_score
}

fn print_round_over(score: u32) {
    println!("---------------------");
    println!("⏰ TIME'S UP! ⏰");
    println!("Final Score: {}", score);
    println!("Enter 'r' to play again or 'q' to quit.");
    println!("---------------------");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut config = match GameConfig::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut game = match Game::new(&config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Welcome to Match-3!");
    println!(
        "Swap neighbouring tiles to line up three or more. You have {} seconds.",
        game.rules().round_seconds
    );

    let mut started = Instant::now();
    let mut ticked = 0u64;

    loop {
        if let Some(score) = catch_up_clock(&mut game, started, &mut ticked) {
            print_round_over(score);
        }

        let held = match game.selection() {
            Selection::Idle => None,
            Selection::OneSelected(pos) => Some(pos),
        };
        println!("---------------------");
        println!(
            "Score: {}, Time left: {}s",
            game.score(),
            game.remaining_seconds()
        );
        println!("{}", game.board().view(&game.rules().alphabet).with_highlight(held));

        print!("Enter a tile (row col), 'r' to restart, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        // Time spent waiting for input counts against the round.
        if let Some(score) = catch_up_clock(&mut game, started, &mut ticked) {
            print_round_over(score);
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "r" {
            game.reset();
            started = Instant::now();
            ticked = 0;
            println!("New round started.");
            continue;
        }

        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        let (r, c) = match parts.as_slice() {
            [r, c] => match (r.parse::<usize>(), c.parse::<usize>()) {
                (Ok(r), Ok(c)) => (r, c),
                _ => {
                    println!("Invalid input: Please enter numbers for row and column (e.g., '3 4'), 'r', or 'q'.");
                    continue;
                }
            },
            _ => {
                println!("Invalid input format. Use 'row col', 'r', or 'q'.");
                continue;
            }
        };

        match game.select(r, c) {
            Ok(SelectOutcome::Selected(pos)) | Ok(SelectOutcome::Ignored(pos)) => {
                println!("Holding ({}, {}). Pick a neighbour to swap.", pos.0, pos.1);
            }
            Ok(SelectOutcome::Reselected { current, .. }) => {
                println!(
                    "Not a neighbour. Now holding ({}, {}).",
                    current.0, current.1
                );
            }
            Ok(SelectOutcome::Swapped { resolution, .. }) => {
                if resolution.cascade_depth() > 1 {
                    println!(
                        "+{} points ({} cascades)!",
                        resolution.score_delta,
                        resolution.cascade_depth()
                    );
                } else {
                    println!("+{} points!", resolution.score_delta);
                }
            }
            Ok(SelectOutcome::Reverted { .. }) => {
                println!("No match. Swap undone.");
            }
            Err(e) => println!("Invalid move: {}.", e),
        }
    }

    ExitCode::SUCCESS
}
