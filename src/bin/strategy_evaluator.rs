use clap::Parser;
use match3::game::Game;
use match3::heuristics::{choose_swap, Strategy};
use match3::GameConfig;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare automated match-3 strategies on seeded boards", long_about = None)]
struct Args {
    /// Number of seeded rounds each strategy plays
    #[clap(short, long, default_value_t = 20)]
    rounds: u64,

    /// Seed of the first round; round i uses start_seed + i
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Swaps per round; each swap costs one second of the round clock
    #[clap(short, long, default_value_t = 60)]
    moves: u32,

    /// Strategies to evaluate (all of them if omitted)
    #[clap(short, long, value_enum)]
    strategy: Vec<Strategy>,

    /// Path to a TOML config file; defaults are used if it does not exist
    #[clap(short, long, default_value = "match3.toml")]
    config: PathBuf,
}

/// Plays one round with `strategy`, returning the score and the number of kept swaps.
fn play_round(game: &mut Game, strategy: Strategy, moves: u32) -> (u32, u32) {
    let mut kept = 0;
    for _ in 0..moves {
        if game.is_over() {
            break;
        }
        let Some(swap) = choose_swap(strategy, game.board(), game.rules()) else {
            debug!(strategy = strategy.name(), "no productive swap left");
            break;
        };
        let applied = game
            .select(swap.from.0, swap.from.1)
            .and_then(|_| game.select(swap.to.0, swap.to.1));
        match applied {
            Ok(outcome) if outcome.applied_swap() => kept += 1,
            Ok(outcome) => {
                warn!(strategy = strategy.name(), ?outcome, "chosen swap was not kept");
                break;
            }
            Err(e) => {
                warn!(strategy = strategy.name(), error = %e, "chosen swap was refused");
                break;
            }
        }
        game.tick();
    }
    (game.score(), kept)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let rules = match GameConfig::load_or_default(&args.config).and_then(|c| c.rules()) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let strategies: Vec<Strategy> = if args.strategy.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        args.strategy.clone()
    };

    let mut all_scores: HashMap<Strategy, Vec<u32>> = HashMap::new();

    println!("Starting strategy evaluation for {} rounds...", args.rounds);

    for round_idx in 0..args.rounds {
        let seed = args.start_seed + round_idx;
        println!("\nEvaluating Round {} (Seed: {})", round_idx, seed);

        for &strategy in &strategies {
            // Same seed per strategy: identical starting board and refill stream.
            let mut game = match Game::with_rules(rules.clone(), seed) {
                Ok(game) => game,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let (score, kept) = play_round(&mut game, strategy, args.moves);
            println!(
                "  Strategy: {:<10}, Score: {:<6}, Swaps: {}",
                strategy.name(),
                score,
                kept
            );
            all_scores.entry(strategy).or_default().push(score);
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of rounds evaluated: {}", args.rounds);
    println!(
        "Strategies evaluated: {}",
        strategies
            .iter()
            .map(Strategy::name)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("\n--- Average Scores ---");

    let mut sorted_avg_scores: Vec<(Strategy, f64)> = Vec::new();
    for strategy in &strategies {
        match all_scores.get(strategy) {
            Some(scores) if !scores.is_empty() => {
                let total: f64 = scores.iter().map(|s| *s as f64).sum();
                sorted_avg_scores.push((*strategy, total / scores.len() as f64));
            }
            _ => println!("Strategy {}: No scores recorded.", strategy.name()),
        }
    }

    sorted_avg_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (strategy, avg_score) in sorted_avg_scores {
        println!(
            "Strategy {:<10}: Average Score = {:.2}",
            strategy.name(),
            avg_score
        );
    }

    ExitCode::SUCCESS
}
