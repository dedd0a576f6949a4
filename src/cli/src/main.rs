#![warn(clippy::pedantic)]

use std::{fs, path::PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::{eyre::WrapErr, owo_colors::OwoColorize};
use cube_core::{AlphabetConfig, CubeState, Metric, Notation, Scramble};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, debug, info};

/// Parses, rewrites and applies Rubik's cube scrambles
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// A TOML file describing the notation alphabet
    #[arg(long, global = true)]
    alphabet: Option<PathBuf>,
    /// Printed between consecutive steps
    #[arg(long, default_value = " ", global = true)]
    separator: String,
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a scramble and repeat its groups
    Parse { scramble: String },
    /// Merge steps that can be written as fewer steps
    Shrink { scramble: String },
    /// Write every step in its canonical spelling
    Simplify { scramble: String },
    /// Rewrite a scramble without whole cube turns
    RemoveTurns { scramble: String },
    /// Decompose every step into face moves and whole cube turns
    Basic { scramble: String },
    /// Print the scramble undoing the given one
    Invert { scramble: String },
    /// Reverse the order of the steps
    Reverse { scramble: String },
    /// Count the length of a scramble in every metric
    Metrics { scramble: String },
    /// Apply a scramble to a solved cube and print its facelets
    Apply { scramble: String },
    /// Generate a random scramble of face moves
    Random {
        #[arg(default_value_t = 25)]
        length: usize,
        /// Seed the generator to get the same scramble every time
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn load_notation(path: Option<&PathBuf>) -> color_eyre::Result<Notation> {
    let Some(path) = path else {
        return Ok(Notation::standard().clone());
    };

    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("Could not read the alphabet at {}", path.display()))?;
    let notation = Notation::new(AlphabetConfig::from_toml_str(&text)?)?;
    info!("Loaded alphabet from {}", path.display());
    Ok(notation)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let notation = load_notation(cli.alphabet.as_ref())?;
    let convention = notation.convention();
    let print = |scramble: &Scramble| println!("{}", scramble.text(&notation, &cli.separator));

    match cli.command {
        Commands::Parse { scramble } => {
            print(&Scramble::parse(&scramble, &notation));
        }
        Commands::Shrink { scramble } => {
            let mut scramble = Scramble::read(&scramble, &notation);
            scramble.shrink();
            print(&scramble);
        }
        Commands::Simplify { scramble } => {
            let mut scramble = Scramble::read(&scramble, &notation);
            scramble.simplify();
            print(&scramble);
        }
        Commands::RemoveTurns { scramble } => {
            let mut scramble = Scramble::read(&scramble, &notation);
            scramble.remove_turns(convention)?;
            print(&scramble);
        }
        Commands::Basic { scramble } => {
            let mut scramble = Scramble::read(&scramble, &notation);
            scramble.to_basic_steps(convention);
            print(&scramble);
        }
        Commands::Invert { scramble } => {
            let mut scramble = Scramble::read(&scramble, &notation);
            scramble.invert_and_reverse()?;
            print(&scramble);
        }
        Commands::Reverse { scramble } => {
            let mut scramble = Scramble::read(&scramble, &notation);
            scramble.reverse()?;
            print(&scramble);
        }
        Commands::Metrics { scramble } => {
            let scramble = Scramble::read(&scramble, &notation);
            println!(
                "{}",
                Metric::ALL
                    .iter()
                    .map(|&metric| format!("{metric}: {}", scramble.metric(metric)))
                    .join("  ")
            );
        }
        Commands::Apply { scramble } => {
            let scramble = Scramble::read(&scramble, &notation);
            let mut cube = CubeState::with_convention(convention);
            cube.apply_scramble(&scramble);
            debug!("Final orientation {}", cube.spin());

            println!("{}", cube.facelets());
            if cube.is_solved() {
                println!("{}", "SOLVED".green());
            } else {
                println!("{}", "NOT SOLVED".red());
            }
        }
        Commands::Random { length, seed } => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            print(&Scramble::random(length, &mut rng));
        }
    }

    Ok(())
}
