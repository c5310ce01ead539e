//! CLI frontend for the Left-Center-Right win probability solver.

mod commands;

use std::process;

use clap::{ArgAction, Parser, Subcommand};

use commands::TableArgs;

#[derive(Parser)]
#[command(
    name = "lcr",
    about = "Exact win probabilities for the dice game Left-Center-Right",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log progress to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probability that one position collects every chip
    Probability {
        /// Position to compute the probability for (1-based)
        winner: usize,

        #[command(flatten)]
        table: TableArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Win probability of every position
    Table {
        #[command(flatten)]
        table: TableArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the absorption equation of every reachable state
    Equations {
        #[command(flatten)]
        table: TableArgs,

        /// Print the equations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play random games and compare with the exact solution
    Simulate {
        #[command(flatten)]
        table: TableArgs,

        /// Number of games to play
        #[arg(short, long, default_value = "10000")]
        games: u64,

        /// RNG seed for reproducible games
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Skip the exact solve (for tables too large to explore)
        #[arg(long)]
        skip_exact: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Probability {
            winner,
            table,
            json,
        } => commands::probability::run(winner, &table, json),
        Commands::Table { table, json } => commands::table::run(&table, json),
        Commands::Equations { table, json } => commands::equations::run(&table, json),
        Commands::Simulate {
            table,
            games,
            seed,
            skip_exact,
        } => commands::simulate::run(&table, games, seed, skip_exact),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
