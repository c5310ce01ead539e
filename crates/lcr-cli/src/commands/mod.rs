pub mod equations;
pub mod probability;
pub mod simulate;
pub mod table;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use lcr_core::{AbsorptionAnalysis, DiceRule, RollExpansion, SolveConfig, State};

/// Table description and solver options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Chips held by each position, in seating order
    #[arg(required = true, num_args = 1..)]
    pub chips: Vec<u32>,

    /// Position that rolls first (1-based; default: first position holding chips)
    #[arg(long)]
    pub turn: Option<usize>,

    /// Roll at most this many dice per turn (approximation)
    #[arg(long)]
    pub dice_cap: Option<u32>,

    /// Expand rolls as ordered face sequences instead of face tallies
    #[arg(long)]
    pub sequences: bool,

    /// Maximum number of non-ending states to explore
    #[arg(long, default_value = "20000")]
    pub max_states: usize,

    /// Solve every position on a single thread
    #[arg(long)]
    pub serial: bool,
}

impl TableArgs {
    /// Dice rule selected on the command line.
    pub fn dice(&self) -> DiceRule {
        self.dice_cap.map_or(DiceRule::Exact, DiceRule::Capped)
    }

    /// Solver configuration selected on the command line.
    pub fn config(&self) -> SolveConfig {
        let expansion = if self.sequences {
            RollExpansion::Sequences
        } else {
            RollExpansion::Tallies
        };
        SolveConfig::default()
            .with_dice(self.dice())
            .with_expansion(expansion)
            .with_max_states(self.max_states)
            .with_parallel(!self.serial)
    }

    /// Start state: the given turn, or the opening state.
    pub fn start(&self) -> Result<State, String> {
        let chips = self.chips.clone();
        let state = match self.turn {
            Some(turn) => {
                let index = position_index(turn, chips.len())?;
                State::new(index, chips)
            }
            None => State::opening(chips),
        };
        state.map_err(|e| e.to_string())
    }
}

/// Per-position result row used by JSON output.
#[derive(Debug, Serialize)]
pub struct PositionReport {
    /// 1-based position.
    pub position: usize,
    /// Chips held at the start.
    pub chips: u32,
    /// Probability of collecting every chip.
    pub probability: f64,
}

/// Convert a 1-based position from the command line to an index.
pub fn position_index(position: usize, positions: usize) -> Result<usize, String> {
    if position == 0 || position > positions {
        return Err(format!(
            "position must be between 1 and {positions}, got {position}"
        ));
    }
    Ok(position - 1)
}

/// Explore the table described by `args`.
fn analyse(args: &TableArgs) -> Result<AbsorptionAnalysis, String> {
    let start = args.start()?;
    AbsorptionAnalysis::new(start, args.config()).map_err(|e| e.to_string())
}

/// Note printed under results computed with the dice cap.
fn print_approximation_note(args: &TableArgs) {
    if args.dice().is_approximate() {
        println!(
            "  {} dice {}; results approximate the one-die-per-chip game",
            "note:".yellow().bold(),
            args.dice()
        );
    }
}

fn format_percent(probability: f64) -> String {
    format!("{:.4}%", probability * 100.0)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}
