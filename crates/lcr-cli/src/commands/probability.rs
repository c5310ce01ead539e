use colored::Colorize;
use serde::Serialize;

use super::{PositionReport, TableArgs};

#[derive(Serialize)]
struct ProbabilityOutput {
    chips: Vec<u32>,
    turn: usize,
    dice: String,
    states: usize,
    winner: PositionReport,
}

pub fn run(winner: usize, args: &TableArgs, json: bool) -> Result<(), String> {
    let index = super::position_index(winner, args.chips.len())?;
    let analysis = super::analyse(args)?;
    let probability = analysis
        .win_probability(index)
        .map_err(|e| e.to_string())?;

    if json {
        return super::print_json(&ProbabilityOutput {
            chips: args.chips.clone(),
            turn: analysis.start().turn() + 1,
            dice: args.dice().to_string(),
            states: analysis.equations().len(),
            winner: PositionReport {
                position: winner,
                chips: args.chips[index],
                probability,
            },
        });
    }

    for (i, chips) in args.chips.iter().enumerate() {
        println!("Position {} starts with {chips} chip(s).", i + 1);
    }
    println!(
        "The probability of position {winner} winning is {}.",
        super::format_percent(probability).bold()
    );
    println!(
        "  {}",
        format!(
            "(position {} rolls first, {} states)",
            analysis.start().turn() + 1,
            analysis.equations().len()
        )
        .dimmed()
    );
    super::print_approximation_note(args);
    Ok(())
}
