use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use super::{PositionReport, TableArgs};

#[derive(Serialize)]
struct TableOutput {
    turn: usize,
    dice: String,
    states: usize,
    positions: Vec<PositionReport>,
}

pub fn run(args: &TableArgs, json: bool) -> Result<(), String> {
    let analysis = super::analyse(args)?;
    let probabilities = analysis.win_probabilities().map_err(|e| e.to_string())?;
    let turn = analysis.start().turn();

    if json {
        let positions = args
            .chips
            .iter()
            .zip(&probabilities)
            .enumerate()
            .map(|(i, (&chips, &probability))| PositionReport {
                position: i + 1,
                chips,
                probability,
            })
            .collect();
        return super::print_json(&TableOutput {
            turn: turn + 1,
            dice: args.dice().to_string(),
            states: analysis.equations().len(),
            positions,
        });
    }

    println!(
        "  {} {}",
        "Win probabilities".bold(),
        format!(
            "({} states, dice {}, position {} rolls first)",
            analysis.equations().len(),
            args.dice(),
            turn + 1
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Position", "Chips", "Win probability"]);
    for (i, (chips, probability)) in args.chips.iter().zip(&probabilities).enumerate() {
        let position = if i == turn {
            format!("{} *", i + 1)
        } else {
            (i + 1).to_string()
        };
        table.add_row(vec![
            position,
            chips.to_string(),
            super::format_percent(*probability),
        ]);
    }
    println!("{table}");

    let total: f64 = probabilities.iter().sum();
    println!("  Total: {}", super::format_percent(total));
    super::print_approximation_note(args);
    Ok(())
}
