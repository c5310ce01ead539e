use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lcr_core::MonteCarlo;

use super::TableArgs;

pub fn run(args: &TableArgs, games: u64, seed: u64, skip_exact: bool) -> Result<(), String> {
    let start = args.start()?;
    let report = MonteCarlo::default()
        .with_games(games)
        .with_seed(seed)
        .with_dice(args.dice())
        .run(&start)
        .map_err(|e| e.to_string())?;

    let exact = if skip_exact {
        None
    } else {
        let analysis = super::analyse(args)?;
        Some(analysis.win_probabilities().map_err(|e| e.to_string())?)
    };

    // Header
    println!(
        "  {} {} {}",
        "Simulation".bold(),
        start,
        format!("({games} games, seed={seed}, dice {})", args.dice()).dimmed()
    );
    println!("  Mean game length: {:.2} turns", report.mean_turns());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Position", "Chips", "Wins", "Simulated"];
    if exact.is_some() {
        header.extend(["Exact", "Difference"]);
    }
    table.set_header(header);

    for (i, (chips, (wins, frequency))) in args
        .chips
        .iter()
        .zip(report.wins.iter().zip(report.frequencies()))
        .enumerate()
    {
        let mut row = vec![
            (i + 1).to_string(),
            chips.to_string(),
            wins.to_string(),
            super::format_percent(frequency),
        ];
        if let Some(exact) = &exact {
            row.push(super::format_percent(exact[i]));
            row.push(format!("{:+.4}", (frequency - exact[i]) * 100.0));
        }
        table.add_row(row);
    }
    println!("{table}");
    super::print_approximation_note(args);
    Ok(())
}
