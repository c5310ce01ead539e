use colored::Colorize;

use super::TableArgs;

pub fn run(args: &TableArgs, json: bool) -> Result<(), String> {
    let analysis = super::analyse(args)?;
    let equations = analysis.equations();

    if json {
        return super::print_json(&equations.equations());
    }

    if equations.is_empty() {
        println!(
            "  {}",
            format!("{} has already ended; no equations.", analysis.start()).dimmed()
        );
        return Ok(());
    }

    println!(
        "  {} {}",
        "Equations".bold(),
        format!(
            "({} states from {}, turn in parentheses)",
            equations.len(),
            analysis.start()
        )
        .dimmed()
    );
    println!();
    for equation in equations {
        println!("{equation}");
    }
    super::print_approximation_note(args);
    Ok(())
}
