//! Handler for the `pattern` command group.

use ditherator::{DitherResult, GAP, PatternPreset, PatternTable};

use crate::cli::PatternCommand;

use super::utils::{format_pattern, load_pattern};

/// Run the pattern command.
pub fn run(cmd: PatternCommand) -> DitherResult<()> {
    match cmd {
        PatternCommand::Show { preset } => {
            let table = PatternPreset::from(preset).table();
            println!("{}", format_pattern(&table)?);
        }
        PatternCommand::Check { file } => {
            let table = load_pattern(&file)?;
            println!("{}", format_pattern(&table)?);
            println!(
                "{}x{} table, {} gap cells",
                table.size(),
                table.size(),
                gap_count(&table)
            );
        }
    }
    Ok(())
}

fn gap_count(table: &PatternTable) -> usize {
    table.as_array().iter().filter(|&&v| v == GAP).count()
}
