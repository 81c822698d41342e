mod algorithms;
mod pattern;
mod preview;
mod svg;
mod utils;

use crate::cli::{Cli, Commands};
use ditherator::DitherResult;

/// The main function to run the command based on CLI input.
pub fn run(cli: Cli) -> DitherResult<()> {
    let Cli { global: _, command } = cli;
    dispatch(command)
}

/// Dispatch the command to the appropriate handler.
fn dispatch(command: Commands) -> DitherResult<()> {
    match command {
        Commands::Svg(cmd) => svg::run(cmd),
        Commands::Preview(cmd) => preview::run(cmd),
        Commands::Pattern(cmd) => pattern::run(cmd),
        Commands::Algorithms => algorithms::run(),
    }
}
