mod cli;
mod commands;
mod logging;
mod report;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);
    if let Err(err) = commands::run(cli) {
        report::report_error(&err);
        std::process::exit(1);
    }
}
