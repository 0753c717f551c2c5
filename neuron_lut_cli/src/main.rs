use crate::{commands::*, utils::*};
use anyhow::Context;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "neuron-lut", author, version, about, long_about = None)]
struct Cli {
    #[clap(flatten, next_help_heading = "Output Options")]
    log_options: LogOptions,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Generate(GenerateCmd),
    Query(QueryCmd),
    Inspect(InspectCmd),
}

fn main() {
    let cli = Cli::parse();
    cli.log_options.set_global();
    cli.log_options.try_setup_logger();

    let result = match cli.command {
        Commands::Generate(cmd) => cmd
            .run()
            .context("could not generate lookup table due to previous error"),
        Commands::Query(cmd) => cmd
            .run()
            .context("could not query lookup table due to previous error"),
        Commands::Inspect(cmd) => cmd
            .run()
            .context("could not inspect lookup table due to previous error"),
    };
    if let Err(e) = result {
        print_error(e);
        std::process::exit(1);
    }
}
