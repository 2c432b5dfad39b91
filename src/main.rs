use anyhow::Context;
use clap::Parser;
use scooter_telemetry::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    let input = args.input.display().to_string();

    let result = commands::run(args).with_context(|| format!("Failed to parse {}", input));

    match result {
        Ok(_stats) => {
            // Success - records have already been written by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print the full chain to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
