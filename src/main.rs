use anyhow::Context;
use clap::Parser;
use insectario_ingest::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args).context("Ingestion aborted") {
        Ok(_report) => {
            // Per-row failures are already in the printed report
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Insectario Ingest - Legacy Insectary Dump Migration");
    println!("===================================================");
    println!();
    println!("Read the INSERT statements of the legacy insectary SQL dump and store");
    println!("every row as a typed record in the new SQLite schema.");
    println!();
    println!("USAGE:");
    println!("    insectario-ingest <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    ingest      Ingest the dump into a SQLite database (main command)");
    println!("    inspect     Build every record in memory and report, writing nothing");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Ingest ./bd_insecta.sql into ./insectario.db:");
    println!("    insectario-ingest ingest");
    println!();
    println!("    # Ingest two tables from another dump into a chosen database:");
    println!("    insectario-ingest ingest --input dump.sql --database new.db \\");
    println!("                             --tables lives,humidities");
    println!();
    println!("    # Check a dump without writing anything:");
    println!("    insectario-ingest inspect --show-records");
    println!();
    println!("For detailed help on any command, use:");
    println!("    insectario-ingest <COMMAND> --help");
}
