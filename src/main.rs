use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use tabby::cli;
use tabby::error::TabbyResult;
use tabby::logging::{init_logging, LoggingConfig};

#[derive(Parser)]
#[command(name = "tabby")]
#[command(about = "Preview, count, and trim CSV/XLSX files")]
struct Cli {
    /// File to load and display immediately (shorthand for `tabby display <FILE>`)
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Preview the first rows of a file as a grid
    Display {
        /// Input .csv or .xlsx file
        file: PathBuf,

        /// Number of data rows to show; the header renders on top as row 0
        #[arg(short, long)]
        rows: Option<usize>,
    },

    /// Count data rows, excluding the header line
    Count {
        /// Input .csv or .xlsx file
        file: PathBuf,
    },

    /// Save a copy next to the input, truncated when --rows is given
    Export {
        /// Input .csv or .xlsx file
        file: PathBuf,

        /// Number of data rows to keep; the header is written on top of them
        #[arg(short, long)]
        rows: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&LoggingConfig {
        level: cli.log_level.clone(),
    }) {
        eprintln!("warning: {error}");
    }

    if let Err(error) = run(cli) {
        tracing::error!(error = %error, "operation failed");
        eprintln!("{}", error.user_message());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> TabbyResult<()> {
    match cli.command {
        Some(Command::Display { file, rows }) => cli::display_command(file, rows),
        Some(Command::Count { file }) => cli::count_command(file),
        Some(Command::Export { file, rows }) => cli::export_command(file, rows),
        None => match cli.file {
            // bare path behaves like the startup argument: load and display
            Some(file) => cli::display_command(file, None),
            None => {
                let _ = Cli::command().print_help();
                Ok(())
            }
        },
    }
}
