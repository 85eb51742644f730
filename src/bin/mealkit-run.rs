use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{Level, error, log_enabled};
use mealkit::errors::{self, Result};
use mealkit::invoker::{self, MealCommand, Subcommand};
use std::process;
use std::time::Duration;

/// Run the meal program on input documents
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input documents (JSON)
    #[arg(required = true)]
    paths: Vec<String>,
    /// Automatic selection instead of calculation (exactly one document)
    #[arg(short, long)]
    auto: bool,
    /// Program to run
    #[arg(long, default_value = invoker::DEFAULT_PROGRAM)]
    program: String,
    /// Give up after this many seconds
    #[arg(long, default_value_t = invoker::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,
    /// Wait for the program however long it takes
    #[arg(long, conflicts_with = "timeout")]
    no_timeout: bool,
    /// Working directory for the program
    #[arg(long)]
    dir: Option<String>,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn process(args: &Args) -> Result<()> {
    let subcommand = if args.auto {
        if args.paths.len() != 1 {
            return Err(errors::invalid_argument(format!(
                "automatic selection takes one document, got {}",
                args.paths.len()
            )));
        }
        Subcommand::AutomaticSelection
    } else {
        Subcommand::Calc
    };
    let timeout = if args.no_timeout {
        None
    } else {
        Some(Duration::from_secs(args.timeout))
    };
    let mut command = MealCommand::new()
        .with_program(&args.program)
        .with_timeout(timeout);
    if let Some(dir) = &args.dir {
        command = command.with_current_dir(dir);
    }
    invoker::run(&command, subcommand, &args.paths)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    if let Err(e) = process(&args) {
        if log_enabled!(target: "mealkit", Level::Error) {
            error!(target: "mealkit", "{e}");
        } else {
            eprintln!("error: {e}");
        }
        process::exit(1);
    }
}
