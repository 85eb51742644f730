use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{Level, error, log_enabled};
use mealkit::errors::Result;
use mealkit::invoker::{self, MealCommand};
use mealkit::sample;
use std::path::Path;
use std::process;

/// Write the reference input documents, and optionally calculate them
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Output directory
    outdir: String,
    /// Run the meal program on the documents afterwards
    #[arg(long)]
    run: bool,
    /// Program to run
    #[arg(long, default_value = invoker::DEFAULT_PROGRAM)]
    program: String,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn process(args: &Args) -> Result<()> {
    let paths = sample::write_samples(Path::new(&args.outdir))?;
    if args.run {
        MealCommand::new().with_program(&args.program).calc(&paths)?;
    }
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
