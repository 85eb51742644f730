use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{Level, error, info, log_enabled};
use mealkit::errors::{self, Result};
use mealkit::prices;
use std::path::Path;
use std::process;

/// Reduce a food composition table to food names and prices
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Output file (JSON)
    outfile: Option<String>,
    /// Raw food composition table
    #[arg(long, default_value = prices::DEFAULT_TABLE)]
    input: String,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn process(args: &Args) -> Result<()> {
    let outfile = match &args.outfile {
        Some(outfile) => outfile,
        None => return Err(errors::missing_argument_ref("give the output file name")),
    };
    let n = prices::convert(Path::new(&args.input), Path::new(outfile))?;
    info!(target: "mealkit", "{n} prices written to {outfile}");
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
