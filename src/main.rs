use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use assoc_array::*;

/// Load `key: value` lines into an associative array and print it.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The pair file. Reads STDIN when omitted.
    file: Option<PathBuf>,
    /// Remove this key after loading. Can be repeated.
    #[arg(short, long = "remove", value_name = "KEY")]
    remove: Vec<String>,
    /// Print only the value for this key.
    #[arg(short, long, value_name = "KEY")]
    get: Option<String>,
    /// Print the array as a JSON object.
    #[arg(long)]
    json: bool,
    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long)]
    verbose: bool
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    PairFileError(#[from] PairFileError),
    #[error(transparent)]
    IoError(#[from] io::Error),
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("Key not found: {0}")]
    KeyNotFound(String)
}

fn run<R: BufRead, W: Write>(args: Args, input: R, out: &mut W) -> Result<(), CliError> {
    let mut pairs = read_pairs(input)?;

    for key in args.remove.iter() {
        if pairs.remove(key).is_none() {
            log::debug!("Key {key:?} was not present to remove");
        }
    }

    match (args.get, args.json) {
        (Some(key), json) => {
            let value = pairs.get(&key).map_err(|_| CliError::KeyNotFound(key.clone()))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
            } else {
                writeln!(out, "{value}")?;
            }
        },
        (None, true ) => writeln!(out, "{}", serde_json::to_string_pretty(&pairs)?)?,
        (None, false) => writeln!(out, "{pairs}")?
    }

    Ok(())
}

fn main() -> ExitCode {
    let mut args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let mut stdout = io::stdout().lock();
    let result = match args.file.take() {
        Some(path) => File::open(path).map_err(CliError::from).and_then(|file| run(args, BufReader::new(file), &mut stdout)),
        None => run(args, io::stdin().lock(), &mut stdout)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
