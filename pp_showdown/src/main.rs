//! Tally two-player poker showdowns.
//!
//! Each input line holds two five-card hands. Every line is played out
//! and the number of lines won by each player is printed once the input
//! runs out.

use anyhow::{Error, bail};
use log::info;
use pico_args::Arguments;
use showdown::{LinePolicy, TallyConfig, TiePolicy, tally};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

const HELP: &str = "\
Tally two-player poker showdowns, one pair of hands per line

USAGE:
  pp_showdown [OPTIONS] [FILE]

ARGS:
  FILE                  Input file                        [default: stdin]

OPTIONS:
  --jobs    N           Worker threads                    [default: 1]

FLAGS:
  --skip-malformed      Log and skip malformed lines instead of aborting
  --strict-ties         Fail on a tied line instead of counting a tie
  -h, --help            Print help information
";

struct Args {
    jobs: usize,
    skip_malformed: bool,
    strict_ties: bool,
    input: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = Args {
        jobs: pargs.opt_value_from_str("--jobs")?.unwrap_or(1),
        skip_malformed: pargs.contains("--skip-malformed"),
        strict_ties: pargs.contains("--strict-ties"),
        input: pargs.opt_free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("unexpected arguments {remaining:?}");
    }
    if args.jobs == 0 {
        bail!("--jobs must be at least 1");
    }

    let config = TallyConfig {
        on_malformed: if args.skip_malformed {
            LinePolicy::Skip
        } else {
            LinePolicy::Abort
        },
        on_tie: if args.strict_ties {
            TiePolicy::Reject
        } else {
            TiePolicy::Count
        },
        jobs: args.jobs,
    };

    env_logger::builder().format_target(false).init();

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            info!("reading {}", path.display());
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(io::stdin().lock()),
    };

    let tally = tally::run(reader, &config)?;
    if tally.ties > 0 || tally.skipped > 0 {
        info!("{} tied and {} skipped lines", tally.ties, tally.skipped);
    }
    println!("{tally}");

    Ok(())
}
