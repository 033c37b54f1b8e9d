use anyhow::Result;
use clap::Parser;
use tracing::error;

use phishparams::{init_default_patterns, report, run_analysis, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if args.init {
        return init_default_patterns();
    }

    utils::validate_args(&args)?;

    match run_analysis(&args).and_then(|result| report::print_report(&result, args.pretty)) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(action = "abort", component = "main", error = %e, "Analysis failed");
            std::process::exit(1);
        }
    }
}
