use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use hanzi_freq::{analyzer, output, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    let config = args.to_config();

    let report = match hanzi_freq::analyze(&args.file, &config) {
        Ok(report) => report,
        Err(e) => {
            error!(action = "exit", component = "cli", error = %e, "Error");
            std::process::exit(1);
        }
    };

    if config.save_results {
        output::save_results(&report, &args.output_dir)?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        analyzer::print_analysis_results(&report, &args.file);
    }

    if config.generate_charts && !args.json {
        analyzer::print_frequency_chart(&report);
    }

    Ok(())
}
