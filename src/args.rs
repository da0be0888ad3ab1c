use clap::Parser;
use std::path::PathBuf;

use crate::config::{AnalysisConfig, DEFAULT_CHUNK_SIZE};

#[derive(Parser, Debug)]
#[command(
    name = "hanzi-freq",
    about = "Count CJK ideographs in a text file and report the most frequent ones",
    version,
    long_about = None
)]
pub struct Args {
    /// Text file to analyze
    pub file: PathBuf,

    /// Number of top characters to report
    #[arg(short, long, default_value_t = 50)]
    pub top: usize,

    /// Drop characters seen fewer times than this
    #[arg(short, long, default_value_t = 1)]
    pub min_frequency: u64,

    /// Keep CJK punctuation ranges instead of filtering them out
    #[arg(long)]
    pub include_punctuation: bool,

    /// Read size in bytes when loading large files
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Directory for JSON and CSV results
    #[arg(short, long, default_value = "results")]
    pub output_dir: PathBuf,

    /// Do not write result files
    #[arg(long)]
    pub no_save: bool,

    /// Skip the bar chart of the top characters
    #[arg(long)]
    pub no_chart: bool,

    /// Print the report as JSON instead of a text summary
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn to_config(&self) -> AnalysisConfig {
        AnalysisConfig::default()
            .with_top_n(self.top)
            .with_min_frequency(self.min_frequency)
            .with_exclude_punctuation(!self.include_punctuation)
            .with_chunk_size(self.chunk_size)
            .with_save_results(!self.no_save)
            .with_generate_charts(!self.no_chart)
    }
}
