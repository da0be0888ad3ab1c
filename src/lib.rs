pub mod analyzer;
pub mod args;
pub mod config;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod loader;
pub mod output;
pub mod report;
pub mod stats;
pub mod utils;

pub use analyzer::analyze;
pub use args::Args;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use extract::CharacterExtractor;
pub use report::{generate_report, AnalysisReport, BasicStats, FrequencyStats};
pub use stats::{calculate_frequency, CharacterCounts};
