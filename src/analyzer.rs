use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::extract::CharacterExtractor;
use crate::report::{self, AnalysisReport};
use crate::utils::format_number;
use crate::{loader, stats};

const SUMMARY_ROWS: usize = 10;
pub const CHART_ROWS: usize = 20;
const CHART_WIDTH: usize = 50;

/// Runs the full pipeline on the file at `path`: load, extract, count, report.
///
/// Failures are logged and returned unchanged; nothing is retried.
pub fn analyze(path: impl AsRef<Path>, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let path = path.as_ref();
    let total_start_time = Instant::now();
    info!(action = "start", component = "analysis", file_path = ?path, "Starting character frequency analysis");

    match run_pipeline(path, config) {
        Ok(report) => {
            info!(
                action = "complete",
                component = "analysis",
                duration_ms = total_start_time.elapsed().as_millis(),
                "Analysis completed successfully"
            );
            if let Some((character, count)) = report.top_character() {
                info!(
                    action = "summary",
                    component = "analysis",
                    character = %character,
                    count,
                    "Most frequent character"
                );
            }
            Ok(report)
        }
        Err(e) => {
            error!(action = "fail", component = "analysis", file_path = ?path, error = %e, "Analysis failed");
            Err(e)
        }
    }
}

fn run_pipeline(path: &Path, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let text = loader::load_text(path, config)?;
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyInput(path.to_path_buf()));
    }

    let extractor = CharacterExtractor::new(config.exclude_punctuation)?;
    let chars = extractor.extract(&text);
    if chars.is_empty() {
        return Err(AnalysisError::EmptyExtraction(path.to_path_buf()));
    }

    let counts = stats::calculate_frequency(&chars, config.min_frequency);
    if counts.is_empty() {
        return Err(AnalysisError::BelowMinFrequency {
            path: path.to_path_buf(),
            min_frequency: config.min_frequency,
        });
    }
    Ok(report::generate_report(&counts, &chars, config.top_n))
}

pub fn print_analysis_results(report: &AnalysisReport, path: &Path) {
    let basic = &report.basic_stats;
    let freq = &report.frequency_stats;

    println!("\n--- Character Frequency Analysis: {} ---", path.display());
    println!("Analyzed at: {}", report.analysis_time);
    println!(
        "Total characters: {}",
        format_number(basic.total_characters as u64)
    );
    println!(
        "Unique characters: {}",
        format_number(basic.unique_characters as u64)
    );
    println!("Coverage ratio: {:.4}", basic.coverage_ratio);
    println!(
        "Frequency max/min/avg: {} / {} / {:.2}",
        format_number(freq.max_frequency),
        format_number(freq.min_frequency),
        freq.avg_frequency
    );

    let shown = report.top_characters.len().min(SUMMARY_ROWS);
    println!("\nTop {} characters:", shown);
    for (rank, (character, count)) in report.top_characters.iter().take(shown).enumerate() {
        println!("{:>2}. '{}' - {} times", rank + 1, character, format_number(*count));
    }
}

/// Renders the leading entries of the ranked list as horizontal bars.
pub fn render_frequency_chart(report: &AnalysisReport, rows: usize) -> Vec<String> {
    let entries = &report.top_characters[..report.top_characters.len().min(rows)];
    let Some(max) = entries.iter().map(|(_, count)| *count).max() else {
        return Vec::new();
    };

    entries
        .iter()
        .map(|(character, count)| {
            let width = ((*count as f64 / max as f64) * CHART_WIDTH as f64).round() as usize;
            format!(
                "{} | {} {}",
                character,
                "#".repeat(width.max(1)),
                format_number(*count)
            )
        })
        .collect()
}

pub fn print_frequency_chart(report: &AnalysisReport) {
    let lines = render_frequency_chart(report, CHART_ROWS);
    if lines.is_empty() {
        println!("\nNo data to chart");
        return;
    }

    println!("\nTop {} character frequencies:", lines.len());
    for line in lines {
        println!("{}", line);
    }
}
