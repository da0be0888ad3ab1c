use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::report::AnalysisReport;

pub const JSON_FILE_NAME: &str = "character_frequency_analysis.json";
pub const CSV_FILE_NAME: &str = "top_characters.csv";

/// Writes the full report as JSON and the ranked list as CSV into `output_dir`.
pub fn save_results(report: &AnalysisReport, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    let json_path = output_dir.join(JSON_FILE_NAME);
    let json_file = File::create(&json_path)
        .with_context(|| format!("Failed to create {:?}", json_path))?;
    let mut writer = BufWriter::new(json_file);
    serde_json::to_writer_pretty(&mut writer, report).context("Failed to serialize report")?;
    writer.flush()?;

    let csv_path = output_dir.join(CSV_FILE_NAME);
    let csv_file =
        File::create(&csv_path).with_context(|| format!("Failed to create {:?}", csv_path))?;
    let mut writer = BufWriter::new(csv_file);
    // BOM so spreadsheet tools pick UTF-8
    writeln!(writer, "\u{FEFF}character,frequency")?;
    for (character, count) in &report.top_characters {
        writeln!(writer, "{},{}", character, count)?;
    }
    writer.flush()?;

    info!(action = "save", component = "results_output", output_dir = ?output_dir, "Results saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::generate_report;
    use crate::stats::CharacterCounts;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn writes_json_and_csv() {
        let chars: Vec<char> = "三三三二二一".chars().collect();
        let report = generate_report(&CharacterCounts::from_chars(&chars), &chars, 50);
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("results");

        save_results(&report, &output_dir).unwrap();

        let json = fs::read_to_string(output_dir.join(JSON_FILE_NAME)).unwrap();
        assert!(json.contains("\"三\""));
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);

        let csv = fs::read_to_string(output_dir.join(CSV_FILE_NAME)).unwrap();
        assert_eq!(csv, "\u{FEFF}character,frequency\n三,3\n二,2\n一,1\n");
    }
}
