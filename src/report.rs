use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::stats::CharacterCounts;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_characters: usize,
    pub unique_characters: usize,
    /// `unique_characters / total_characters`, or 0 for an empty input.
    pub coverage_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyStats {
    pub max_frequency: u64,
    pub min_frequency: u64,
    pub avg_frequency: f64,
}

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub basic_stats: BasicStats,
    pub frequency_stats: FrequencyStats,
    pub top_characters: Vec<(char, u64)>,
    pub analysis_time: String,
}

impl AnalysisReport {
    pub fn top_character(&self) -> Option<(char, u64)> {
        self.top_characters.first().copied()
    }

    /// Equality ignoring `analysis_time`.
    pub fn same_results(&self, other: &AnalysisReport) -> bool {
        self.basic_stats == other.basic_stats
            && self.frequency_stats == other.frequency_stats
            && self.top_characters == other.top_characters
    }
}

/// Builds the report for `counts`, which were aggregated from `chars`.
pub fn generate_report(counts: &CharacterCounts, chars: &[char], top_n: usize) -> AnalysisReport {
    let total_characters = chars.len();
    let unique_characters = counts.len();

    AnalysisReport {
        basic_stats: BasicStats {
            total_characters,
            unique_characters,
            coverage_ratio: if total_characters > 0 {
                unique_characters as f64 / total_characters as f64
            } else {
                0.0
            },
        },
        frequency_stats: frequency_stats(counts),
        top_characters: counts.most_common(top_n),
        analysis_time: Local::now().format(TIMESTAMP_FORMAT).to_string(),
    }
}

fn frequency_stats(counts: &CharacterCounts) -> FrequencyStats {
    if counts.is_empty() {
        return FrequencyStats {
            max_frequency: 0,
            min_frequency: 0,
            avg_frequency: 0.0,
        };
    }

    FrequencyStats {
        max_frequency: counts.values().max().unwrap_or(0),
        min_frequency: counts.values().min().unwrap_or(0),
        avg_frequency: counts.total() as f64 / counts.len() as f64,
    }
}
