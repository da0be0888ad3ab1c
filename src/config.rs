/// Files above this size are read in `chunk_size` pieces.
pub const LARGE_FILE_THRESHOLD: u64 = 50 * 1024 * 1024;

pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Settings for a single analysis run.
///
/// Built once and passed by reference into every pipeline stage. The `with_*`
/// methods consume the value and return an updated copy, so a config is never
/// changed after it has been handed to [`crate::analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Number of entries kept in the ranked list. Zero keeps every character.
    pub top_n: usize,
    /// Characters seen fewer times than this are dropped from the counts.
    pub min_frequency: u64,
    pub exclude_punctuation: bool,
    /// Read by the CLI, which writes JSON/CSV output when set.
    pub save_results: bool,
    /// Read by the CLI, which prints a text bar chart when set.
    pub generate_charts: bool,
    /// Read size in bytes for the chunked loading path.
    pub chunk_size: usize,
    pub large_file_threshold: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: 50,
            min_frequency: 1,
            exclude_punctuation: true,
            save_results: true,
            generate_charts: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            large_file_threshold: LARGE_FILE_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_min_frequency(mut self, min_frequency: u64) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    pub fn with_exclude_punctuation(mut self, exclude: bool) -> Self {
        self.exclude_punctuation = exclude;
        self
    }

    pub fn with_save_results(mut self, save: bool) -> Self {
        self.save_results = save;
        self
    }

    pub fn with_generate_charts(mut self, generate: bool) -> Self {
        self.generate_charts = generate;
        self
    }

    // A zero chunk size would never make progress.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_large_file_threshold(mut self, threshold: u64) -> Self {
        self.large_file_threshold = threshold;
        self
    }
}
