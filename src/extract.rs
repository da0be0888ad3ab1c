use regex::Regex;
use std::time::Instant;
use tracing::info;

use crate::error::Result;

/// CJK Unified Ideographs.
pub const IDEOGRAPH_PATTERN: &str = r"[\x{4E00}-\x{9FFF}]";

/// CJK symbols and punctuation, plus halfwidth and fullwidth forms.
pub const PUNCTUATION_PATTERN: &str = r"[\x{3000}-\x{303F}\x{FF00}-\x{FFEF}]";

/// Pulls CJK ideographs out of raw text, keeping their order.
#[derive(Debug, Clone)]
pub struct CharacterExtractor {
    ideograph: Regex,
    punctuation: Regex,
    exclude_punctuation: bool,
}

impl CharacterExtractor {
    pub fn new(exclude_punctuation: bool) -> Result<Self> {
        Ok(Self {
            ideograph: Regex::new(IDEOGRAPH_PATTERN)?,
            punctuation: Regex::new(PUNCTUATION_PATTERN)?,
            exclude_punctuation,
        })
    }

    pub fn is_ideograph(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.ideograph.is_match(c.encode_utf8(&mut buf))
    }

    pub fn is_punctuation(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.punctuation.is_match(c.encode_utf8(&mut buf))
    }

    /// Returns every ideograph in `text`, in source order.
    ///
    /// The punctuation ranges never overlap the ideograph block, so the
    /// `exclude_punctuation` pass removes nothing today. It is kept so the
    /// filter stays in place if the ideograph range is ever widened.
    pub fn extract(&self, text: &str) -> Vec<char> {
        let start_time = Instant::now();

        let mut chars: Vec<char> = self
            .ideograph
            .find_iter(text)
            .filter_map(|m| m.as_str().chars().next())
            .collect();

        if self.exclude_punctuation {
            chars.retain(|&c| !self.is_punctuation(c));
        }

        info!(
            action = "complete",
            component = "character_extraction",
            extracted_count = chars.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Character extraction completed"
        );
        chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_ideographs_in_order() {
        let extractor = CharacterExtractor::new(true).unwrap();
        let chars = extractor.extract("第1回：宴桃园豪杰三结义, abc 斩黄巾");
        let text: String = chars.into_iter().collect();
        assert_eq!(text, "第回宴桃园豪杰三结义斩黄巾");
    }

    #[test]
    fn block_boundaries_are_inclusive() {
        let extractor = CharacterExtractor::new(false).unwrap();
        assert!(extractor.is_ideograph('\u{4E00}'));
        assert!(extractor.is_ideograph('\u{9FFF}'));
        assert!(!extractor.is_ideograph('\u{4DFF}'));
        assert!(!extractor.is_ideograph('\u{A000}'));
    }

    #[test]
    fn punctuation_never_reaches_the_result() {
        let text = "。，、「」！？（）";
        for exclude in [true, false] {
            let extractor = CharacterExtractor::new(exclude).unwrap();
            assert!(extractor.extract(text).is_empty());
        }
        let extractor = CharacterExtractor::new(true).unwrap();
        assert!(extractor.is_punctuation('。'));
        assert!(extractor.is_punctuation('！'));
        assert!(!extractor.is_punctuation('三'));
    }

    #[test]
    fn exclusion_flag_does_not_change_ideograph_output() {
        let text = "今天是星期三。明天，星期四！";
        let with = CharacterExtractor::new(true).unwrap().extract(text);
        let without = CharacterExtractor::new(false).unwrap().extract(text);
        assert_eq!(with, without);
        assert_eq!(with.len(), 11);
    }

    #[test]
    fn no_ideographs_gives_empty_result() {
        let extractor = CharacterExtractor::new(true).unwrap();
        assert!(extractor.extract("hello 123").is_empty());
        assert!(extractor.extract("").is_empty());
    }
}
