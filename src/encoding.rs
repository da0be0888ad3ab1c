use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};

/// Number of leading bytes inspected when guessing a file's encoding.
pub const SAMPLE_SIZE: usize = 10_000;

/// Best-effort encoding guess for a byte sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub encoding: &'static Encoding,
    /// In `[0, 1]`. Zero means no evidence was available.
    pub confidence: f32,
}

impl Detection {
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    fn fallback() -> Self {
        Self {
            encoding: UTF_8,
            confidence: 0.0,
        }
    }
}

/// Guesses the encoding of the file at `path` from its first [`SAMPLE_SIZE`] bytes.
///
/// Never fails: an unreadable sample is logged and UTF-8 is assumed. The
/// loader still has to cope with a wrong guess.
pub fn detect_encoding(path: &Path) -> Detection {
    match read_sample(path) {
        Ok(sample) => {
            let detection = detect_sample(&sample);
            info!(
                action = "detect",
                component = "encoding_detection",
                encoding = detection.name(),
                confidence = format!("{:.2}", detection.confidence),
                "Detected file encoding"
            );
            detection
        }
        Err(e) => {
            warn!(action = "detect", component = "encoding_detection", error = %e, "Encoding detection failed, defaulting to UTF-8");
            Detection::fallback()
        }
    }
}

pub fn detect_sample(sample: &[u8]) -> Detection {
    if sample.is_empty() {
        warn!(
            action = "detect",
            component = "encoding_detection",
            "Empty sample, defaulting to UTF-8"
        );
        return Detection::fallback();
    }

    // chardetng leaves BOM sniffing to the caller and never reports UTF-16.
    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        return Detection {
            encoding,
            confidence: 1.0,
        };
    }

    if sample.is_ascii() {
        return Detection {
            encoding: UTF_8,
            confidence: 1.0,
        };
    }

    if is_utf8_prefix(sample) {
        return Detection {
            encoding: UTF_8,
            confidence: 0.99,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    let (encoding, reliable) = detector.guess_assess(None, true);

    Detection {
        encoding,
        confidence: if reliable { 0.8 } else { 0.4 },
    }
}

// A multi-byte sequence cut off by the end of the sample still counts as UTF-8.
fn is_utf8_prefix(sample: &[u8]) -> bool {
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

fn read_sample(path: &Path) -> io::Result<Vec<u8>> {
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    File::open(path)?
        .take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)?;
    Ok(sample)
}
