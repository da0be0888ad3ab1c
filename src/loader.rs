use encoding_rs::{Decoder, DecoderResult, Encoding};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::config::AnalysisConfig;
use crate::encoding;
use crate::error::{AnalysisError, Result};

/// Encodings tried, in order, when the detected one cannot decode the file.
pub const FALLBACK_ENCODINGS: [&str; 4] = ["gbk", "gb2312", "utf-8", "latin1"];

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

enum LoadError {
    Decode(String),
    Io(io::Error),
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Decode(msg) => write!(f, "decode error: {}", msg),
            LoadError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

/// Reads the whole file at `path` as text, guessing its encoding first.
pub fn load_text(path: &Path, config: &AnalysisConfig) -> Result<String> {
    let file_size = file_size(path)?;
    info!(
        action = "stat",
        component = "text_loading",
        file_path = ?path,
        size_mb = format!("{:.2}", file_size as f64 / BYTES_PER_MB),
        "Input file size"
    );

    let detection = encoding::detect_encoding(path);
    decode_file(path, detection.name(), file_size, config)
}

/// Reads the whole file at `path` as text using the encoding named by `label`.
///
/// Malformed byte sequences are dropped. If `label` is not a known encoding
/// or decoding fails, each of [`FALLBACK_ENCODINGS`] is tried in turn and the
/// first that succeeds wins.
///
/// Every fallback label resolves and malformed bytes never fail a decode, so
/// [`AnalysisError::UnreadableFile`] is only returned when the primary
/// encoding is unusable and every fallback attempt then hits an I/O error,
/// for example when `path` is a directory.
pub fn load_text_with_encoding(
    path: &Path,
    label: &str,
    config: &AnalysisConfig,
) -> Result<String> {
    let file_size = file_size(path)?;
    decode_file(path, label, file_size, config)
}

fn decode_file(
    path: &Path,
    label: &str,
    file_size: u64,
    config: &AnalysisConfig,
) -> Result<String> {
    let start_time = Instant::now();

    match read_decoded(path, label, file_size, config) {
        Ok(text) => {
            info!(
                action = "complete",
                component = "text_loading",
                encoding = label,
                char_count = text.chars().count(),
                duration_ms = start_time.elapsed().as_millis(),
                "Loaded file"
            );
            return Ok(text);
        }
        Err(LoadError::Io(e)) => return Err(e.into()),
        Err(e) => {
            error!(action = "decode", component = "text_loading", encoding = label, error = %e, "Failed to decode file");
        }
    }

    for fallback in FALLBACK_ENCODINGS {
        match read_decoded(path, fallback, file_size, config) {
            Ok(text) => {
                info!(
                    action = "fallback",
                    component = "text_loading",
                    encoding = fallback,
                    char_count = text.chars().count(),
                    duration_ms = start_time.elapsed().as_millis(),
                    "Loaded file with fallback encoding"
                );
                return Ok(text);
            }
            Err(e) => {
                warn!(action = "fallback", component = "text_loading", encoding = fallback, error = %e, "Fallback encoding failed");
            }
        }
    }

    Err(AnalysisError::UnreadableFile(path.to_path_buf()))
}

fn file_size(path: &Path) -> Result<u64> {
    if !path.exists() {
        return Err(AnalysisError::NotFound(path.to_path_buf()));
    }
    Ok(fs::metadata(path)?.len())
}

fn read_decoded(
    path: &Path,
    label: &str,
    file_size: u64,
    config: &AnalysisConfig,
) -> std::result::Result<String, LoadError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| LoadError::Decode(format!("unknown encoding '{}'", label)))?;
    let mut decoder = encoding.new_decoder_with_bom_removal();
    let mut text = String::new();

    if file_size > config.large_file_threshold {
        info!(
            action = "start",
            component = "chunked_loading",
            chunk_size = config.chunk_size,
            "Large file detected, loading in chunks"
        );
        let mut file = File::open(path)?;
        let mut buffer = vec![0u8; config.chunk_size.max(1)];
        let mut chunk_count = 0usize;

        loop {
            let read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            decode_ignoring_malformed(&mut decoder, &buffer[..read], false, &mut text)?;
            chunk_count += 1;
        }
        decode_ignoring_malformed(&mut decoder, &[], true, &mut text)?;

        info!(
            action = "complete",
            component = "chunked_loading",
            chunk_count,
            "Chunked loading finished"
        );
    } else {
        let bytes = fs::read(path)?;
        decode_ignoring_malformed(&mut decoder, &bytes, true, &mut text)?;
    }

    Ok(text)
}

// Malformed input is consumed by the decoder and skipped, never replaced.
fn decode_ignoring_malformed(
    decoder: &mut Decoder,
    mut src: &[u8],
    last: bool,
    out: &mut String,
) -> std::result::Result<(), LoadError> {
    loop {
        let needed = decoder
            .max_utf8_buffer_length_without_replacement(src.len())
            .ok_or_else(|| LoadError::Decode("decoded text too large".to_string()))?;
        out.reserve(needed);

        let (result, read) = decoder.decode_to_string_without_replacement(src, out, last);
        src = &src[read..];

        match result {
            DecoderResult::InputEmpty => return Ok(()),
            DecoderResult::OutputFull | DecoderResult::Malformed(_, _) => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::GBK;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_text(Path::new("/no/such/file.txt"), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::NotFound(_)));
    }

    #[test]
    fn loads_utf8_in_one_pass() {
        let file = write_temp("三国演义 hello".as_bytes());
        let text = load_text(file.path(), &AnalysisConfig::default()).unwrap();
        assert_eq!(text, "三国演义 hello");
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let file = write_temp("\u{FEFF}三国".as_bytes());
        let text = load_text(file.path(), &AnalysisConfig::default()).unwrap();
        assert_eq!(text, "三国");
    }

    #[test]
    fn malformed_bytes_are_skipped() {
        let mut bytes = "三".as_bytes().to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice("国".as_bytes());
        let file = write_temp(&bytes);
        let text = load_text_with_encoding(file.path(), "utf-8", &AnalysisConfig::default()).unwrap();
        assert_eq!(text, "三国");
    }

    #[test]
    fn explicit_gbk_decodes() {
        let (bytes, _, _) = GBK.encode("三国演义");
        let file = write_temp(&bytes);
        let text = load_text_with_encoding(file.path(), "gbk", &AnalysisConfig::default()).unwrap();
        assert_eq!(text, "三国演义");
    }

    #[test]
    fn unknown_encoding_falls_back_to_gbk() {
        let (bytes, _, _) = GBK.encode("曹操刘备");
        let file = write_temp(&bytes);
        let text =
            load_text_with_encoding(file.path(), "no-such-encoding", &AnalysisConfig::default())
                .unwrap();
        assert_eq!(text, "曹操刘备");
    }

    #[test]
    fn directory_is_unreadable_after_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_text_with_encoding(dir.path(), "no-such-encoding", &AnalysisConfig::default())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::UnreadableFile(_)), "got {:?}", err);
    }

    #[test]
    fn utf16_files_with_bom_decode() {
        let mut le = vec![0xFF, 0xFE];
        let mut be = vec![0xFE, 0xFF];
        for unit in "三国演义三国".encode_utf16() {
            le.extend_from_slice(&unit.to_le_bytes());
            be.extend_from_slice(&unit.to_be_bytes());
        }

        for bytes in [le, be] {
            let file = write_temp(&bytes);
            let text = load_text(file.path(), &AnalysisConfig::default()).unwrap();
            assert_eq!(text, "三国演义三国");
        }
    }

    #[test]
    fn chunked_path_matches_single_read() {
        let content = "话说天下大势，分久必合，合久必分。".repeat(40);
        let file = write_temp(content.as_bytes());

        let single = load_text(file.path(), &AnalysisConfig::default()).unwrap();
        // 7-byte chunks split most 3-byte UTF-8 sequences across reads.
        let chunked_config = AnalysisConfig::default()
            .with_large_file_threshold(16)
            .with_chunk_size(7);
        let chunked = load_text(file.path(), &chunked_config).unwrap();

        assert_eq!(single, content);
        assert_eq!(chunked, single);
    }
}
