//! Encoding detection and text decoding for input CSV files.
//!
//! Spreadsheet exports arrive in whatever encoding the exporting tool
//! preferred, so reading handles:
//! - BOM detection (UTF-8, UTF-16 LE/BE), with the BOM removed
//! - UTF-8 fast-path with strict validation
//! - Fallback encoding detection using chardetng

use crate::error::{MergeError, MergeResult};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::path::Path;

/// Read a whole file as text.
///
/// The file is read in one call and closed before decoding starts.
///
/// # Returns
/// A tuple `(content, encoding_used)` where the encoding is a lowercase label
/// such as `"utf-8"` or `"windows-1252"`.
pub fn read_text(path: &Path) -> MergeResult<(String, String)> {
    let bytes = std::fs::read(path)
        .map_err(|source| MergeError::Io { path: path.to_path_buf(), source })?;
    Ok(decode_bytes(&bytes))
}

/// Decode raw bytes, preferring a BOM, then strict UTF-8, then detection.
pub fn decode_bytes(bytes: &[u8]) -> (String, String) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (decoded.into_owned(), encoding.name().to_lowercase());
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), "utf-8".to_string());
    }

    let encoding = detect_encoding(bytes);
    let (decoded, _had_errors) = encoding.decode_without_bom_handling(bytes);
    (decoded.into_owned(), encoding.name().to_lowercase())
}

fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed = detector.guess(None, true);
    // Bytes already failed strict UTF-8 validation
    if guessed == UTF_8 {
        encoding_rs::WINDOWS_1252
    } else {
        guessed
    }
}
