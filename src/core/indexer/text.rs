//! Text loading and normalization.
//!
//! Source files come from scraped knowledge bases and are not always
//! UTF-8. Decoding walks a fixed chain of encodings ending in latin-1,
//! which maps every byte, so it always produces text.

use encoding_rs::{mem, Encoding, UTF_8, WINDOWS_1251};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::core::error::Result;

/// Maximum characters taken from a plain first line as the title
pub const TITLE_MAX_CHARS: usize = 160;

static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static LINK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(.+?)\]\(.+?\)$").unwrap());

/// Read a file and decode it with the fallback chain.
pub fn load(path: &Path) -> Result<String> {
    let raw = fs::read(path)?;
    Ok(decode(&raw))
}

/// Byte left unassigned by cp1251
const CP1251_UNDEFINED: u8 = 0x98;

/// Decode raw bytes: UTF-8 (BOM stripped), then cp1251, then latin-1.
pub fn decode(raw: &[u8]) -> String {
    // UTF-8, with or without a byte order mark
    let utf8_bytes = match Encoding::for_bom(raw) {
        Some((encoding, bom_len)) if encoding == UTF_8 => &raw[bom_len..],
        _ => raw,
    };
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(utf8_bytes) {
        return text.into_owned();
    }

    // The WHATWG cp1251 table maps 0x98 to a control; strict cp1251 rejects it
    if !raw.contains(&CP1251_UNDEFINED) {
        if let Some(text) = WINDOWS_1251.decode_without_bom_handling_and_without_replacement(raw) {
            tracing::debug!("Decoded with fallback encoding {}", WINDOWS_1251.name());
            return text.into_owned();
        }
    }

    tracing::debug!("Decoded with fallback encoding ISO-8859-1");
    mem::decode_latin1(raw).into_owned()
}

/// Unify line endings, collapse runs of blank lines and trim.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = EXCESS_BLANK_LINES.replace_all(&unified, "\n\n");
    collapsed.trim().to_string()
}

/// Derive a display title from the first non-blank line.
///
/// * `# Heading` -> `Heading` (bare `#` falls back)
/// * `[Title](url)` -> `Title`
/// * anything else -> the first 160 characters of the line
pub fn extract_title(text: &str, fallback: &str) -> String {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            let heading = line.trim_start_matches('#').trim();
            return if heading.is_empty() {
                fallback.to_string()
            } else {
                heading.to_string()
            };
        }

        if let Some(caps) = LINK_LINE.captures(line) {
            return caps[1].trim().to_string();
        }

        return line.chars().take(TITLE_MAX_CHARS).collect();
    }

    fallback.to_string()
}
