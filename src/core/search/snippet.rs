//! Query-anchored snippet extraction.
//!
//! Snippets are bounded excerpts of a chunk, centred on the first
//! query term that occurs in it. Lengths are in characters.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default maximum snippet length in characters
pub const DEFAULT_SNIPPET_LEN: usize = 280;

/// Query words shorter than this are not used as anchors
const MIN_ANCHOR_CHARS: usize = 3;

const ELLIPSIS: &str = "...";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Build a snippet of at most `max_len` characters (plus ellipses)
///
/// Whitespace runs are collapsed to single spaces. Text that already
/// fits is returned unchanged. Otherwise the window is centred on the
/// first query word (3+ characters, in query order) found in the text,
/// or taken from the start when none occurs.
pub fn extract(text: &str, query: &str, max_len: usize) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let collapsed = collapsed.trim();
    let chars: Vec<char> = collapsed.chars().collect();

    if chars.len() <= max_len {
        return collapsed.to_string();
    }

    let Some(pos) = find_anchor(&chars, query) else {
        let head: String = chars[..max_len.saturating_sub(1)].iter().collect();
        return format!("{}{ELLIPSIS}", head.trim_end());
    };

    let start = pos.saturating_sub(max_len / 2);
    let end = (start + max_len).min(chars.len());
    let window: String = chars[start..end].iter().collect();

    let mut snippet = window.trim().to_string();
    if start > 0 {
        snippet = format!("{ELLIPSIS}{snippet}");
    }
    if end < chars.len() {
        snippet = format!("{}{ELLIPSIS}", snippet.trim_end());
    }
    snippet
}

/// Character position of the first query word occurring in `chars`
///
/// Matching is case-insensitive; lowercasing can change the number of
/// characters, so positions are mapped back to the original text.
fn find_anchor(chars: &[char], query: &str) -> Option<usize> {
    let mut lowered: Vec<char> = Vec::with_capacity(chars.len());
    let mut origin: Vec<usize> = Vec::with_capacity(chars.len());
    for (idx, c) in chars.iter().enumerate() {
        for lc in c.to_lowercase() {
            lowered.push(lc);
            origin.push(idx);
        }
    }

    let query = query.to_lowercase();
    WORD.find_iter(&query)
        .map(|m| m.as_str())
        .filter(|word| word.chars().count() >= MIN_ANCHOR_CHARS)
        .find_map(|word| {
            let needle: Vec<char> = word.chars().collect();
            lowered
                .windows(needle.len())
                .position(|w| w == needle.as_slice())
                .map(|p| origin[p])
        })
}
