// Keyword matcher: case-insensitive substring search, no regex semantics,
// no overlap resolution. Deterministic and side-effect-free.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::PageContent;

/// Heading formats commonly used in tender documents: Chinese chapter
/// numbers, dotted numeric sections and enumerated clauses.
static SECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^第[一二三四五六七八九十百零]+章",
        r"^第\d+章",
        r"^\d+\.\d+(\.\d+)?",
        r"^[一二三四五六七八九十]+、",
        r"^\d+、",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// One matched paragraph: where it was found, which keyword hit first and a
/// bounded snippet of the paragraph text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub page: usize,
    pub section: String,
    pub keyword: String,
    pub snippet: String,
    pub original_length: usize,
}

/// Count non-overlapping, case-insensitive occurrences of each keyword.
/// Every keyword gets an entry, zero included.
pub fn match_counts(text: &str, keywords: &[String]) -> BTreeMap<String, usize> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .map(|kw| {
            let needle = kw.to_lowercase();
            let count = if needle.is_empty() {
                0
            } else {
                haystack.matches(&needle).count()
            };
            (kw.clone(), count)
        })
        .collect()
}

/// Walk extracted pages paragraph by paragraph, tracking the current section
/// heading, and emit one `KeywordMatch` per paragraph that contains any
/// keyword. A paragraph yields at most one row even if several keywords hit.
pub fn find_matches(
    pages: &[PageContent],
    keywords: &[String],
    snippet_length: usize,
) -> Vec<KeywordMatch> {
    let lowered: Vec<(usize, String)> = keywords
        .iter()
        .enumerate()
        .map(|(i, kw)| (i, kw.to_lowercase()))
        .filter(|(_, kw)| !kw.is_empty())
        .collect();

    let mut matches = Vec::new();
    let mut current_section = String::new();

    for page in pages {
        for paragraph in page.content.split('\n') {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }

            if let Some(section) = section_number(paragraph) {
                current_section = section;
            }

            let haystack = paragraph.to_lowercase();
            if let Some((idx, _)) = lowered.iter().find(|(_, kw)| haystack.contains(kw.as_str())) {
                matches.push(KeywordMatch {
                    page: page.page,
                    section: current_section.clone(),
                    keyword: keywords[*idx].clone(),
                    snippet: truncate_snippet(paragraph, snippet_length),
                    original_length: paragraph.chars().count(),
                });
            }
        }
    }

    matches
}

/// Extract a leading section number from a paragraph, if it has one.
pub fn section_number(text: &str) -> Option<String> {
    SECTION_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}

/// Truncate to at most `max_length` chars, preferring a sentence boundary in
/// the back half of the window. Operates on chars, never raw bytes.
pub fn truncate_snippet(text: &str, max_length: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_length {
        return text.to_string();
    }

    const PUNCTUATION: [char; 6] = ['。', '？', '！', '.', '?', '!'];

    let mut cutoff = max_length;
    while cutoff > max_length / 2 {
        if PUNCTUATION.contains(&chars[cutoff - 1]) {
            let mut out: String = chars[..cutoff].iter().collect();
            out.push_str("...");
            return out;
        }
        cutoff -= 1;
    }

    let mut out: String = chars[..max_length].iter().collect();
    out.push_str("...");
    out
}
