// DOCX extraction. A DOCX file is a ZIP archive; the body lives in
// word/document.xml as paragraphs of <w:t> text runs. Table cell text is
// made of the same <w:p> elements, so it is captured in document order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use zip::ZipArchive;

use super::{ExtractError, PageContent};

static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:p(?:\s[^>]*)?>(.*?)</w:p>").unwrap());
static TEXT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>").unwrap());
static TAB_OR_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:(?:tab|br)\s*/>").unwrap());

pub fn extract(path: &Path) -> Result<Vec<PageContent>, ExtractError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ExtractError::Corrupt {
        format: "docx",
        reason: e.to_string(),
    })?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractError::Corrupt {
            format: "docx",
            reason: "word/document.xml not found".to_string(),
        })?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Corrupt {
            format: "docx",
            reason: e.to_string(),
        })?;

    Ok(paragraphs_from_xml(&xml))
}

/// DOCX has no reliable page boundaries; `page` is the 1-based position of
/// each non-empty paragraph instead.
fn paragraphs_from_xml(xml: &str) -> Vec<PageContent> {
    let xml = TAB_OR_BREAK_RE.replace_all(xml, "<w:t> </w:t>");

    let mut paragraphs = Vec::new();
    let mut position = 1;
    for para in PARAGRAPH_RE.captures_iter(&xml) {
        let mut text = String::new();
        for run in TEXT_RUN_RE.captures_iter(&para[1]) {
            text.push_str(&unescape(&run[1]));
        }
        let text = text.trim();
        if !text.is_empty() {
            paragraphs.push(PageContent {
                page: position,
                content: text.to_string(),
            });
            position += 1;
        }
    }
    paragraphs
}

/// Decode the five named XML entities plus numeric character references
/// (`&#8220;` and `&#x201C;` forms), which Word emits for smart quotes and
/// other non-ASCII punctuation. Unrecognised entities are left as-is.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let c = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "amp" => Some('&'),
                _ => entity
                    .strip_prefix('#')
                    .and_then(|num| match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    })
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, end + 1))
        });

        match decoded {
            Some((c, skip)) => {
                out.push(c);
                rest = &rest[skip..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
