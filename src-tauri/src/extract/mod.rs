// Extraction adapter: one library-backed extractor per supported format.
//
// Every extractor returns the same shape, a list of `PageContent` units
// (PDF page, DOCX paragraph block, Excel sheet, whole text file), so the
// matcher never cares where the text came from.

pub mod docx;
pub mod excel;
pub mod pdf;
pub mod txt;

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("Corrupt or unreadable {format} file: {reason}")]
    Corrupt {
        format: &'static str,
        reason: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported document formats, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Excel,
    Text,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        Self::from_extension(&ext)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "xlsx" | "xls" => Some(Self::Excel),
            "txt" | "md" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Excel => "excel",
            Self::Text => "text",
        }
    }
}

/// One extracted unit of a document. `page` is 1-based: a PDF page number,
/// a DOCX paragraph position, or an Excel sheet index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub page: usize,
    pub content: String,
}

/// Extract the textual content of a document, dispatching on its extension.
///
/// No retries: errors are surfaced to the caller per file and never abort a
/// batch (the batch runner records them as failure rows).
pub fn extract_text(path: &Path) -> Result<Vec<PageContent>, ExtractError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let kind = match DocumentKind::from_extension(&ext) {
        Some(kind) => kind,
        None if ext == "doc" => {
            return Err(ExtractError::UnsupportedFormat(
                "doc (legacy Word binary; convert to .docx)".to_string(),
            ))
        }
        None => return Err(ExtractError::UnsupportedFormat(ext)),
    };

    match kind {
        DocumentKind::Pdf => pdf::extract(path),
        DocumentKind::Docx => docx::extract(path),
        DocumentKind::Excel => excel::extract(path),
        DocumentKind::Text => txt::extract(path),
    }
}

/// Join extracted pages into a single searchable string.
pub fn flatten(pages: &[PageContent]) -> String {
    pages
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_inferred_case_insensitively() {
        assert_eq!(
            DocumentKind::from_path(Path::new("bid/Tender.PDF")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("a.XLSX")),
            Some(DocumentKind::Excel)
        );
        assert_eq!(DocumentKind::from_path(Path::new("notes.rtf")), None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = extract_text(Path::new("archive.rar")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn legacy_doc_gets_a_conversion_hint() {
        let err = extract_text(Path::new("old.doc")).unwrap_err();
        assert!(err.to_string().contains("convert to .docx"));
    }
}
