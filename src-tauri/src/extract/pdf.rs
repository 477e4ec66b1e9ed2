// PDF extraction via the pdf-extract crate, one PageContent per page.

use std::path::Path;

use super::{ExtractError, PageContent};

pub fn extract(path: &Path) -> Result<Vec<PageContent>, ExtractError> {
    let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| ExtractError::Corrupt {
        format: "pdf",
        reason: e.to_string(),
    })?;

    // Page numbers must survive the empty-page filter, so enumerate first.
    let pages = pages
        .into_iter()
        .enumerate()
        .filter_map(|(idx, text)| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(PageContent {
                    page: idx + 1,
                    content: trimmed.to_string(),
                })
            }
        })
        .collect();

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// A minimal single-page PDF with one Helvetica text run. Offsets in the
    /// xref table are computed while assembling, so the file is well formed.
    fn minimal_pdf(text: &str) -> Vec<u8> {
        let stream = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            format!("<< /Length {} >>\nstream\n{stream}\nendstream", stream.len()),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref_offset = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn well_formed_pdf_yields_page_text() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&minimal_pdf("Bid bond required")).unwrap();

        let pages = extract(file.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page, 1);
        assert!(pages[0].content.contains("Bid bond required"));
    }

    #[test]
    fn garbage_bytes_are_reported_as_corrupt() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let err = extract(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Corrupt { format: "pdf", .. }));
    }
}
