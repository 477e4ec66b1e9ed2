// Plain text files are a single "page"; the matcher splits on lines.

use std::fs;
use std::path::Path;

use super::{ExtractError, PageContent};

pub fn extract(path: &Path) -> Result<Vec<PageContent>, ExtractError> {
    let content = fs::read_to_string(path)?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![PageContent {
        page: 1,
        content: trimmed.to_string(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn whole_file_becomes_one_page() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "line one").unwrap();
        writeln!(file, "line two").unwrap();

        let pages = extract(file.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].content, "line one\nline two");
    }

    #[test]
    fn empty_file_yields_no_pages() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(extract(file.path()).unwrap().is_empty());
    }
}
