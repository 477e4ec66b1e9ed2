// Keyword list handling: cleaning and loading from a file. A list is
// immutable once loaded for a batch run.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};

use crate::extract::ExtractError;
use crate::Error;

/// Strip surrounding whitespace and stray quotes from a keyword.
pub fn clean_keyword(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// Load a keyword list from a plain-text file (one keyword per line, lines
/// may also be comma-separated, fullwidth commas included) or from the first
/// column of a spreadsheet. Cleaned, empties dropped, deduplicated while
/// preserving first-occurrence order.
pub fn parse_keyword_file(path: &Path) -> Result<Vec<String>, Error> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let raw = match ext.as_str() {
        "xlsx" | "xls" => parse_spreadsheet(path)?,
        "csv" => parse_csv(path)?,
        _ => parse_plain_text(path)?,
    };

    Ok(dedupe(raw))
}

fn parse_plain_text(path: &Path) -> Result<Vec<String>, Error> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .flat_map(|line| line.split([',', '，']))
        .map(clean_keyword)
        .collect())
}

fn parse_spreadsheet(path: &Path) -> Result<Vec<String>, ExtractError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ExtractError::Corrupt {
        format: "excel",
        reason: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names().to_owned();
    let mut keywords = Vec::new();
    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| ExtractError::Corrupt {
                format: "excel",
                reason: format!("sheet {name}: {e}"),
            })?;
        for row in range.rows() {
            if let Some(cell) = row.first() {
                keywords.push(clean_keyword(&cell.to_string()));
            }
        }
    }
    Ok(keywords)
}

fn parse_csv(path: &Path) -> Result<Vec<String>, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ExtractError::Corrupt {
            format: "csv",
            reason: e.to_string(),
        })?;

    let mut keywords = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ExtractError::Corrupt {
            format: "csv",
            reason: e.to_string(),
        })?;
        if let Some(field) = record.get(0) {
            keywords.push(clean_keyword(field));
        }
    }
    Ok(keywords)
}

fn dedupe(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|kw| !kw.is_empty() && seen.insert(kw.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cleaning_strips_quotes_and_whitespace() {
        assert_eq!(clean_keyword("  \"保证金\"  "), "保证金");
        assert_eq!(clean_keyword("'warranty'"), "warranty");
        assert_eq!(clean_keyword("   "), "");
    }

    #[test]
    fn text_file_splits_on_newlines_and_commas() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "保证金，质保期,warranty").unwrap();
        writeln!(file, "delivery").unwrap();
        writeln!(file, "保证金").unwrap();

        let keywords = parse_keyword_file(file.path()).unwrap();
        assert_eq!(keywords, vec!["保证金", "质保期", "warranty", "delivery"]);
    }

    #[test]
    fn csv_takes_the_first_field() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "warranty,ignored").unwrap();
        writeln!(file, "bond,also ignored").unwrap();

        let keywords = parse_keyword_file(file.path()).unwrap();
        assert_eq!(keywords, vec!["warranty", "bond"]);
    }

    #[test]
    fn corrupt_spreadsheet_surfaces_as_extraction_error() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        std::fs::write(file.path(), b"not a workbook").unwrap();

        let err = parse_keyword_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Extract(ExtractError::Corrupt { format: "excel", .. })));
    }

    #[test]
    fn spreadsheet_takes_the_first_column() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "warranty").unwrap();
        sheet.write_string(0, 1, "not a keyword").unwrap();
        sheet.write_string(1, 0, "bond").unwrap();
        workbook.save(file.path()).unwrap();

        let keywords = parse_keyword_file(file.path()).unwrap();
        assert_eq!(keywords, vec!["warranty", "bond"]);
    }
}
