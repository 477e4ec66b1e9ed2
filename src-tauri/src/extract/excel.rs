// Excel extraction via calamine: one PageContent per sheet, cells joined
// with spaces, rows with newlines.

use std::path::Path;

use calamine::{open_workbook_auto, Reader};

use super::{ExtractError, PageContent};

pub fn extract(path: &Path) -> Result<Vec<PageContent>, ExtractError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ExtractError::Corrupt {
        format: "excel",
        reason: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::new();

    for (idx, name) in sheet_names.iter().enumerate() {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| ExtractError::Corrupt {
                format: "excel",
                reason: format!("sheet {name}: {e}"),
            })?;

        let mut lines = Vec::new();
        for row in range.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.to_string())
                .filter(|s| !s.trim().is_empty())
                .collect();
            if !cells.is_empty() {
                lines.push(cells.join(" "));
            }
        }

        if !lines.is_empty() {
            sheets.push(PageContent {
                page: idx + 1,
                content: lines.join("\n"),
            });
        }
    }

    Ok(sheets)
}
