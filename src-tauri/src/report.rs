// Result-table export. One summary row per input file plus a detail sheet
// of matched paragraphs; the output format follows the file extension.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::batch::BatchReport;
use crate::Error;

/// Write the report to `path`, dispatching on the extension: `.xlsx` for a
/// two-sheet workbook, `.csv` for summary rows only.
pub fn export_report(report: &BatchReport, path: &Path) -> Result<(), Error> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" => export_xlsx(report, path),
        "csv" => export_csv(report, path),
        other => Err(Error::Export(format!(
            "unsupported output format: {other:?} (use .xlsx or .csv)"
        ))),
    }
}

fn export_xlsx(report: &BatchReport, path: &Path) -> Result<(), Error> {
    let xlsx = |e: rust_xlsxwriter::XlsxError| Error::Export(e.to_string());

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    // Summary sheet: file name, one count column per keyword, total, status.
    let summary = workbook.add_worksheet();
    summary.set_name("Summary").map_err(xlsx)?;
    summary.write_string_with_format(0, 0, "File", &bold).map_err(xlsx)?;
    for (col, keyword) in report.keywords.iter().enumerate() {
        summary
            .write_string_with_format(0, col as u16 + 1, keyword, &bold)
            .map_err(xlsx)?;
    }
    let total_col = report.keywords.len() as u16 + 1;
    summary
        .write_string_with_format(0, total_col, "Total", &bold)
        .map_err(xlsx)?;
    summary
        .write_string_with_format(0, total_col + 1, "Status", &bold)
        .map_err(xlsx)?;

    for (row, file) in report.files.iter().enumerate() {
        let row = row as u32 + 1;
        summary.write_string(row, 0, &file.file_name).map_err(xlsx)?;
        for (col, keyword) in report.keywords.iter().enumerate() {
            let count = file.counts.get(keyword).copied().unwrap_or(0);
            summary
                .write_number(row, col as u16 + 1, count as f64)
                .map_err(xlsx)?;
        }
        summary
            .write_number(row, total_col, file.total_matches as f64)
            .map_err(xlsx)?;
        summary
            .write_string(row, total_col + 1, file.error.as_deref().unwrap_or("ok"))
            .map_err(xlsx)?;
    }
    summary.set_column_width(0, 40).map_err(xlsx)?;

    // Matches sheet: one row per matched paragraph.
    let matches = workbook.add_worksheet();
    matches.set_name("Matches").map_err(xlsx)?;
    for (col, header) in ["File", "Page", "Section", "Keyword", "Snippet"]
        .iter()
        .enumerate()
    {
        matches
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx)?;
    }
    let mut row = 1u32;
    for file in &report.files {
        for m in &file.matches {
            matches.write_string(row, 0, &file.file_name).map_err(xlsx)?;
            matches.write_number(row, 1, m.page as f64).map_err(xlsx)?;
            matches.write_string(row, 2, &m.section).map_err(xlsx)?;
            matches.write_string(row, 3, &m.keyword).map_err(xlsx)?;
            matches.write_string(row, 4, &m.snippet).map_err(xlsx)?;
            row += 1;
        }
    }
    matches.set_column_width(4, 80).map_err(xlsx)?;

    workbook.save(path).map_err(xlsx)?;
    Ok(())
}

fn export_csv(report: &BatchReport, path: &Path) -> Result<(), Error> {
    let csv_err = |e: csv::Error| Error::Export(e.to_string());

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    let mut header = vec!["File".to_string()];
    header.extend(report.keywords.iter().cloned());
    header.push("Total".to_string());
    header.push("Status".to_string());
    writer.write_record(&header).map_err(csv_err)?;

    for file in &report.files {
        let mut record = vec![file.file_name.clone()];
        for keyword in &report.keywords {
            record.push(file.counts.get(keyword).copied().unwrap_or(0).to_string());
        }
        record.push(file.total_matches.to_string());
        record.push(file.error.clone().unwrap_or_else(|| "ok".to_string()));
        writer.write_record(&record).map_err(csv_err)?;
    }

    writer.flush()?;
    Ok(())
}
