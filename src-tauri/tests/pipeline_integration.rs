// Integration test for the full analysis pipeline: real DOCX and XLSX
// fixtures in, exported workbook out.
use std::io::Write;
use std::path::PathBuf;

use calamine::Reader;
use zip::write::FileOptions;

use tenderscan::batch::{self, BatchConfig};
use tenderscan::report;

fn write_docx(dir: &std::path::Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut xml = String::from("<w:document><w:body>");
    for p in paragraphs {
        xml.push_str(&format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"));
    }
    xml.push_str("</w:body></w:document>");

    let file = std::fs::File::create(&path).expect("create docx");
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("word/document.xml", FileOptions::default())
        .expect("start document.xml");
    writer.write_all(xml.as_bytes()).expect("write document.xml");
    writer.finish().expect("finish docx");
    path
}

fn write_xlsx(dir: &std::path::Path, name: &str, rows: &[&[&str]]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet
                .write_string(r as u32, c as u16, *cell)
                .expect("write cell");
        }
    }
    workbook.save(&path).expect("save xlsx");
    path
}

#[test]
fn scans_word_and_excel_documents_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");

    let docx = write_docx(
        dir.path(),
        "tender.docx",
        &[
            "第三章 投标人须知",
            "投标保证金为人民币五万元，开标前递交。",
            "质保期自验收合格之日起计算，为期两年。",
        ],
    );
    let xlsx = write_xlsx(
        dir.path(),
        "requirements.xlsx",
        &[
            &["Item", "Requirement"],
            &["1", "Performance bond of 5% of contract value"],
            &["2", "Delivery within 30 days"],
        ],
    );

    let keywords = vec![
        "保证金".to_string(),
        "质保期".to_string(),
        "bond".to_string(),
    ];
    let report_data = batch::run_batch(&[docx, xlsx], &keywords, &BatchConfig::default());

    assert_eq!(report_data.files.len(), 2);
    assert_eq!(report_data.matched_file_count(), 2);
    assert_eq!(report_data.failed_file_count(), 0);

    let word = &report_data.files[0];
    assert_eq!(word.counts["保证金"], 1);
    assert_eq!(word.counts["质保期"], 1);
    assert_eq!(word.counts["bond"], 0);
    assert_eq!(word.matches.len(), 2);
    assert_eq!(word.matches[0].section, "第三章");

    let excel = &report_data.files[1];
    assert_eq!(excel.counts["bond"], 1);

    let out = dir.path().join("results.xlsx");
    report::export_report(&report_data, &out).expect("export report");

    let mut exported = calamine::open_workbook_auto(&out).expect("open exported workbook");
    let summary = exported.worksheet_range("Summary").expect("summary sheet");
    assert_eq!(summary.rows().count(), 3); // header + two files

    let matches = exported.worksheet_range("Matches").expect("matches sheet");
    assert_eq!(matches.rows().count(), 4); // header + two docx rows + one xlsx row
}
