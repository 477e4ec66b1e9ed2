use std::fs;
use std::process::Command;

#[test]
fn scans_documents_and_exports_a_spreadsheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let keywords_path = dir.path().join("keywords.txt");
    fs::write(&keywords_path, "warranty\nbond\n").expect("write keywords");

    let doc_path = dir.path().join("tender.txt");
    fs::write(&doc_path, "The warranty period is two years.\nNo bid bond required.\n")
        .expect("write document");

    let output_path = dir.path().join("results.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_tenderscan-cli"))
        .arg("--keywords")
        .arg(&keywords_path)
        .arg("--doc")
        .arg(&doc_path)
        .arg("--output")
        .arg(&output_path)
        .output()
        .expect("failed to invoke tenderscan-cli");

    assert!(
        output.status.success(),
        "binary failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tender.txt"), "unexpected stdout: {stdout}");
    assert!(
        stdout.contains("2 matching paragraphs in 1 of 1 files"),
        "unexpected stdout: {stdout}"
    );

    let csv = fs::read_to_string(&output_path).expect("read exported csv");
    assert_eq!(csv.lines().count(), 2); // header + one file row
}

#[test]
fn missing_keyword_file_is_an_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_tenderscan-cli"))
        .arg("--keywords")
        .arg("/nonexistent/keywords.txt")
        .arg("--doc")
        .arg("/nonexistent/doc.pdf")
        .output()
        .expect("failed to invoke tenderscan-cli");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load keywords"), "stderr: {stderr}");
}
