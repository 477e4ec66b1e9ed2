// Queries for the 'batch_runs' history table: one row per completed batch.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batch::BatchReport;
use crate::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow {
    pub id: String,
    pub started_at: String,
    pub file_count: i64,
    pub matched_files: i64,
    pub failed_files: i64,
    pub keyword_count: i64,
    pub output_path: Option<String>,
    pub status: String,
}

pub fn record(
    conn: &Connection,
    report: &BatchReport,
    output_path: Option<&str>,
) -> Result<String, Error> {
    let id = Uuid::new_v4().to_string();
    let status = if report.failed_file_count() == report.files.len() && !report.files.is_empty() {
        "failed"
    } else {
        "completed"
    };

    conn.execute(
        "INSERT INTO batch_runs \
         (id, started_at, file_count, matched_files, failed_files, keyword_count, output_path, status) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            report.started_at.to_rfc3339(),
            report.files.len() as i64,
            report.matched_file_count() as i64,
            report.failed_file_count() as i64,
            report.keywords.len() as i64,
            output_path,
            status,
        ],
    )?;

    Ok(id)
}

/// Most recent batches first.
pub fn list(conn: &Connection, limit: usize) -> Result<Vec<BatchRow>, Error> {
    let mut stmt = conn.prepare(
        "SELECT id, started_at, file_count, matched_files, failed_files, keyword_count, \
         output_path, status \
         FROM batch_runs ORDER BY started_at DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |row| {
        Ok(BatchRow {
            id: row.get(0)?,
            started_at: row.get(1)?,
            file_count: row.get(2)?,
            matched_files: row.get(3)?,
            failed_files: row.get(4)?,
            keyword_count: row.get(5)?,
            output_path: row.get(6)?,
            status: row.get(7)?,
        })
    })?;
    let batches = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// Update the output path once a report has been exported.
pub fn set_output_path(conn: &Connection, id: &str, output_path: &str) -> Result<(), Error> {
    conn.execute(
        "UPDATE batch_runs SET output_path = ?1 WHERE id = ?2",
        params![output_path, id],
    )?;
    Ok(())
}
