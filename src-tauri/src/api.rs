// Tauri commands. Each command delegates to a pool-taking inner function so
// the tests can drive them without a running app.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tauri::State;

use crate::batch::{self, BatchConfig, BatchReport};
use crate::keywords;
use crate::report;
use crate::store;
use crate::{DbPool, Error};

/// GUI-held state: the most recent batch report and its history row id,
/// kept so the export command works on exactly what the table shows.
#[derive(Default)]
pub struct AppState {
    last_run: Mutex<Option<(String, BatchReport)>>,
}

#[tauri::command]
pub fn list_keywords(pool: State<DbPool>) -> Result<Vec<store::keywords::KeywordRow>, Error> {
    let conn = pool.get()?;
    store::keywords::list(&conn)
}

#[tauri::command]
pub fn add_keywords(words: Vec<String>, pool: State<DbPool>) -> Result<usize, Error> {
    add_keywords_with_pool(words, pool.inner())
}

pub(crate) fn add_keywords_with_pool(words: Vec<String>, pool: &DbPool) -> Result<usize, Error> {
    let cleaned: Vec<String> = words
        .iter()
        .map(|w| keywords::clean_keyword(w))
        .filter(|w| !w.is_empty())
        .collect();
    let conn = pool.get()?;
    store::keywords::add_many(&conn, &cleaned)
}

/// Categorize an existing keyword. Returns false when the keyword is not in
/// the store.
#[tauri::command]
pub fn update_keyword(
    keyword: String,
    category: Option<String>,
    description: Option<String>,
    pool: State<DbPool>,
) -> Result<bool, Error> {
    update_keyword_with_pool(
        &keyword,
        category.as_deref(),
        description.as_deref(),
        pool.inner(),
    )
}

pub(crate) fn update_keyword_with_pool(
    keyword: &str,
    category: Option<&str>,
    description: Option<&str>,
    pool: &DbPool,
) -> Result<bool, Error> {
    let conn = pool.get()?;
    store::keywords::update(&conn, keyword, category, description)
}

#[tauri::command]
pub fn remove_keywords(words: Vec<String>, pool: State<DbPool>) -> Result<usize, Error> {
    let conn = pool.get()?;
    let mut removed = 0;
    for word in &words {
        if store::keywords::remove(&conn, word)? {
            removed += 1;
        }
    }
    Ok(removed)
}

#[tauri::command]
pub fn clear_keywords(pool: State<DbPool>) -> Result<usize, Error> {
    let conn = pool.get()?;
    store::keywords::clear(&conn)
}

#[tauri::command]
pub fn import_keywords(path: String, pool: State<DbPool>) -> Result<usize, Error> {
    import_keywords_with_pool(Path::new(&path), pool.inner())
}

pub(crate) fn import_keywords_with_pool(path: &Path, pool: &DbPool) -> Result<usize, Error> {
    let words = keywords::parse_keyword_file(path)?;
    if words.is_empty() {
        return Err(Error::Api("no keywords found in file".to_string()));
    }
    let conn = pool.get()?;
    store::keywords::add_many(&conn, &words)
}

/// Run a batch over the selected paths with the stored keyword list. The
/// batch itself is synchronous; it runs on a blocking task purely to keep
/// the window responsive.
#[tauri::command]
pub async fn analyze_documents(
    paths: Vec<String>,
    pool: State<'_, DbPool>,
    state: State<'_, AppState>,
) -> Result<BatchReport, Error> {
    let pool = pool.inner().clone();
    let (run_id, report) =
        tauri::async_runtime::spawn_blocking(move || analyze_documents_with_pool(paths, &pool))
            .await
            .map_err(|e| Error::Api(format!("analysis task failed: {e}")))??;

    *state.last_run.lock().unwrap() = Some((run_id, report.clone()));
    Ok(report)
}

pub(crate) fn analyze_documents_with_pool(
    paths: Vec<String>,
    pool: &DbPool,
) -> Result<(String, BatchReport), Error> {
    let conn = pool.get()?;
    let words = store::keywords::list_words(&conn)?;
    if words.is_empty() {
        return Err(Error::Api(
            "no keywords configured; add keywords before analyzing".to_string(),
        ));
    }
    if paths.is_empty() {
        return Err(Error::Api("no documents selected".to_string()));
    }

    let inputs: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();
    let files = batch::collect_document_paths(&inputs);
    let report = batch::run_batch(&files, &words, &BatchConfig::default());
    let run_id = store::batches::record(&conn, &report, None)?;
    Ok((run_id, report))
}

/// Export the most recent report. Failures here are fatal for the export
/// only and surface to the user as a dialog.
#[tauri::command]
pub fn export_results(
    path: String,
    pool: State<DbPool>,
    state: State<AppState>,
) -> Result<(), Error> {
    let last_run = state.last_run.lock().unwrap().clone();
    let (run_id, current) =
        last_run.ok_or_else(|| Error::Api("no results to export; run an analysis first".to_string()))?;

    report::export_report(&current, Path::new(&path))?;

    let conn = pool.get()?;
    store::batches::set_output_path(&conn, &run_id, &path)?;
    Ok(())
}

#[tauri::command]
pub fn list_batches(pool: State<DbPool>) -> Result<Vec<store::batches::BatchRow>, Error> {
    let conn = pool.get()?;
    store::batches::list(&conn, 100)
}
