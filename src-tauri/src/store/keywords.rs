// Queries for the 'keywords' table. The stored list survives between runs;
// each batch run takes an immutable snapshot via `list_words`.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRow {
    pub id: i64,
    pub keyword: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Insert a keyword; duplicates are ignored. Returns whether a row was added.
pub fn add(
    conn: &Connection,
    keyword: &str,
    category: Option<&str>,
    description: Option<&str>,
) -> Result<bool, Error> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO keywords (keyword, category, description) VALUES (?1, ?2, ?3)",
        params![keyword, category, description],
    )?;
    Ok(changed > 0)
}

/// Insert several bare keywords, returning how many were actually new.
pub fn add_many(conn: &Connection, keywords: &[String]) -> Result<usize, Error> {
    let mut added = 0;
    for keyword in keywords {
        if add(conn, keyword, None, None)? {
            added += 1;
        }
    }
    Ok(added)
}

/// Set the category and description of an existing keyword. Returns whether
/// the keyword was found.
pub fn update(
    conn: &Connection,
    keyword: &str,
    category: Option<&str>,
    description: Option<&str>,
) -> Result<bool, Error> {
    let changed = conn.execute(
        "UPDATE keywords SET category = ?2, description = ?3, updated_at = datetime('now') \
         WHERE keyword = ?1",
        params![keyword, category, description],
    )?;
    Ok(changed > 0)
}

pub fn remove(conn: &Connection, keyword: &str) -> Result<bool, Error> {
    let changed = conn.execute("DELETE FROM keywords WHERE keyword = ?1", params![keyword])?;
    Ok(changed > 0)
}

/// Delete all keywords, returning how many were removed.
pub fn clear(conn: &Connection) -> Result<usize, Error> {
    let changed = conn.execute("DELETE FROM keywords", [])?;
    Ok(changed)
}

pub fn list(conn: &Connection) -> Result<Vec<KeywordRow>, Error> {
    let mut stmt = conn.prepare(
        "SELECT id, keyword, category, description FROM keywords ORDER BY keyword",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(KeywordRow {
            id: row.get(0)?,
            keyword: row.get(1)?,
            category: row.get(2)?,
            description: row.get(3)?,
        })
    })?;
    let keywords = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(keywords)
}

/// The bare keyword list in stable (alphabetical) order.
pub fn list_words(conn: &Connection) -> Result<Vec<String>, Error> {
    let mut stmt = conn.prepare("SELECT keyword FROM keywords ORDER BY keyword")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let words = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(words)
}
