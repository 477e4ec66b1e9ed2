use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

// The shared database pool type
pub type DbPool = Pool<SqliteConnectionManager>;

// Library-level error type. Per-file extraction failures are recorded by
// `batch` as error rows; everything that reaches a command boundary lands
// here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] rusqlite::Error),
    #[error(transparent)]
    Pool(#[from] r2d2::Error),
    #[error(transparent)]
    Migration(#[from] rusqlite_migration::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Extract(#[from] extract::ExtractError),
    #[error("Export error: {0}")]
    Export(String),
    #[error("API Error: {0}")]
    Api(String),
}

// Tauri needs command errors to be serializable for the frontend.
impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub mod api;
pub mod batch;
pub mod extract;
pub mod keywords;
pub mod matcher;
pub mod report;
pub mod store;
