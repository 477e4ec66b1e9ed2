pub mod batches;
pub mod keywords;
pub mod migrations;

use rusqlite::Connection;

use crate::Error;

pub fn migrate_db(conn: &mut Connection) -> Result<(), Error> {
    migrations::runner().to_latest(conn)?;
    Ok(())
}
