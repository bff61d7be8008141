//! Schema migrations for the BSL Track database

use rusqlite::Connection;

use super::DatabaseError;

/// Create the measurements table if it does not exist
///
/// The date and time columns carry server-side defaults so a row inserted
/// without them is stamped at insertion time.
pub fn run(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS bsl_measurements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            value DECIMAL(4,1) NOT NULL,
            measurement_type TEXT NOT NULL DEFAULT 'fasting',
            date TEXT NOT NULL DEFAULT CURRENT_DATE,
            time TEXT NOT NULL DEFAULT CURRENT_TIME
        )",
        [],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(())
}
