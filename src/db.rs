//! Database setup shared by the domain modules.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    audit::create_activity_log_table, category::create_category_table,
    product::create_product_table,
};

/// Create the tables for all domain models if they do not already exist.
///
/// Foreign keys are enabled on `connection` so that deleting a category
/// clears the category reference of its products.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    create_category_table(connection)?;
    create_product_table(connection)?;
    create_activity_log_table(connection)?;

    Ok(())
}

/// The current time in UTC, truncated to whole seconds so that timestamps
/// read back from the database compare equal to the ones written.
pub(crate) fn current_timestamp() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();

    now.replace_nanosecond(0).unwrap_or(now)
}
