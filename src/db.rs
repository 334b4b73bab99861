//! Sets up the application's SQLite database.

use rusqlite::Connection;

use crate::{
    Error, auth::create_user_table, customer::create_customer_table,
    transaction::create_transaction_table,
};

/// Create all of the tables for the domain models and turn on foreign key
/// enforcement.
///
/// Tables that already exist are left untouched, so this is safe to call
/// every time the server starts.
///
/// # Errors
/// Returns an error if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Foreign keys must be switched on outside of a transaction.
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction = connection.unchecked_transaction()?;

    create_user_table(&transaction)?;
    create_customer_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
