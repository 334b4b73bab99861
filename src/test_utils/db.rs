use rusqlite::Connection;

use crate::{
    auth::{PasswordHash, UserID, create_user},
    db::initialize,
};

/// An in-memory database with every table created.
fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open database in memory");
    initialize(&connection).expect("Could not initialize database");
    connection
}

/// An in-memory database with one registered user who owns nothing yet.
pub(crate) fn get_test_connection_with_user() -> (Connection, UserID) {
    let connection = get_test_connection();
    let user = create_user(
        "owner@example.com",
        PasswordHash::new_unchecked("hunter2"),
        &connection,
    )
    .expect("Could not create test user");

    (connection, user.id)
}
