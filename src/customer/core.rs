//! The customer model and its database queries.

use email_address::EmailAddress;
use rusqlite::{Connection, OptionalExtension, Row, params};
use time::OffsetDateTime;

use crate::{Error, auth::UserID, database_id::CustomerId};

/// A person or business the user trades with.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: OffsetDateTime,
}

/// The validated fields for a customer that has not been inserted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    name: String,
    email: Option<String>,
    phone: Option<String>,
}

/// Trim `value`, turning blank strings into `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

impl NewCustomer {
    /// Validate the raw form fields.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCustomerName] if `name` is blank or
    /// [Error::InvalidEmail] if `email` is given but malformed.
    pub fn new(name: &str, email: Option<&str>, phone: Option<&str>) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyCustomerName);
        }

        let email = non_blank(email);
        if let Some(email) = &email {
            if !EmailAddress::is_valid(email) {
                return Err(Error::InvalidEmail(email.clone()));
            }
        }

        Ok(Self {
            name: name.to_owned(),
            email,
            phone: non_blank(phone),
        })
    }
}

pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS customer (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            created_at TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_customer_user_created
            ON customer(user_id, created_at)",
        (),
    )?;

    Ok(())
}

/// Insert `customer` for `user_id`.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the insert failed.
pub fn create_customer(
    customer: NewCustomer,
    user_id: UserID,
    connection: &Connection,
) -> Result<Customer, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO customer (name, email, phone, created_at, user_id)
            VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            customer.name,
            customer.email,
            customer.phone,
            created_at,
            user_id.as_i64()
        ],
    )?;

    Ok(Customer {
        id: connection.last_insert_rowid(),
        name: customer.name,
        email: customer.email,
        phone: customer.phone,
        created_at,
    })
}

fn map_customer_row(row: &Row) -> Result<Customer, rusqlite::Error> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Get all of the user's customers, newest first.
pub fn get_customers(user_id: UserID, connection: &Connection) -> Result<Vec<Customer>, Error> {
    connection
        .prepare(
            "SELECT id, name, email, phone, created_at FROM customer
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC",
        )?
        .query_map([user_id.as_i64()], map_customer_row)?
        .map(|maybe_customer| maybe_customer.map_err(Error::from))
        .collect()
}

/// Whether `customer_id` refers to one of `user_id`'s customers.
pub fn customer_belongs_to_user(
    customer_id: CustomerId,
    user_id: UserID,
    connection: &Connection,
) -> Result<bool, Error> {
    let found = connection
        .query_row(
            "SELECT 1 FROM customer WHERE id = ?1 AND user_id = ?2",
            params![customer_id, user_id.as_i64()],
            |_| Ok(()),
        )
        .optional()?;

    Ok(found.is_some())
}
