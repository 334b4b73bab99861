//! The transaction model and its database queries.

use rusqlite::{
    Connection, Row, ToSql, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    auth::UserID,
    customer::{customer_belongs_to_user, non_blank},
    database_id::{CustomerId, TransactionId},
    money::Cents,
};

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type {other:?}").into(),
            )),
        }
    }
}

/// The customer linked to a transaction, joined in when listing transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionCustomer {
    pub id: CustomerId,
    pub name: String,
}

/// Money that came in from or went out to someone.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub type_: TransactionType,
    /// Always positive, [Transaction::type_] gives the direction.
    pub amount: Cents,
    pub description: Option<String>,
    pub date: Date,
    pub customer: Option<TransactionCustomer>,
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Start building a new transaction, see [TransactionBuilder].
    pub fn build(type_: TransactionType, amount: Cents, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            type_,
            amount,
            date,
            description: None,
            customer_id: None,
        }
    }

    /// The amount with income positive and expenses negative.
    pub fn signed_amount(&self) -> Cents {
        match self.type_ {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The fields for a transaction that has not been inserted yet.
///
/// ```ignore
/// let builder = Transaction::build(TransactionType::Expense, Cents::new(4599), date!(2026 - 10 - 19))
///     .description(Some("Office chairs"))
///     .customer_id(Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    pub type_: TransactionType,
    pub amount: Cents,
    pub date: Date,
    pub description: Option<String>,
    pub customer_id: Option<CustomerId>,
}

impl TransactionBuilder {
    /// Blank descriptions are stored as `NULL`.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = non_blank(description);
        self
    }

    pub fn customer_id(mut self, customer_id: Option<CustomerId>) -> Self {
        self.customer_id = customer_id;
        self
    }
}

pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                amount INTEGER NOT NULL CHECK (amount > 0),
                description TEXT,
                date TEXT NOT NULL,
                customer_id INTEGER,
                user_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY(customer_id) REFERENCES customer(id) ON UPDATE CASCADE ON DELETE SET NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date
            ON \"transaction\"(user_id, date)",
        (),
    )?;

    Ok(())
}

/// Insert a transaction for `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is not between one cent and
///   [Cents::MAX_TRANSACTION_AMOUNT],
/// - [Error::InvalidCustomer] if the customer ID is not one of the user's customers,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    user_id: UserID,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    if !builder.amount.is_valid_transaction_amount() {
        return Err(Error::InvalidAmount(builder.amount.to_string()));
    }

    if let Some(customer_id) = builder.customer_id {
        if !customer_belongs_to_user(customer_id, user_id, connection)? {
            return Err(Error::InvalidCustomer(customer_id));
        }
    }

    connection.execute(
        "INSERT INTO \"transaction\" (type, amount, description, date, customer_id, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            builder.type_,
            builder.amount,
            builder.description,
            builder.date,
            builder.customer_id,
            user_id.as_i64(),
            OffsetDateTime::now_utc(),
        ],
    )?;

    Ok(connection.last_insert_rowid())
}

const SELECT_TRANSACTIONS: &str = "SELECT t.id, t.type, t.amount, t.description, t.date, \
    t.created_at, c.id, c.name \
    FROM \"transaction\" t \
    LEFT JOIN customer c ON c.id = t.customer_id AND c.user_id = t.user_id";

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let customer_id: Option<CustomerId> = row.get(6)?;
    let customer_name: Option<String> = row.get(7)?;
    let customer = customer_id
        .zip(customer_name)
        .map(|(id, name)| TransactionCustomer { id, name });

    Ok(Transaction {
        id: row.get(0)?,
        type_: row.get(1)?,
        amount: row.get(2)?,
        description: row.get(3)?,
        date: row.get(4)?,
        created_at: row.get(5)?,
        customer,
    })
}

/// Get all of the user's transactions with their customers, newest date first.
///
/// Transactions on the same date are ordered by when they were entered,
/// most recent first.
pub fn get_transactions(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_TRANSACTIONS} WHERE t.user_id = ?1 \
            ORDER BY t.date DESC, t.created_at DESC, t.id DESC"
        ))?
        .query_map([user_id.as_i64()], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

#[cfg(test)]
/// Retrieve one of the user's transactions by its `id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to one of the user's transactions.
pub fn get_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "{SELECT_TRANSACTIONS} WHERE t.id = ?1 AND t.user_id = ?2"
        ))?
        .query_row(params![id, user_id.as_i64()], map_transaction_row)
        .map_err(Error::from)
}
