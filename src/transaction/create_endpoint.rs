//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    auth::UserID,
    database_id::CustomerId,
    endpoints,
    money::Cents,
    transaction::{Transaction, TransactionType, create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// The amount in dollars as typed, e.g. "45.50".
    pub amount: String,
    pub description: Option<String>,
    pub date: Date,
    /// `None` when "Select a customer" is left selected.
    pub customer_id: Option<CustomerId>,
}

/// A route handler for creating a new transaction, redirects to the
/// transactions tab on success.
///
/// On failure the response is an alert and there is no redirect, so the
/// dialog stays open with the user's input.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let amount = match form.amount.parse::<Cents>() {
        Ok(amount) => amount,
        Err(error) => {
            tracing::debug!("rejected transaction {form:?}: {error}");
            return error.into_alert_response();
        }
    };

    let builder = Transaction::build(form.type_, amount, form.date)
        .description(form.description.as_deref())
        .customer_id(form.customer_id);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_transaction(builder, user_id, &connection) {
        Ok(id) => {
            tracing::debug!("created transaction {id} for user {user_id}");

            (
                HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error @ (Error::InvalidAmount(_) | Error::InvalidCustomer(_))) => {
            tracing::debug!("rejected transaction {form:?}: {error}");
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not create transaction from {form:?}: {error}");
            error.into_alert_response()
        }
    }
}
