//! Defines the endpoint for creating a new customer.

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

use crate::{
    AppState, Error,
    auth::UserID,
    customer::{NewCustomer, create_customer},
    endpoints,
};

/// The state needed to create a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating a customer.
///
/// Empty optional fields arrive as `None`.
#[derive(Debug, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A route handler for creating a new customer, redirects to the customers
/// tab on success.
///
/// On failure the response is an alert and there is no redirect, so the
/// dialog stays open with the user's input.
pub async fn create_customer_endpoint(
    State(state): State<CreateCustomerState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<CustomerForm>,
) -> Response {
    let new_customer = match NewCustomer::new(
        &form.name,
        form.email.as_deref(),
        form.phone.as_deref(),
    ) {
        Ok(new_customer) => new_customer,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_customer(new_customer, user_id, &connection) {
        Ok(customer) => {
            tracing::debug!("created customer {} for user {user_id}", customer.id);

            (
                HxRedirect(endpoints::CUSTOMERS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create customer from {form:?}: {error}");
            error.into_alert_response()
        }
    }
}
