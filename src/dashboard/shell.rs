//! The frame shared by the dashboard tabs and the data every tab loads.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    customer::{Customer, get_customers},
    html::base,
    navigation::NavBar,
    transaction::{Transaction, get_transactions},
};

/// The state needed for displaying the dashboard tabs.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Istanbul".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Everything the current user has entered.
#[derive(Debug, Clone, PartialEq)]
pub struct Collections {
    /// Newest first.
    pub customers: Vec<Customer>,
    /// Newest date first, with their customers joined in.
    pub transactions: Vec<Transaction>,
}

/// Load the user's customers and transactions for rendering one of the tabs.
pub fn load_collections(user_id: UserID, connection: &Connection) -> Result<Collections, Error> {
    let customers = get_customers(user_id, connection)
        .inspect_err(|error| tracing::error!("could not load customers: {error}"))?;
    let transactions = get_transactions(user_id, connection)
        .inspect_err(|error| tracing::error!("could not load transactions: {error}"))?;

    Ok(Collections {
        customers,
        transactions,
    })
}

/// Wrap a tab's `content` in the page layout with the navigation bar.
pub fn dashboard_page(title: &str, active_endpoint: &str, content: &Markup) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content = html!(
        (nav_bar)

        main
            class="flex flex-col px-2 lg:px-6 py-6 mx-auto max-w-screen-xl
                text-gray-900 dark:text-white"
        {
            (content)
        }
    );

    base(title, &content)
}

#[cfg(test)]
mod load_collections_tests {
    use time::macros::date;

    use crate::{
        customer::{NewCustomer, create_customer},
        money::Cents,
        test_utils::get_test_connection_with_user,
        transaction::{Transaction, TransactionType, create_transaction},
    };

    use super::load_collections;

    #[test]
    fn empty_database_gives_empty_collections() {
        let (connection, user_id) = get_test_connection_with_user();

        let collections = load_collections(user_id, &connection).unwrap();

        assert!(collections.customers.is_empty());
        assert!(collections.transactions.is_empty());
    }

    #[test]
    fn loads_both_collections() {
        let (connection, user_id) = get_test_connection_with_user();
        let customer = create_customer(
            NewCustomer::new("Acme Ltd", None, None).unwrap(),
            user_id,
            &connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(TransactionType::Income, Cents::new(10_000), date!(2026 - 10 - 18))
                .customer_id(Some(customer.id)),
            user_id,
            &connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(TransactionType::Expense, Cents::new(4_000), date!(2026 - 10 - 19)),
            user_id,
            &connection,
        )
        .unwrap();

        let collections = load_collections(user_id, &connection).unwrap();

        assert_eq!(collections.customers.len(), 1);
        assert_eq!(collections.transactions.len(), 2);
        assert_eq!(collections.transactions[0].date, date!(2026 - 10 - 19));
        assert_eq!(
            collections.transactions[1]
                .customer
                .as_ref()
                .map(|customer| customer.name.as_str()),
            Some("Acme Ltd")
        );
    }
}
