//! The overview tab: summary cards and recent activity.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    auth::UserID,
    dashboard::{
        cards::stats_cards_view,
        recent::recent_panel_view,
        shell::{Collections, DashboardState, dashboard_page, load_collections},
        stats::TransactionStats,
    },
    endpoints,
};

fn overview_view(collections: &Collections) -> Markup {
    let stats = TransactionStats::from_transactions(&collections.transactions);

    let content = html! {
        h1 class="text-2xl font-bold mb-6" { "Overview" }

        (stats_cards_view(&stats, collections.customers.len()))
        (recent_panel_view(&collections.transactions))
    };

    dashboard_page("Dashboard", endpoints::DASHBOARD_VIEW, &content)
}

/// Display the overview of the user's customers and transactions.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let collections = load_collections(user_id, &connection)?;

    Ok(overview_view(&collections).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        auth::UserID,
        customer::{NewCustomer, create_customer},
        dashboard::DashboardState,
        endpoints,
        money::Cents,
        test_utils::{assert_valid_html, get_test_connection_with_user, parse_html_document},
        transaction::{Transaction, TransactionType, create_transaction},
    };

    use super::get_dashboard_page;

    fn get_state(connection: Connection) -> DashboardState {
        DashboardState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn card_text(html: &Html, id: &str) -> String {
        html.select(&Selector::parse(&format!("#{id} [data-value]")).unwrap())
            .next()
            .unwrap_or_else(|| panic!("could not find card #{id}"))
            .text()
            .collect()
    }

    fn add_transactions(connection: &Connection, user_id: UserID) {
        create_transaction(
            Transaction::build(TransactionType::Income, Cents::new(10_000), date!(2026 - 10 - 18)),
            user_id,
            connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(TransactionType::Expense, Cents::new(4_000), date!(2026 - 10 - 19))
                .description(Some("Rent")),
            user_id,
            connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn dashboard_shows_totals() {
        let (connection, user_id) = get_test_connection_with_user();
        add_transactions(&connection, user_id);
        create_customer(
            NewCustomer::new("Acme Ltd", None, None).unwrap(),
            user_id,
            &connection,
        )
        .unwrap();

        let response = get_dashboard_page(State(get_state(connection)), Extension(user_id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(card_text(&html, "total-income"), "$100.00");
        assert_eq!(card_text(&html, "total-expense"), "$40.00");
        assert_eq!(card_text(&html, "net-balance"), "$60.00");
        assert_eq!(card_text(&html, "customer-count"), "1");

        let recent: Vec<String> = html
            .select(&Selector::parse("#recent-activity li").unwrap())
            .map(|row| row.text().collect())
            .collect();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].contains("Rent"));
        assert!(recent[1].contains("Income"));
    }

    #[tokio::test]
    async fn dashboard_marks_overview_tab_active() {
        let (connection, user_id) = get_test_connection_with_user();

        let response = get_dashboard_page(State(get_state(connection)), Extension(user_id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let active: Vec<_> = html
            .select(&Selector::parse("nav a[aria-current=page]").unwrap())
            .map(|link| link.value().attr("href").unwrap_or_default().to_owned())
            .collect();
        assert_eq!(active, [endpoints::DASHBOARD_VIEW]);
    }

    #[tokio::test]
    async fn dashboard_with_no_data_shows_zero_and_empty_state() {
        let (connection, user_id) = get_test_connection_with_user();

        let response = get_dashboard_page(State(get_state(connection)), Extension(user_id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(card_text(&html, "net-balance"), "$0.00");
        assert_eq!(card_text(&html, "customer-count"), "0");
        assert!(
            html.select(&Selector::parse("#recent-activity [data-empty-state]").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn dashboard_only_shows_own_data() {
        let (connection, user_id) = get_test_connection_with_user();
        add_transactions(&connection, user_id);
        let other_user = UserID::new(user_id.as_i64() + 1);

        let response = get_dashboard_page(State(get_state(connection)), Extension(other_user))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(card_text(&html, "total-income"), "$0.00");
    }
}
