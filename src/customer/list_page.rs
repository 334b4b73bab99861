//! The customers tab.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    auth::UserID,
    customer::Customer,
    dashboard::{DashboardState, dashboard_page, load_collections},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, dialog, dialog_alert_id, dialog_open_button, loading_spinner,
    },
};

const NEW_CUSTOMER_DIALOG_ID: &str = "new-customer-dialog";

fn new_customer_form() -> Markup {
    html! {
        form
            hx-post=(endpoints::CUSTOMERS_API)
            hx-target-error={ "#" (dialog_alert_id(NEW_CUSTOMER_DIALOG_ID)) }
            hx-indicator="#indicator"
            hx-disabled-elt="find button[type=submit]"
            class="space-y-4"
        {
            div
            {
                label for="customer-name" class=(FORM_LABEL_STYLE) { "Name" }
                input
                    id="customer-name"
                    type="text"
                    name="name"
                    placeholder="Acme Ltd"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="customer-email" class=(FORM_LABEL_STYLE) { "Email" }
                input
                    id="customer-email"
                    type="email"
                    name="email"
                    placeholder="accounts@example.com"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="customer-phone" class=(FORM_LABEL_STYLE) { "Phone" }
                input
                    id="customer-phone"
                    type="tel"
                    name="phone"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                " Save customer"
            }
        }
    }
}

fn customer_item(customer: &Customer) -> Markup {
    html! {
        li class="py-3" data-customer-id=(customer.id)
        {
            p class="font-medium" { (customer.name) }

            @if let Some(email) = &customer.email {
                p class="text-sm text-gray-500 dark:text-gray-400" data-field="email" { (email) }
            }

            @if let Some(phone) = &customer.phone {
                p class="text-sm text-gray-500 dark:text-gray-400" data-field="phone" { (phone) }
            }
        }
    }
}

fn customers_view(customers: &[Customer]) -> Markup {
    let content = html! {
        div class="flex flex-wrap items-center justify-between gap-4 mb-6"
        {
            h1 class="text-2xl font-bold" { "Customers" }

            div class="flex gap-2"
            {
                a href=(endpoints::CUSTOMERS_VIEW) class={ "w-auto " (BUTTON_SECONDARY_STYLE) }
                {
                    "Refresh"
                }

                (dialog_open_button(NEW_CUSTOMER_DIALOG_ID, "New customer"))
            }
        }

        section id="customer-list" class=(CARD_STYLE)
        {
            @if customers.is_empty() {
                p class="text-gray-500 dark:text-gray-400" data-empty-state
                {
                    "No customers yet. Click \"New customer\" to add your first one."
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for customer in customers {
                        (customer_item(customer))
                    }
                }
            }
        }

        (dialog(NEW_CUSTOMER_DIALOG_ID, "New customer", &new_customer_form()))
    };

    dashboard_page("Customers", endpoints::CUSTOMERS_VIEW, &content)
}

/// Display the user's customers and the form for adding one.
pub async fn get_customers_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let collections = load_collections(user_id, &connection)?;

    Ok(customers_view(&collections.customers).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        customer::{NewCustomer, create_customer},
        dashboard::DashboardState,
        endpoints,
        test_utils::{
            assert_error_target_in_dialog, assert_form_input, assert_form_optional_input,
            assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            get_test_connection_with_user, must_get_form, parse_html_document,
        },
    };

    use super::{NEW_CUSTOMER_DIALOG_ID, get_customers_page};

    fn get_state(connection: Connection) -> DashboardState {
        DashboardState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn customer_items(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("#customer-list li").unwrap())
            .map(|item| item.text().collect::<String>())
            .collect()
    }

    #[tokio::test]
    async fn page_has_new_customer_form() {
        let (connection, user_id) = get_test_connection_with_user();

        let response = get_customers_page(State(get_state(connection)), Extension(user_id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::CUSTOMERS_API, "hx-post");
        assert_error_target_in_dialog(&html, &form, NEW_CUSTOMER_DIALOG_ID);
        assert!(form.value().attr("hx-disabled-elt").is_some());
        assert_form_input(&form, "name", "text");
        assert_form_optional_input(&form, "email", "email");
        assert_form_optional_input(&form, "phone", "tel");
        assert_form_submit_button(&form);

        let dialog = html
            .select(&Selector::parse("dialog#new-customer-dialog").unwrap())
            .next()
            .expect("dialog missing");
        assert!(dialog.value().attr("open").is_none(), "dialog should start closed");
    }

    #[tokio::test]
    async fn page_shows_empty_state() {
        let (connection, user_id) = get_test_connection_with_user();

        let response = get_customers_page(State(get_state(connection)), Extension(user_id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert!(customer_items(&html).is_empty());
        assert!(
            html.select(&Selector::parse("#customer-list [data-empty-state]").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn page_lists_customers_newest_first() {
        let (connection, user_id) = get_test_connection_with_user();
        create_customer(
            NewCustomer::new("Acme Ltd", Some("accounts@acme.test"), None).unwrap(),
            user_id,
            &connection,
        )
        .unwrap();
        create_customer(
            NewCustomer::new("Bob's Bikes", None, Some("021 555 0199")).unwrap(),
            user_id,
            &connection,
        )
        .unwrap();

        let response = get_customers_page(State(get_state(connection)), Extension(user_id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let items = customer_items(&html);
        assert_eq!(items.len(), 2);
        assert!(items[0].contains("Bob's Bikes"));
        assert!(items[0].contains("021 555 0199"));
        assert!(items[1].contains("Acme Ltd"));
        assert!(items[1].contains("accounts@acme.test"));
        assert_eq!(
            html.select(&Selector::parse("[data-field=email]").unwrap())
                .count(),
            1,
            "missing emails should not be rendered"
        );
    }
}
