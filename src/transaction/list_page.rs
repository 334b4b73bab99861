//! The transactions tab.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    auth::UserID,
    customer::Customer,
    dashboard::{DashboardState, dashboard_page, format_signed_amount, load_collections},
    endpoints,
    html::{
        BADGE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        EXPENSE_TEXT_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, INCOME_TEXT_STYLE, dialog,
        dialog_alert_id, dialog_open_button, format_long_date, loading_spinner,
    },
    money::Cents,
    timezone::get_local_date,
    transaction::{Transaction, TransactionType},
};

const NEW_TRANSACTION_DIALOG_ID: &str = "new-transaction-dialog";

/// "Collection - Invoice #42 - Acme Ltd", leaving out whichever parts are missing.
fn transaction_heading(transaction: &Transaction) -> String {
    let mut heading = match transaction.type_ {
        TransactionType::Income => "Collection",
        TransactionType::Expense => "Payment",
    }
    .to_owned();

    if let Some(description) = &transaction.description {
        heading.push_str(" - ");
        heading.push_str(description);
    }

    if let Some(customer) = &transaction.customer {
        heading.push_str(" - ");
        heading.push_str(&customer.name);
    }

    heading
}

fn customer_badge(transaction: &Transaction) -> Option<String> {
    let customer = transaction.customer.as_ref()?;
    let label = match transaction.type_ {
        TransactionType::Income => "Paid by",
        TransactionType::Expense => "Paid to",
    };

    Some(format!("{label}: {}", customer.name))
}

fn type_radio(type_: TransactionType, label: &str) -> Markup {
    let id = format!("transaction-type-{}", type_.as_str());

    html! {
        label for=(id) class=(FORM_RADIO_LABEL_STYLE)
        {
            input
                id=(id)
                type="radio"
                name="type"
                value=(type_.as_str())
                checked[type_ == TransactionType::default()]
                required
                class=(FORM_RADIO_INPUT_STYLE);
            span { (label) }
        }
    }
}

fn new_transaction_form(customers: &[Customer], today: Date) -> Markup {
    let mut customers: Vec<&Customer> = customers.iter().collect();
    customers.sort_by_key(|customer| customer.name.to_lowercase());

    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error={ "#" (dialog_alert_id(NEW_TRANSACTION_DIALOG_ID)) }
            hx-indicator="#indicator"
            hx-disabled-elt="find button[type=submit]"
            class="space-y-4"
        {
            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    (type_radio(TransactionType::Income, "Income"))
                    (type_radio(TransactionType::Expense, "Expense"))
                }
            }

            div
            {
                label for="transaction-amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    id="transaction-amount"
                    type="number"
                    name="amount"
                    step="0.01"
                    min="0.01"
                    max=(Cents::MAX_TRANSACTION_AMOUNT.to_string())
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="transaction-description" class=(FORM_LABEL_STYLE) { "Description" }
                input
                    id="transaction-description"
                    type="text"
                    name="description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="transaction-customer" class=(FORM_LABEL_STYLE) { "Customer" }
                select id="transaction-customer" name="customer_id" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected { "Select a customer" }

                    @for customer in customers {
                        option value=(customer.id) { (customer.name) }
                    }
                }
            }

            div
            {
                label for="transaction-date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    id="transaction-date"
                    type="date"
                    name="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                " Save transaction"
            }
        }
    }
}

fn transaction_item(transaction: &Transaction) -> Markup {
    let amount_style = match transaction.type_ {
        TransactionType::Income => INCOME_TEXT_STYLE,
        TransactionType::Expense => EXPENSE_TEXT_STYLE,
    };

    html! {
        li
            class="flex items-center justify-between gap-4 py-3"
            data-transaction-id=(transaction.id)
        {
            div
            {
                h3 class="font-medium" { (transaction_heading(transaction)) }

                div class="flex flex-wrap items-center gap-2 mt-1 text-sm text-gray-500 dark:text-gray-400"
                {
                    time datetime=(transaction.date) { (format_long_date(transaction.date)) }

                    @if let Some(badge) = customer_badge(transaction) {
                        span class=(BADGE_STYLE) data-customer-badge { (badge) }
                    }
                }
            }

            p class={ "font-semibold whitespace-nowrap " (amount_style) } data-amount
            {
                (format_signed_amount(transaction))
            }
        }
    }
}

fn transactions_view(transactions: &[Transaction], customers: &[Customer], today: Date) -> Markup {
    let content = html! {
        div class="flex flex-wrap items-center justify-between gap-4 mb-6"
        {
            h1 class="text-2xl font-bold" { "Transactions" }

            div class="flex gap-2"
            {
                a href=(endpoints::TRANSACTIONS_VIEW) class={ "w-auto " (BUTTON_SECONDARY_STYLE) }
                {
                    "Refresh"
                }

                (dialog_open_button(NEW_TRANSACTION_DIALOG_ID, "New transaction"))
            }
        }

        section id="transaction-list" class=(CARD_STYLE)
        {
            @if transactions.is_empty() {
                p class="text-gray-500 dark:text-gray-400" data-empty-state
                {
                    "No transactions yet. Click \"New transaction\" to record money coming in or going out."
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for transaction in transactions {
                        (transaction_item(transaction))
                    }
                }
            }
        }

        (dialog(NEW_TRANSACTION_DIALOG_ID, "New transaction", &new_transaction_form(customers, today)))
    };

    dashboard_page("Transactions", endpoints::TRANSACTIONS_VIEW, &content)
}

/// Display the user's transactions and the form for adding one.
pub async fn get_transactions_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let collections = load_collections(user_id, &connection)?;

    Ok(transactions_view(&collections.transactions, &collections.customers, today).into_response())
}
