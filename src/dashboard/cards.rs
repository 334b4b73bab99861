//! The summary cards at the top of the overview tab.

use maud::{Markup, html};

use crate::{
    dashboard::stats::TransactionStats,
    html::{CARD_STYLE, EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE, format_currency},
};

fn card(id: &str, title: &str, value: &str, value_style: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }
            p class={ "mt-2 text-2xl font-bold " (value_style) } data-value { (value) }
        }
    }
}

/// Total income, total expense, net balance and the customer count.
///
/// The balance is green when it is zero or more and red otherwise.
pub(super) fn stats_cards_view(stats: &TransactionStats, customer_count: usize) -> Markup {
    let balance_style = if !stats.balance.is_negative() {
        INCOME_TEXT_STYLE
    } else {
        EXPENSE_TEXT_STYLE
    };

    html! {
        section class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4"
        {
            (card("total-income", "Total income", &format_currency(stats.total_income), INCOME_TEXT_STYLE))
            (card("total-expense", "Total expense", &format_currency(stats.total_expense), EXPENSE_TEXT_STYLE))
            (card("net-balance", "Net balance", &format_currency(stats.balance), balance_style))
            (card("customer-count", "Customers", &customer_count.to_string(), ""))
        }
    }
}
