//! The recent activity panel on the overview tab.

use maud::{Markup, html};

use crate::{
    html::{CARD_STYLE, EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE, format_currency},
    transaction::{Transaction, TransactionType},
};

/// How many transactions the recent activity panel shows.
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// The first [RECENT_TRANSACTION_COUNT] items of an already sorted list.
pub fn recent_transactions<T>(transactions: &[T]) -> &[T] {
    &transactions[..transactions.len().min(RECENT_TRANSACTION_COUNT)]
}

/// "+$12.50" for income and "-$12.50" for an expense.
pub(crate) fn format_signed_amount(transaction: &Transaction) -> String {
    let amount = format_currency(transaction.signed_amount());

    match transaction.type_ {
        TransactionType::Income => format!("+{amount}"),
        TransactionType::Expense => amount,
    }
}

fn recent_row(transaction: &Transaction) -> Markup {
    let (marker, amount_style) = match transaction.type_ {
        TransactionType::Income => ("↑", INCOME_TEXT_STYLE),
        TransactionType::Expense => ("↓", EXPENSE_TEXT_STYLE),
    };
    let description = transaction
        .description
        .as_deref()
        .unwrap_or(match transaction.type_ {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        });

    html! {
        li
            class="flex items-center justify-between gap-4 py-3"
            data-transaction-type=(transaction.type_.as_str())
        {
            div class="flex items-center gap-3"
            {
                span class={ "text-lg " (amount_style) } aria-hidden="true" { (marker) }

                div
                {
                    p class="font-medium" { (description) }

                    @if let Some(customer) = &transaction.customer {
                        p class="text-sm text-gray-500 dark:text-gray-400"
                        {
                            "Customer: " (customer.name)
                        }
                    }
                }
            }

            div class="text-right"
            {
                p class={ "font-semibold " (amount_style) } data-amount
                {
                    (format_signed_amount(transaction))
                }

                time
                    class="text-sm text-gray-500 dark:text-gray-400"
                    datetime=(transaction.date)
                {
                    (transaction.date)
                }
            }
        }
    }
}

/// The latest transactions, or a hint to add some when there are none.
pub(super) fn recent_panel_view(transactions: &[Transaction]) -> Markup {
    let recent = recent_transactions(transactions);

    html! {
        section id="recent-activity" class={ "mt-8 " (CARD_STYLE) }
        {
            h2 class="text-xl font-semibold mb-2" { "Recent activity" }

            @if recent.is_empty() {
                p class="text-gray-500 dark:text-gray-400" data-empty-state
                {
                    "No transactions yet. Add one from the Transactions tab."
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for transaction in recent {
                        (recent_row(transaction))
                    }
                }
            }
        }
    }
}
