//! Transactions: money that came in (income) or went out (expense).

mod core;
mod create_endpoint;
mod list_page;

pub use core::{
    Transaction, TransactionType, create_transaction, create_transaction_table, get_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use list_page::get_transactions_page;

#[cfg(test)]
pub use core::{TransactionCustomer, get_transaction};
