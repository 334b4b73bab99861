//! Totals shown on the dashboard cards.

use crate::{
    money::Cents,
    transaction::{Transaction, TransactionType},
};

/// Income and expense totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionStats {
    pub total_income: Cents,
    pub total_expense: Cents,
    /// Income minus expense.
    pub balance: Cents,
}

impl TransactionStats {
    /// Sum the amounts of `transactions` by type.
    ///
    /// The result does not depend on the order of `transactions`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (total_income, total_expense) =
            transactions
                .iter()
                .fold((Cents::ZERO, Cents::ZERO), |(income, expense), transaction| {
                    match transaction.type_ {
                        TransactionType::Income => (income + transaction.amount, expense),
                        TransactionType::Expense => (income, expense + transaction.amount),
                    }
                });

        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}
