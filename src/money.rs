//! Amounts of money, counted in whole cents.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::Error;

/// An amount of money in cents.
///
/// Adding and subtracting cents is exact, so totals come out the same in any
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// The largest amount a single transaction may have, $999,999,999.99.
    pub const MAX_TRANSACTION_AMOUNT: Cents = Cents(99_999_999_999);

    #[cfg(test)]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Whether this is a valid amount for a single transaction.
    pub fn is_valid_transaction_amount(self) -> bool {
        Cents::ZERO < self && self <= Cents::MAX_TRANSACTION_AMOUNT
    }
}

impl FromStr for Cents {
    type Err = Error;

    /// Parse a dollar amount such as "12", "12.5" or "12.50".
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `text` is not a decimal number or has
    /// a non-zero digit past the cents.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidAmount(text.to_owned());

        let dollars = Decimal::from_str(text.trim()).map_err(|_| invalid())?;

        if dollars.normalize().scale() > 2 {
            return Err(invalid());
        }

        dollars
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Cents)
            .ok_or_else(invalid)
    }
}

/// Plain dollars with two decimals, e.g. "1234.50" or "-3.00".
impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();

        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Cents;

    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0 - rhs.0)
    }
}

impl Neg for Cents {
    type Output = Cents;

    fn neg(self) -> Cents {
        Cents(-self.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}

impl ToSql for Cents {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Cents {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Cents)
    }
}
