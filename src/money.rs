// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A non-negative currency amount.
///
/// User input goes through [`Money::parse`], which is the only place amount
/// text is validated. Values decoded from the backend only have to be
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Amount is required.")]
    Empty,
    #[error("Invalid amount '{0}'")]
    NotNumeric(String),
    #[error("Amount must be greater than zero.")]
    NotPositive,
    #[error("Amount cannot be negative (got {0})")]
    Negative(Decimal),
}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Parse an amount typed by the user. Rejects blank, non-numeric, zero and
    /// negative input.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(MoneyError::Empty);
        }
        let d = Decimal::from_str(s).map_err(|_| MoneyError::NotNumeric(s.to_string()))?;
        if d <= Decimal::ZERO {
            return Err(MoneyError::NotPositive);
        }
        Ok(Money(d))
    }

    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Money(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Two decimal places, for cards and tables.
    pub fn to_currency_string(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let d = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::new(d).map_err(serde::de::Error::custom)
    }
}
