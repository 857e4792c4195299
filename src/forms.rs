// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local validation of user input before anything is sent to the backend.

use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::money::Money;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Raw transaction fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub transaction_type: String,
    pub category: String,
    pub new_category: String,
    pub description: String,
    pub date: String,
}

impl TransactionForm {
    /// Pre-filled form for editing an existing record.
    pub fn from_transaction(t: &Transaction) -> Self {
        Self {
            amount: t.amount.to_string(),
            transaction_type: t.transaction_type.to_string(),
            category: t.category.clone(),
            new_category: String::new(),
            description: t.description.clone().unwrap_or_default(),
            date: t.date.map(|d| d.to_string()).unwrap_or_default(),
        }
    }

    /// A typed-in new category takes precedence over the selected one.
    pub fn effective_category(&self) -> Option<String> {
        let typed = self.new_category.trim();
        if !typed.is_empty() {
            return Some(typed.to_string());
        }
        let selected = self.category.trim();
        (!selected.is_empty()).then(|| selected.to_string())
    }

    pub fn validate(&self) -> Result<NewTransaction, FieldErrors> {
        self.validate_with(None)
    }

    /// Validate an edit of `original`. An amount left as pre-filled is kept
    /// as stored, so records the backend holds at zero can still be edited.
    pub fn validate_edit(&self, original: &Transaction) -> Result<NewTransaction, FieldErrors> {
        let unchanged = self.amount.trim() == original.amount.to_string();
        self.validate_with(unchanged.then_some(original.amount))
    }

    fn validate_with(&self, kept_amount: Option<Money>) -> Result<NewTransaction, FieldErrors> {
        let mut errors = FieldErrors::default();

        let amount = match kept_amount {
            Some(m) => Some(m),
            None => Money::parse(&self.amount)
                .map_err(|e| errors.add("amount", e.to_string()))
                .ok(),
        };

        let transaction_type = self
            .transaction_type
            .parse::<TransactionType>()
            .map_err(|e| errors.add("transaction_type", e))
            .ok();

        let category = self.effective_category();
        if category.is_none() {
            errors.add("category", "Please select or type a category");
        }

        let date = match self.date.trim() {
            "" => {
                errors.add("date", "Date is required.");
                None
            }
            s => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| {
                    errors.add("date", format!("Invalid date '{}', expected YYYY-MM-DD", s))
                })
                .ok(),
        };

        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        match (amount, transaction_type, category, date) {
            (Some(amount), Some(transaction_type), Some(category), Some(date)) => {
                Ok(NewTransaction {
                    amount,
                    transaction_type,
                    category,
                    description,
                    date,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required.");
        }
        if self.email.trim().is_empty() {
            errors.add("email", "Email is required.");
        } else if !EMAIL_RE.is_match(self.email.trim()) {
            errors.add("email", "Invalid email address.");
        }
        if self.password.is_empty() {
            errors.add("password", "Password is required.");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {} characters.", MIN_PASSWORD_LEN),
            );
        }
        if self.confirm_password.is_empty() {
            errors.add("confirm_password", "Please confirm your password.");
        } else if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match.");
        }
        errors.into_result(|| ())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.email.trim().is_empty() {
            errors.add("email", "Email is required.");
        }
        if self.password.is_empty() {
            errors.add("password", "Password is required.");
        }
        errors.into_result(|| ())
    }
}

pub fn validate_category_name(name: &str) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::default();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        errors.add("name", "Category name is required.");
    }
    errors.into_result(|| trimmed.to_string())
}
