// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use budgetrack::api::{ApiError, ApiResult, Backend};
use budgetrack::models::{Category, NewTransaction, Transaction, TransactionType, User};
use budgetrack::money::Money;
use budgetrack::session::Session;
use chrono::NaiveDate;
use std::cell::{Cell, RefCell};

pub fn tx(id: i64, kind: TransactionType, amount: &str, category: &str, date: &str) -> Transaction {
    Transaction {
        id,
        amount: Money::new(amount.parse().unwrap()).unwrap(),
        transaction_type: kind,
        category: category.to_string(),
        description: None,
        date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()),
    }
}

/// The three-record scenario: two January records and one in February.
pub fn sample() -> Vec<Transaction> {
    vec![
        tx(1, TransactionType::Income, "100", "Salary", "2024-01-05"),
        tx(2, TransactionType::Expense, "40", "Food", "2024-01-06"),
        tx(3, TransactionType::Expense, "10", "Travel", "2024-02-01"),
    ]
}

/// In-memory backend. `fail_next` makes the next call return that error;
/// `fail_list` does the same for the next list call only.
#[derive(Default)]
pub struct FakeBackend {
    pub rows: RefCell<Vec<Transaction>>,
    pub fail_next: RefCell<Option<ApiError>>,
    pub fail_list: RefCell<Option<ApiError>>,
    pub list_calls: Cell<usize>,
    pub next_id: Cell<i64>,
    pub categories: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn with(rows: Vec<Transaction>) -> Self {
        let next = rows.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            rows: RefCell::new(rows),
            next_id: Cell::new(next),
            ..Default::default()
        }
    }

    pub fn fail_with(&self, e: ApiError) {
        *self.fail_next.borrow_mut() = Some(e);
    }

    pub fn fail_list_with(&self, e: ApiError) {
        *self.fail_list.borrow_mut() = Some(e);
    }

    fn check(&self) -> ApiResult<()> {
        match self.fail_next.borrow_mut().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn not_found(id: i64) -> ApiError {
        ApiError::Status {
            status: 404,
            message: format!("Transaction {} not found", id),
        }
    }
}

impl Backend for FakeBackend {
    fn list_transactions(&self) -> ApiResult<Vec<Transaction>> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.check()?;
        if let Some(e) = self.fail_list.borrow_mut().take() {
            return Err(e);
        }
        Ok(self.rows.borrow().clone())
    }

    fn get_transaction(&self, id: i64) -> ApiResult<Transaction> {
        self.check()?;
        self.rows
            .borrow()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    fn create_transaction(&self, tx: &NewTransaction) -> ApiResult<Transaction> {
        self.check()?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = tx.clone().into_transaction(id);
        self.rows.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_transaction(&self, id: i64, tx: &NewTransaction) -> ApiResult<Transaction> {
        self.check()?;
        let mut rows = self.rows.borrow_mut();
        let slot = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        *slot = tx.clone().into_transaction(id);
        Ok(slot.clone())
    }

    fn delete_transaction(&self, id: i64) -> ApiResult<()> {
        self.check()?;
        let mut rows = self.rows.borrow_mut();
        let pos = rows
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        rows.remove(pos);
        Ok(())
    }

    fn create_category(&self, name: &str) -> ApiResult<Category> {
        self.check()?;
        self.categories.borrow_mut().push(name.to_string());
        Ok(Category {
            id: Some(self.categories.borrow().len() as i64),
            name: name.to_string(),
        })
    }

    fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.check()?;
        if password != "secret1" {
            return Err(ApiError::Status {
                status: 400,
                message: "Invalid credentials".into(),
            });
        }
        Ok(Session {
            token: "tok-123".into(),
            user: User {
                id: Some(7),
                name: "Asha".into(),
                email: Some(email.to_string()),
            },
        })
    }

    fn signup(&self, _name: &str, _email: &str, _password: &str) -> ApiResult<()> {
        self.check()
    }
}

pub fn session_in(dir: &std::path::Path) -> budgetrack::session::SessionContext {
    budgetrack::session::SessionContext::new(budgetrack::session::SessionStore::new(
        dir.join("session.json"),
    ))
}

pub fn logged_in(dir: &std::path::Path) -> budgetrack::session::SessionContext {
    let mut s = session_in(dir);
    s.login(Session {
        token: "tok-123".into(),
        user: User {
            id: Some(7),
            name: "Asha".into(),
            email: None,
        },
    })
    .unwrap();
    s
}
