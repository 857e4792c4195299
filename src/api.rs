// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, NewTransaction, Transaction, User};
use crate::session::{Session, SessionContext};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

const UA: &str = concat!("budgetrack/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Session expired or invalid, please log in again")]
    Unauthorized,
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Could not reach backend: {0}")]
    Transport(String),
    #[error("Unexpected response from backend: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything the client needs from the budget backend.
pub trait Backend {
    fn list_transactions(&self) -> ApiResult<Vec<Transaction>>;
    fn get_transaction(&self, id: i64) -> ApiResult<Transaction>;
    fn create_transaction(&self, tx: &NewTransaction) -> ApiResult<Transaction>;
    fn update_transaction(&self, id: i64, tx: &NewTransaction) -> ApiResult<Transaction>;
    fn delete_transaction(&self, id: i64) -> ApiResult<()>;
    fn create_category(&self, name: &str) -> ApiResult<Category>;
    fn login(&self, email: &str, password: &str) -> ApiResult<Session>;
    fn signup(&self, name: &str, email: &str, password: &str) -> ApiResult<()>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn list_transactions(&self) -> ApiResult<Vec<Transaction>> {
        (**self).list_transactions()
    }
    fn get_transaction(&self, id: i64) -> ApiResult<Transaction> {
        (**self).get_transaction(id)
    }
    fn create_transaction(&self, tx: &NewTransaction) -> ApiResult<Transaction> {
        (**self).create_transaction(tx)
    }
    fn update_transaction(&self, id: i64, tx: &NewTransaction) -> ApiResult<Transaction> {
        (**self).update_transaction(id, tx)
    }
    fn delete_transaction(&self, id: i64) -> ApiResult<()> {
        (**self).delete_transaction(id)
    }
    fn create_category(&self, name: &str) -> ApiResult<Category> {
        (**self).create_category(name)
    }
    fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        (**self).login(email, password)
    }
    fn signup(&self, name: &str, email: &str, password: &str) -> ApiResult<()> {
        (**self).signup(name, email, password)
    }
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent(UA)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let req = self.authed(req);
        let resp = req.send().map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        tracing::debug!(status = status.as_u16(), url = %resp.url(), "backend response");
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }
        Ok(resp)
    }

    fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ApiResult<T> {
        let resp = self.send(req)?;
        resp.json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull the human-readable message out of an error body, if it has one.
pub fn error_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message", "msg"]
        .iter()
        .find_map(|k| v.get(*k).and_then(|m| m.as_str()))
        .map(|s| s.to_string())
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
    user: User,
}

impl Backend for ApiClient {
    fn list_transactions(&self) -> ApiResult<Vec<Transaction>> {
        tracing::info!("fetching transactions");
        self.send_json(self.http.get(self.url("/transactions")))
    }

    fn get_transaction(&self, id: i64) -> ApiResult<Transaction> {
        self.send_json(self.http.get(self.url(&format!("/transactions/{}", id))))
    }

    fn create_transaction(&self, tx: &NewTransaction) -> ApiResult<Transaction> {
        tracing::info!(category = %tx.category, "creating transaction");
        self.send_json(self.http.post(self.url("/transactions")).json(tx))
    }

    fn update_transaction(&self, id: i64, tx: &NewTransaction) -> ApiResult<Transaction> {
        tracing::info!(id, "updating transaction");
        self.send_json(
            self.http
                .put(self.url(&format!("/transactions/{}", id)))
                .json(tx),
        )
    }

    fn delete_transaction(&self, id: i64) -> ApiResult<()> {
        tracing::info!(id, "deleting transaction");
        self.send(self.http.delete(self.url(&format!("/transactions/{}", id))))?;
        Ok(())
    }

    fn create_category(&self, name: &str) -> ApiResult<Category> {
        self.send_json(
            self.http
                .post(self.url("/categories"))
                .json(&json!({ "name": name })),
        )
    }

    fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let resp: LoginResponse = self.send_json(
            self.http
                .post(self.url("/auth/login"))
                .json(&json!({ "email": email, "password": password })),
        )?;
        Ok(Session {
            token: resp.access_token,
            user: resp.user,
        })
    }

    fn signup(&self, name: &str, email: &str, password: &str) -> ApiResult<()> {
        self.send(self.http.post(self.url("/auth/signup")).json(&json!({
            "name": name,
            "email": email,
            "password": password,
            "confirm_password": password,
        })))?;
        Ok(())
    }
}

/// Drop the stored session when the backend rejects our token.
pub fn check_auth<T>(result: ApiResult<T>, session: &mut SessionContext) -> ApiResult<T> {
    if let Err(e) = &result {
        if e.is_unauthorized() {
            tracing::warn!("backend rejected token, clearing session");
            if let Err(clear_err) = session.logout() {
                tracing::error!("failed to clear session: {:#}", clear_err);
            }
        }
    }
    result
}
