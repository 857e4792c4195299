// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Stored login session and login/logout notifications.

use crate::models::User;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn(User),
    LoggedOut,
}

/// JSON file holding the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Read session at {}", self.path.display()))?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(s) if !s.token.is_empty() => Ok(Some(s)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!("ignoring unreadable session file: {}", e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)
            .with_context(|| format!("Write session at {}", self.path.display()))
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Remove session at {}", self.path.display()))?;
        }
        Ok(())
    }
}

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// The session handed to whatever talks to the backend.
pub struct SessionContext {
    store: SessionStore,
    current: Option<Session>,
    listeners: Vec<Listener>,
}

impl SessionContext {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            current: None,
            listeners: Vec::new(),
        }
    }

    pub fn load_at_startup(store: SessionStore) -> Result<Self> {
        let mut ctx = Self::new(store);
        ctx.current = ctx.store.load()?;
        if let Some(s) = &ctx.current {
            tracing::debug!(user = %s.user.name, "restored session");
        }
        Ok(ctx)
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn login(&mut self, session: Session) -> Result<()> {
        self.store.save(&session)?;
        let user = session.user.clone();
        self.current = Some(session);
        tracing::info!(user = %user.name, "logged in");
        self.notify(&SessionEvent::LoggedIn(user));
        Ok(())
    }

    /// Clears the stored session. Does nothing (and notifies no one) when
    /// already logged out.
    pub fn logout(&mut self) -> Result<()> {
        let was_logged_in = self.current.take().is_some();
        self.store.clear()?;
        if was_logged_in {
            tracing::info!("logged out");
            self.notify(&SessionEvent::LoggedOut);
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    fn notify(&mut self, event: &SessionEvent) {
        for l in self.listeners.iter_mut() {
            l(event);
        }
    }
}
