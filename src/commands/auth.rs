// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::Backend;
use crate::forms::{LoginForm, SignupForm};
use crate::session::SessionContext;
use anyhow::{Context, Result};

pub fn handle<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => login(backend, session, sub)?,
        Some(("signup", sub)) => signup(backend, session, sub)?,
        Some(("logout", _)) => {
            if !session.is_authenticated() {
                println!("Not logged in");
            }
            session.logout()?;
        }
        Some(("whoami", _)) => match session.user() {
            Some(u) => match &u.email {
                Some(email) => println!("{} <{}>", u.name, email),
                None => println!("{}", u.name),
            },
            None => println!("Not logged in"),
        },
        _ => {}
    }
    Ok(())
}

fn arg(sub: &clap::ArgMatches, name: &str) -> String {
    sub.get_one::<String>(name).cloned().unwrap_or_default()
}

fn login<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let form = LoginForm {
        email: arg(sub, "email"),
        password: arg(sub, "password"),
    };
    form.validate()?;
    let s = backend
        .login(form.email.trim(), &form.password)
        .context("Login failed")?;
    let name = s.user.name.clone();
    session.login(s)?;
    println!("Welcome back, {}", name);
    Ok(())
}

fn signup<B: Backend>(
    backend: B,
    session: &mut SessionContext,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let form = SignupForm {
        name: arg(sub, "name"),
        email: arg(sub, "email"),
        password: arg(sub, "password"),
        confirm_password: arg(sub, "confirm-password"),
    };
    form.validate()?;
    backend
        .signup(form.name.trim(), form.email.trim(), &form.password)
        .context("Signup failed")?;
    // A fresh account always starts from the login step.
    session.logout()?;
    println!("Account created! Please log in.");
    Ok(())
}
