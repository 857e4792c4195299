// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod forms;
pub mod logging;
pub mod models;
pub mod money;
pub mod session;
pub mod utils;
