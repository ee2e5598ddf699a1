//! Shortly - a small URL shortener
//!
//! Links are stored once per url under a random short code. Following a
//! short code records a click and bumps the link's visit counter in a single
//! transaction. Link routes sit behind a cookie session.
//!
//! # Architecture
//! - `storage`: SeaORM-backed link, click and user stores (SQLite, PostgreSQL)
//! - `services`: link creation, redirect resolution, title fetching, accounts
//! - `api`: HTTP handlers, sessions and middleware
//! - `interfaces`: management CLI commands
//! - `config`: TOML + environment configuration
//! - `runtime`: startup, shutdown and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
