//! Staff and patient registry server.
//!
//! IT staff register themselves, onboard nurses and grant them access.
//! Nurses and IT staff record patients and their medical records. Every list
//! endpoint is served through [`db::query::QueryComposer`], which turns a
//! search request into SQL whose values travel only as bound parameters.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
