#![forbid(unsafe_code)]

//! `docfill` — template placeholder fulfillment server.
//!
//! A user uploads a document template, its placeholders are detected, and
//! they are filled either directly or through a conversational assistant
//! whose proposed values are staged for explicit accept/reject before they
//! touch authoritative session state.

pub mod assistant;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod session;
pub mod template;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
