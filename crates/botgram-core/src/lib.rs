//! Identity-and-error core for Telegram-style bot API clients.
//!
//! This crate is intentionally transport-agnostic. HTTP, long polling and
//! the endpoint catalog live behind ports (traits) implemented in adapter
//! crates; what lives here is the part every adapter shares: how a chat is
//! addressed ([`ChatRef`]) and how a remote failure is understood
//! ([`ApiError`]).

pub mod api_error;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod ports;
pub mod response;
pub mod types;

pub use api_error::{classify, ApiError, ChatScope, StatusClass};
pub use domain::{ChatId, ChatRef};
pub use errors::{Error, Result};
