//! # Dengue Client
//!
//! Thin HTTP client for the dengue notification API.
//!
//! Handles:
//! - URL and header construction for the notification, user and health routes
//! - JSON encoding of request bodies and decoding of response envelopes
//! - Normalisation of every failure into [`ApiError`]
//!
//! Uses `dengue-core` for the wire types.

#![warn(rust_2018_idioms)]

pub mod client;
pub mod config;
pub mod error;

pub use client::NotificationClient;
pub use config::{timeout_from_env_value, ClientConfig, ConfigError};
pub use error::{ApiError, ApiResult};
