//! # Dengue Form
//!
//! Headless controller for the dengue notification intake form.
//!
//! A rendering layer binds to:
//! - the [`Draft`]: field values, validity and touched state
//! - the busy flag while a submission is in flight
//! - the `submit`, `reset` and `test_api_connection` triggers
//! - a [`NoticeSink`] that receives transient notices
//!
//! The HTTP client is injected at construction; this crate never builds one itself.

#![warn(rust_2018_idioms)]

pub mod controller;
pub mod draft;
pub mod error;
pub mod notices;

pub use controller::{FormController, SubmitOutcome};
pub use draft::{Draft, FieldControl, FieldError};
pub use error::{FormError, FormResult};
pub use notices::{LogNotices, NoticeSink, RecordedNotices};
