//! # Dengue Core
//!
//! Domain types for the dengue notification intake workflow.
//!
//! This crate contains pure data definitions and checks:
//! - The flat notification record and its field catalog
//! - Option lists for coded fields
//! - Draft values and date normalisation
//! - The API response envelope, health response and user account
//! - Transient notices and required-field validation
//!
//! **No transport concerns**: HTTP requests belong in `dengue-client`, the reference server in
//! `api-rest`, and the form workflow in `dengue-form`.

pub mod choices;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod health;
pub mod normalise;
pub mod notice;
pub mod record;
pub mod user;
pub mod validation;

pub use envelope::ApiEnvelope;
pub use error::{CoreError, CoreResult};
pub use health::HealthRes;
pub use normalise::FieldValue;
pub use notice::{Severity, TransientNotice};
pub use record::{FieldKind, FieldSpec, NotificationRecord, Section, FIELDS};
pub use user::{User, UserPatch};
