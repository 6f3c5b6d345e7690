//! Destinations for transient notices.

use dengue_core::{Severity, TransientNotice};
use std::sync::{Mutex, PoisonError};

/// Something that can display a [`TransientNotice`].
///
/// Implementations must be cheap and non-blocking: notices are emitted from the form's event
/// loop and from the background connection probe.
pub trait NoticeSink: Send + Sync {
    fn show(&self, notice: TransientNotice);
}

/// Writes notices to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotices;

impl NoticeSink for LogNotices {
    fn show(&self, notice: TransientNotice) {
        match notice.severity {
            Severity::Success => tracing::info!("{}", notice.message),
            Severity::Warning => tracing::warn!("{}", notice.message),
            Severity::Error => tracing::error!("{}", notice.message),
        }
    }
}

/// Keeps every notice in emission order.
#[derive(Debug, Default)]
pub struct RecordedNotices {
    notices: Mutex<Vec<TransientNotice>>,
}

impl RecordedNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<TransientNotice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<TransientNotice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl NoticeSink for RecordedNotices {
    fn show(&self, notice: TransientNotice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
