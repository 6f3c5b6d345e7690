//! Submit, reset and connection-probe workflow around a [`Draft`].
//!
//! The controller is driven from a single event loop: every state change goes through
//! `&mut self`, so the draft and the busy flag need no locking. The connection probe is the
//! only work that runs concurrently, and it touches nothing but the notice sink.

use crate::draft::Draft;
use crate::error::{FormError, FormResult};
use crate::notices::NoticeSink;
use dengue_client::{ApiError, ApiResult, NotificationClient};
use dengue_core::constants::{
    MSG_API_CONNECTED, MSG_API_UNREACHABLE, MSG_FORM_CLEARED, MSG_REQUIRED_MISSING,
    MSG_SUBMIT_FAILED, MSG_SUBMIT_OK,
};
use dengue_core::{ApiEnvelope, NotificationRecord, TransientNotice};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// How a submit attempt ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent.
    Rejected(FormError),
    /// The server accepted the notification; the draft has been reset.
    Created(ApiEnvelope<NotificationRecord>),
    /// The request failed; the draft is unchanged.
    Failed(ApiError),
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }
}

pub struct FormController {
    client: NotificationClient,
    notices: Arc<dyn NoticeSink>,
    draft: Draft,
    is_loading: bool,
}

impl FormController {
    /// Create a controller with an empty draft and start the connection probe.
    ///
    /// The probe runs in the background and reports through `notices`; its result never
    /// affects validity or blocks [`submit`](Self::submit). The returned handle resolves to
    /// whether the API answered.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn initialize(
        client: NotificationClient,
        notices: Arc<dyn NoticeSink>,
    ) -> (Self, JoinHandle<bool>) {
        let controller = Self {
            client,
            notices,
            draft: Draft::empty(),
            is_loading: false,
        };
        let probe = controller.test_api_connection();
        (controller, probe)
    }

    /// Probe the API again, reporting the result as a notice.
    pub fn test_api_connection(&self) -> JoinHandle<bool> {
        tokio::spawn(probe_connection(
            self.client.clone(),
            Arc::clone(&self.notices),
        ))
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// `true` while a submission is waiting for the server.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_valid(&self) -> bool {
        self.draft.is_valid()
    }

    /// Validate and normalise the draft, then run the request.
    ///
    /// Dropping the returned future before it completes (e.g. under a timeout) clears the busy
    /// flag and leaves the draft untouched, so the form can be submitted again.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let record = match self.begin_submit() {
            Ok(record) => record,
            Err(reason) => return SubmitOutcome::Rejected(reason),
        };
        let result = {
            let _busy = BusyGuard(&mut self.is_loading);
            self.client.create(&record).await
        };
        self.finish_submit(result)
    }

    /// First half of [`submit`](Self::submit), for renderers that drive the request
    /// themselves and want to draw the busy state in between.
    ///
    /// On success the busy flag is set and the normalised record is returned; pass the
    /// outcome of sending it to [`finish_submit`](Self::finish_submit).
    ///
    /// # Errors
    ///
    /// - [`FormError::SubmissionInFlight`] if an earlier submission has not finished.
    /// - [`FormError::MissingRequired`] if a required field is empty. Every field is marked
    ///   touched and a warning notice is emitted.
    pub fn begin_submit(&mut self) -> FormResult<NotificationRecord> {
        if self.is_loading {
            tracing::warn!("submit ignored: a submission is already in progress");
            return Err(FormError::SubmissionInFlight);
        }

        let missing = self.draft.missing_required();
        if !missing.is_empty() {
            tracing::debug!("form invalid, missing: {}", missing.join(", "));
            self.draft.mark_all_touched();
            self.notify(TransientNotice::warning(MSG_REQUIRED_MISSING));
            return Err(FormError::MissingRequired(missing));
        }

        self.is_loading = true;
        Ok(self.draft.to_record())
    }

    /// Second half of [`submit`](Self::submit): clear the busy flag and report the result.
    ///
    /// A successful response resets the draft; a failure leaves it exactly as entered.
    pub fn finish_submit(
        &mut self,
        result: ApiResult<ApiEnvelope<NotificationRecord>>,
    ) -> SubmitOutcome {
        self.is_loading = false;
        match result {
            Ok(envelope) => {
                tracing::info!(
                    id = ?envelope.data.as_ref().and_then(|record| record.id),
                    "notification created"
                );
                self.notify(TransientNotice::success(MSG_SUBMIT_OK));
                self.draft = Draft::empty();
                SubmitOutcome::Created(envelope)
            }
            Err(err) => {
                tracing::error!("failed to submit notification: {err}");
                self.notify(TransientNotice::error(MSG_SUBMIT_FAILED));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Discard the draft and start over.
    ///
    /// Also clears the busy flag, abandoning any submission begun with
    /// [`begin_submit`](Self::begin_submit) that was never finished.
    pub fn reset(&mut self) {
        self.is_loading = false;
        self.draft = Draft::empty();
        self.notify(TransientNotice::success(MSG_FORM_CLEARED));
    }

    fn notify(&self, notice: TransientNotice) {
        self.notices.show(notice);
    }
}

/// Clears the busy flag when dropped, including when the owning future is cancelled.
struct BusyGuard<'a>(&'a mut bool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

async fn probe_connection(client: NotificationClient, notices: Arc<dyn NoticeSink>) -> bool {
    match client.health_check().await {
        Ok(health) => {
            match health.get("status") {
                Some(status) => tracing::info!(%status, "API connection established"),
                None => tracing::info!("API connection established"),
            }
            notices.show(TransientNotice::success(MSG_API_CONNECTED));
            true
        }
        Err(err) => {
            tracing::error!("failed to connect to API: {err}");
            notices.show(TransientNotice::error(MSG_API_UNREACHABLE));
            false
        }
    }
}
