mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::{client_for, serve_hung, serve_json, TestApi};
use dengue_core::constants::{
    MSG_API_CONNECTED, MSG_API_UNREACHABLE, MSG_FORM_CLEARED, MSG_REQUIRED_MISSING,
    MSG_SUBMIT_FAILED, MSG_SUBMIT_OK,
};
use dengue_core::normalise::FieldValue;
use dengue_core::{Severity, TransientNotice};
use dengue_form::{FormController, FormError, NoticeSink, RecordedNotices, SubmitOutcome};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn fill_required(form: &mut FormController) {
    let draft = form.draft_mut();
    draft.set("tp_not", "2").unwrap();
    draft
        .set("dt_notific", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        .unwrap();
    draft.set("sg_uf_not", "SP").unwrap();
    draft.set("cs_sexo", "M").unwrap();
}

/// Build a controller and wait for its connection probe, so later notices arrive in order.
async fn start(
    client: dengue_client::NotificationClient,
) -> (FormController, Arc<RecordedNotices>, bool) {
    let notices = Arc::new(RecordedNotices::new());
    let sink: Arc<dyn NoticeSink> = notices.clone();
    let (form, probe) = FormController::initialize(client, sink);
    let connected = probe.await.expect("probe task");
    (form, notices, connected)
}

#[tokio::test]
async fn initialize_reports_a_reachable_api() {
    let api = TestApi::start().await;
    let (form, notices, connected) = start(api.client()).await;

    assert!(connected);
    assert_eq!(
        notices.take(),
        vec![TransientNotice::success(MSG_API_CONNECTED)]
    );
    assert!(!form.is_loading());
    assert!(!form.is_valid());
    assert!(form.draft().controls().all(|c| c.value().is_empty()));
}

#[tokio::test]
async fn any_json_health_body_counts_as_connected() {
    let base = serve_json(StatusCode::OK, json!({ "status": 1 })).await;
    let (_form, notices, connected) = start(client_for(&base)).await;

    assert!(connected);
    assert_eq!(
        notices.take(),
        vec![TransientNotice::success(MSG_API_CONNECTED)]
    );
}

#[tokio::test]
async fn invalid_submit_never_reaches_the_network() {
    let api = TestApi::start().await;
    let (mut form, notices, _) = start(api.client()).await;
    notices.take();
    let before = api.requests();

    let outcome = form.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected(FormError::MissingRequired(ref missing)) if missing.len() == 4
    ));
    assert_eq!(api.requests(), before);
    assert!(form.draft().controls().all(|c| c.is_touched()));
    assert!(form.draft().control("tp_not").unwrap().shows_error());
    assert_eq!(
        notices.take(),
        vec![TransientNotice::warning(MSG_REQUIRED_MISSING)]
    );
    assert!(!form.is_loading());
}

#[tokio::test]
async fn successful_submit_stores_normalised_record_and_resets() {
    let api = TestApi::start().await;
    let (mut form, notices, _) = start(api.client()).await;
    notices.take();

    fill_required(&mut form);
    form.draft_mut().set("febre", "1").unwrap();
    assert!(form.is_valid());

    let outcome = form.submit().await;
    let SubmitOutcome::Created(envelope) = outcome else {
        panic!("expected created, got {outcome:?}");
    };
    assert_eq!(envelope.data.and_then(|r| r.id), Some(1));

    let stored = api.state.store.list_notifications();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].dt_notific.as_deref(), Some("2025-01-01"));
    assert_eq!(stored[0].febre.as_deref(), Some("1"));
    assert_eq!(stored[0].mialgia, None);

    assert_eq!(notices.take(), vec![TransientNotice::success(MSG_SUBMIT_OK)]);
    assert!(form.draft().controls().all(|c| c.value().is_empty() && !c.is_touched()));
    assert!(!form.is_loading());
}

#[tokio::test]
async fn server_failure_keeps_the_draft() {
    let base = serve_json(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "success": false, "message": "db unavailable" }),
    )
    .await;
    let (mut form, notices, connected) = start(client_for(&base)).await;
    assert!(!connected);
    notices.take();

    fill_required(&mut form);
    let before = form.draft().clone();

    let outcome = form.submit().await;
    let SubmitOutcome::Failed(err) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(err.to_string(), "db unavailable");
    assert_eq!(err.status(), Some(500));
    assert_eq!(form.draft(), &before);
    assert!(!form.is_loading());

    let emitted = notices.take();
    assert_eq!(emitted, vec![TransientNotice::error(MSG_SUBMIT_FAILED)]);
    assert_eq!(emitted[0].severity, Severity::Error);
}

#[tokio::test]
async fn unreachable_api_does_not_block_editing() {
    let (mut form, notices, connected) = start(client_for("http://127.0.0.1:1/api")).await;

    assert!(!connected);
    assert_eq!(
        notices.take(),
        vec![TransientNotice::error(MSG_API_UNREACHABLE)]
    );

    fill_required(&mut form);
    assert!(form.is_valid());

    let outcome = form.submit().await;
    let SubmitOutcome::Failed(err) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(err.to_string().starts_with("Erro: "));
    assert_eq!(
        form.draft().value("sg_uf_not"),
        Some(&FieldValue::Text("SP".into()))
    );
}

#[tokio::test]
async fn second_submit_is_refused_while_one_is_pending() {
    let api = TestApi::start().await;
    let (mut form, notices, _) = start(api.client()).await;
    notices.take();
    fill_required(&mut form);

    let record = form.begin_submit().expect("first submit starts");
    assert!(form.is_loading());
    assert_eq!(record.dt_notific.as_deref(), Some("2025-01-01"));

    assert_eq!(form.begin_submit(), Err(FormError::SubmissionInFlight));
    assert_eq!(api.requests(), 1);

    let sent = api.client().create(&record).await;
    assert!(form.finish_submit(sent).is_created());
    assert!(!form.is_loading());
    assert_eq!(api.state.store.list_notifications().len(), 1);
    assert_eq!(notices.take(), vec![TransientNotice::success(MSG_SUBMIT_OK)]);
}

#[tokio::test]
async fn reset_clears_values_and_announces_it() {
    let api = TestApi::start().await;
    let (mut form, notices, _) = start(api.client()).await;
    notices.take();

    fill_required(&mut form);
    form.draft_mut().mark_all_touched();
    form.reset();

    assert!(form.draft().controls().all(|c| c.value().is_empty() && !c.is_touched()));
    assert_eq!(
        notices.take(),
        vec![TransientNotice::success(MSG_FORM_CLEARED)]
    );
}

#[tokio::test]
async fn test_api_connection_can_be_retried() {
    let api = TestApi::start().await;
    let (form, notices, _) = start(api.client()).await;
    notices.take();

    assert!(form.test_api_connection().await.expect("probe task"));
    assert_eq!(api.requests(), 2);
    assert_eq!(
        notices.take(),
        vec![TransientNotice::success(MSG_API_CONNECTED)]
    );
}

#[tokio::test]
async fn abandoned_submit_leaves_the_form_usable() {
    let base = serve_hung().await;
    let notices: Arc<dyn NoticeSink> = Arc::new(RecordedNotices::new());
    let (mut form, _probe) = FormController::initialize(client_for(&base), notices);
    fill_required(&mut form);
    let before = form.draft().clone();

    let abandoned = tokio::time::timeout(Duration::from_millis(200), form.submit()).await;

    assert!(abandoned.is_err());
    assert!(!form.is_loading());
    assert_eq!(form.draft(), &before);
    assert!(form.begin_submit().is_ok());
}

#[tokio::test]
async fn reset_abandons_an_unfinished_submission() {
    let api = TestApi::start().await;
    let (mut form, _notices, _) = start(api.client()).await;
    fill_required(&mut form);

    form.begin_submit().expect("first submit starts");
    assert!(form.is_loading());

    form.reset();
    assert!(!form.is_loading());

    fill_required(&mut form);
    assert!(form.begin_submit().is_ok());
}
