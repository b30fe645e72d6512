//! End-to-end workflow tests: submit, review, resolve, notify, project.

use gad_test_utils::{
    harness, harness_with_capacity, provider_dizon, provider_reyes, reviewer_santos, staged_xlsx,
};
use gad_workflow::projection::notification_inbox;
use gad_workflow::{
    BusEvent, StagingArea, SubmissionStatus, APPROVED_TITLE, DENIED_TITLE, NEW_SUBMISSION_TITLE,
    UNREVIEWED,
};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn submit_batch_creates_matching_records_blobs_and_notifications() {
    let h = harness().await;
    let provider = provider_reyes();
    let batch = vec![
        staged_xlsx("vaw_cases_q1.xlsx", 1_500),
        staged_xlsx("vaw_cases_q2.xlsx", 2_500),
        staged_xlsx("vaw_cases_q3.xlsx", 3_500),
    ];

    let records = h.engine.submit(batch, &provider).await.unwrap();
    assert_eq!(records.len(), 3);

    let listed = h.registry.list().await.unwrap();
    assert_eq!(listed.len(), 3);
    for record in &listed {
        assert_eq!(record.status, SubmissionStatus::Pending);
        assert_eq!(record.reviewed_by, UNREVIEWED);
        assert_eq!(record.submitted_by, "A. Reyes");
        assert!(record.is_stored_locally);
        assert!(h.blobs.contains(&record.id).await.unwrap());
    }

    let notes = h.bus.list().await.unwrap();
    assert_eq!(notes.len(), 3);
    assert!(notes.iter().all(|n| n.title == NEW_SUBMISSION_TITLE));
    assert!(notes.iter().all(|n| n.department == "CPDSO"));
}

#[tokio::test]
async fn batch_records_keep_upload_order_at_the_front() {
    let h = harness().await;
    let provider = provider_reyes();

    h.engine
        .submit(vec![staged_xlsx("earlier.xlsx", 10)], &provider)
        .await
        .unwrap();
    h.engine
        .submit(
            vec![
                staged_xlsx("first.xlsx", 10),
                staged_xlsx("second.xlsx", 10),
                staged_xlsx("third.xlsx", 10),
            ],
            &provider,
        )
        .await
        .unwrap();

    let names: Vec<String> = h
        .registry
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.form_name)
        .collect();
    assert_eq!(
        names,
        vec!["first.xlsx", "second.xlsx", "third.xlsx", "earlier.xlsx"]
    );
}

#[tokio::test]
async fn submitted_record_round_trips_byte_for_byte() {
    let h = harness().await;
    let submitted = h
        .engine
        .submit(vec![staged_xlsx("budget_2025.xlsx", 2_202_010)], &provider_reyes())
        .await
        .unwrap()
        .remove(0);

    assert_eq!(submitted.file_size, "2.1 MB");

    let listed = h.registry.find(&submitted.id).await.unwrap().unwrap();
    assert_eq!(listed, submitted);

    let blob = h.blobs.get(&submitted.id).await.unwrap().unwrap();
    assert_eq!(blob.name, "budget_2025.xlsx");
    assert_eq!(blob.size, 2_202_010);
}

#[tokio::test]
async fn approving_resolves_the_record_and_notifies_the_office() {
    let h = harness().await;
    let record = h
        .engine
        .submit(vec![staged_xlsx("plan.xlsx", 900)], &provider_reyes())
        .await
        .unwrap()
        .remove(0);
    let reviewer = reviewer_santos();

    let approved = h.engine.approve(&record.id, &reviewer).await.unwrap();
    assert_eq!(approved.status, SubmissionStatus::Approved);
    assert_eq!(approved.reviewed_by, "R. Santos");
    assert_eq!(approved.reviewer_remarks, None);

    let resolutions: Vec<_> = h
        .bus
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|n| n.title == APPROVED_TITLE)
        .collect();
    assert_eq!(resolutions.len(), 1);
    assert!(resolutions[0].message.contains("plan.xlsx"));
    assert!(resolutions[0].message.contains("R. Santos"));
    assert_eq!(resolutions[0].department, "CPDSO");
}

#[tokio::test]
async fn reyes_denial_scenario() {
    // Provider A. Reyes (CPDSO) submits budget_2025.xlsx (2.1 MB); the
    // reviewer denies it with remarks "Wrong fiscal year".
    let h = harness().await;
    let record = h
        .engine
        .submit(vec![staged_xlsx("budget_2025.xlsx", 2_202_010)], &provider_reyes())
        .await
        .unwrap()
        .remove(0);

    assert_eq!(record.form_name, "budget_2025.xlsx");
    assert_eq!(record.office, "CPDSO");
    assert_eq!(record.status, SubmissionStatus::Pending);
    assert_eq!(record.reviewed_by, UNREVIEWED);

    let denied = h
        .engine
        .deny(&record.id, &reviewer_santos(), "Wrong fiscal year")
        .await
        .unwrap();
    assert_eq!(denied.status, SubmissionStatus::Denied);
    assert_eq!(denied.reviewed_by, "R. Santos");
    assert_eq!(denied.reviewer_remarks.as_deref(), Some("Wrong fiscal year"));

    let resolution = h
        .bus
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|n| n.title == DENIED_TITLE)
        .unwrap();
    assert_eq!(resolution.department, "CPDSO");
    assert!(resolution.message.contains("budget_2025.xlsx"));
    assert!(resolution.message.contains("Wrong fiscal year"));

    // The provider's inbox surfaces the resolution.
    let inbox = notification_inbox(h.bus.list().await.unwrap(), &provider_reyes());
    assert!(inbox.iter().any(|n| n.title == DENIED_TITLE));
}

#[tokio::test]
async fn each_office_sees_its_own_history_but_the_queue_sees_all() {
    let h = harness().await;
    let reyes = provider_reyes();
    let dizon = provider_dizon();

    h.engine
        .submit(vec![staged_xlsx("cpdso_data.xlsx", 100)], &reyes)
        .await
        .unwrap();
    h.engine
        .submit(vec![staged_xlsx("cho_data.xlsx", 100)], &dizon)
        .await
        .unwrap();

    let reyes_history = h.views.history(&reyes).await.unwrap();
    assert_eq!(reyes_history.len(), 1);
    assert_eq!(reyes_history[0].office, "CPDSO");

    let dizon_history = h.views.history(&dizon).await.unwrap();
    assert_eq!(dizon_history.len(), 1);
    assert_eq!(dizon_history[0].office, "CHO");

    let queue = h.views.approval_queue().await.unwrap();
    assert_eq!(queue.len(), 2);
}

#[tokio::test]
async fn retrieval_catalog_lists_approved_records_only() {
    let h = harness().await;
    let reviewer = reviewer_santos();
    let records = h
        .engine
        .submit(
            vec![staged_xlsx("keep.xlsx", 50), staged_xlsx("drop.xlsx", 50)],
            &provider_reyes(),
        )
        .await
        .unwrap();

    h.engine.approve(&records[0].id, &reviewer).await.unwrap();
    h.engine
        .deny(&records[1].id, &reviewer, "Incomplete columns")
        .await
        .unwrap();

    let catalog = h.views.retrieval_catalog().await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].form_name, "keep.xlsx");
}

#[tokio::test]
async fn viewer_reports_blob_presence() {
    let h = harness().await;
    let record = h
        .engine
        .submit(vec![staged_xlsx("view_me.xlsx", 64)], &provider_reyes())
        .await
        .unwrap()
        .remove(0);

    let detail = h.views.viewer(&record.id).await.unwrap().unwrap();
    assert!(detail.blob_present);
    assert_eq!(detail.record, record);

    // An orphan-tolerant check: strip the blob out from underneath and the
    // viewer reports the record with its bytes missing.
    h.blobs.delete(&record.id).await.unwrap();
    let detail = h.views.viewer(&record.id).await.unwrap().unwrap();
    assert!(!detail.blob_present);

    assert!(h.views.viewer("20990101_deadbeef").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_removes_blob_then_record_and_is_idempotent() {
    let h = harness().await;
    let reyes = provider_reyes();
    let record = h
        .engine
        .submit(vec![staged_xlsx("mine.xlsx", 32)], &reyes)
        .await
        .unwrap()
        .remove(0);

    h.engine.delete(&record.id, &reyes).await.unwrap();
    assert!(!h.blobs.contains(&record.id).await.unwrap());
    assert!(h.registry.find(&record.id).await.unwrap().is_none());

    // Second delete (double-click, second view) is a no-op success.
    h.engine.delete(&record.id, &reyes).await.unwrap();
}

#[tokio::test]
async fn quota_failure_aborts_before_any_registry_write() {
    let h = harness_with_capacity(128).await;

    let err = h
        .engine
        .submit(vec![staged_xlsx("too_big.xlsx", 10_000)], &provider_reyes())
        .await
        .unwrap_err();
    assert!(!err.is_validation());

    assert!(h.registry.list().await.unwrap().is_empty());
    assert!(h.bus.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn quota_failure_mid_batch_leaves_orphan_blobs_but_no_records() {
    // First file fits, second does not: the whole submission fails, the
    // registry stays empty, and the first blob is left behind as a
    // documented orphan.
    let h = harness_with_capacity(600).await;

    let err = h
        .engine
        .submit(
            vec![staged_xlsx("small.xlsx", 64), staged_xlsx("large.xlsx", 10_000)],
            &provider_reyes(),
        )
        .await
        .unwrap_err();
    assert!(!err.is_validation());

    assert!(h.registry.list().await.unwrap().is_empty());
    assert!(h.bus.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn removing_a_staged_file_has_no_persisted_effect() {
    let h = harness().await;
    let mut staging = StagingArea::new();
    staging.stage(staged_xlsx("kept.xlsx", 40));
    staging.stage(staged_xlsx("discarded.xlsx", 40));

    let discarded = staging.remove(1).unwrap();
    assert_eq!(discarded.name, "discarded.xlsx");
    assert!(h.registry.list().await.unwrap().is_empty());

    let records = h
        .engine
        .submit(staging.take_all(), &provider_reyes())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].form_name, "kept.xlsx");
}

#[tokio::test]
async fn open_views_are_signaled_on_submission() {
    let h = harness().await;
    let mut rx = h.bus.subscribe();

    h.engine
        .submit(vec![staged_xlsx("signal.xlsx", 16)], &provider_reyes())
        .await
        .unwrap();

    assert!(matches!(
        rx.recv().await.unwrap(),
        BusEvent::Published { .. }
    ));
}
