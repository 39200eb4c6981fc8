mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use common::{ana_and_carlos, candidate, today, FakeBackend};
use recruit_dashboard::config::Config;
use recruit_dashboard::dto::candidate_dto::{CandidateDraft, CandidatePatch};
use recruit_dashboard::models::user::SessionState;
use recruit_dashboard::services::calendar_service::CalendarMonth;
use recruit_dashboard::services::demo_data::DataSource;
use recruit_dashboard::services::list_view::{NotificationKind, RecordingView, ViewEvent};
use recruit_dashboard::{CandidateStatus, DashboardService};
use tokio::sync::mpsc;
use tokio_test::{assert_err, assert_ok};

fn dashboard(backend: Arc<FakeBackend>) -> (DashboardService, RecordingView) {
    let view = RecordingView::new();
    let config = Config::new("http://localhost:5000");
    let service = DashboardService::new(backend, Box::new(view.clone()), &config).with_clock(today);
    (service, view)
}

#[tokio::test]
async fn start_with_session_loads_dashboard() {
    let backend = Arc::new(FakeBackend::with_candidates(ana_and_carlos()).signed_in());
    let (mut service, view) = dashboard(backend);

    assert!(service.start().await.is_authenticated());
    assert_eq!(service.source(), DataSource::Live);
    assert_eq!(service.controller().candidates().len(), 2);
    assert_eq!(view.last_rows(), Some(vec![1, 2]));
}

#[tokio::test]
async fn login_then_logout() {
    let backend = Arc::new(FakeBackend::with_candidates(ana_and_carlos()));
    let (mut service, view) = dashboard(backend);
    assert_eq!(*service.start().await, SessionState::Anonymous);

    let err = assert_err!(service.login("admin@ejemplo.com", "wrong").await);
    assert!(matches!(err, recruit_dashboard::Error::Unauthorized(_)));
    assert!(!service.session().is_authenticated());

    let user = assert_ok!(service.login("admin@ejemplo.com", "secret").await);
    assert_eq!(user.email, "admin@ejemplo.com");
    assert_eq!(service.controller().candidates().len(), 2);

    service.logout().await;
    assert!(!service.session().is_authenticated());
    assert!(service.controller().candidates().is_empty());
    assert_eq!(view.events().iter().filter(|e| **e == ViewEvent::Session(None)).count(), 2);
}

#[tokio::test]
async fn login_requires_both_fields() {
    let (mut service, view) = dashboard(Arc::new(FakeBackend::default()));
    let err = assert_err!(service.login("  ", "secret").await);
    assert!(err.is_validation());
    assert_eq!(view.notifications()[0].kind, NotificationKind::Warning);
}

#[tokio::test]
async fn overlapping_loads_apply_in_arrival_order() {
    let backend = Arc::new(FakeBackend::default());
    let slow = vec![candidate(1, "Ana García", CandidateStatus::Active, (2025, 3, 15))];
    backend.script_list(Duration::from_millis(60), slow);
    backend.script_list(Duration::from_millis(0), ana_and_carlos());
    let (mut service, _) = dashboard(backend);

    let (tx, mut rx) = mpsc::unbounded_channel();
    for _ in 0..2 {
        let fetch = service.fetch_candidates();
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(fetch.await);
        });
    }
    drop(tx);

    let mut applied = Vec::new();
    while let Some(fetch) = rx.recv().await {
        service.apply_fetched(fetch);
        applied.push(service.controller().candidates().len());
    }
    assert_eq!(applied, vec![2, 1]);
    assert_eq!(service.controller().candidates()[0].id, 1);
}

#[tokio::test]
async fn offline_backend_switches_to_demo_once() {
    let backend = Arc::new(FakeBackend::with_candidates(ana_and_carlos()));
    backend.go_offline();
    let (mut service, view) = dashboard(backend.clone());

    assert_eq!(service.refresh().await, DataSource::Demo);
    assert_eq!(service.controller().candidates().len(), 4);

    // Writes in demo mode stay local.
    let added = assert_ok!(
        service
            .create_candidate(CandidateDraft::new("Lucía", "lucia@ejemplo.com", "555-0101"))
            .await
    );
    assert_eq!(added.id, 5);
    assert!(backend.candidates.lock().unwrap().iter().all(|c| c.id != 5));

    let warnings = view
        .notifications()
        .iter()
        .filter(|n| n.kind == NotificationKind::Warning)
        .count();
    assert_eq!(warnings, 1);

    let stats = service.statistics().await;
    assert_eq!(stats.total, 5);
}

#[tokio::test]
async fn retry_live_returns_to_backend_data() {
    let backend = Arc::new(FakeBackend::with_candidates(ana_and_carlos()));
    backend.go_offline();
    let (mut service, _) = dashboard(backend.clone());
    service.refresh().await;
    assert!(service.source().is_demo());

    backend.offline.store(false, std::sync::atomic::Ordering::SeqCst);
    assert_eq!(service.retry_live().await, DataSource::Live);
    assert_eq!(service.controller().candidates().len(), 2);
}

#[tokio::test]
async fn live_writes_go_through_backend() {
    let backend = Arc::new(FakeBackend::with_candidates(ana_and_carlos()));
    let (mut service, view) = dashboard(backend.clone());
    service.refresh().await;

    let created = assert_ok!(
        service
            .create_candidate(CandidateDraft::new("Lucía", "lucia@ejemplo.com", "555-0101"))
            .await
    );
    assert_eq!(created.id, 3);
    assert!(service.controller().contains(3));

    assert_ok!(
        service
            .update_candidate(1, CandidatePatch::status(CandidateStatus::Rejected))
            .await
    );
    assert_eq!(
        backend.candidates.lock().unwrap()[0].status,
        CandidateStatus::Rejected
    );

    assert_ok!(service.delete_candidate(2).await);
    assert!(!service.controller().contains(2));
    assert_eq!(backend.candidates.lock().unwrap().len(), 2);

    let successes = view
        .notifications()
        .iter()
        .filter(|n| n.kind == NotificationKind::Success)
        .count();
    assert_eq!(successes, 3);
}

#[tokio::test]
async fn failed_delete_keeps_local_record() {
    let backend = Arc::new(FakeBackend::with_candidates(ana_and_carlos()));
    let (mut service, _) = dashboard(backend.clone());
    service.refresh().await;
    backend.go_offline();

    let err = assert_err!(service.delete_candidate(1).await);
    assert!(err.is_network());
    assert!(service.controller().contains(1));
    assert_eq!(service.source(), DataSource::Live);
}

#[tokio::test]
async fn unknown_ids_are_reported_not_sent() {
    let backend = Arc::new(FakeBackend::with_candidates(ana_and_carlos()));
    let (mut service, view) = dashboard(backend);
    service.refresh().await;

    assert!(service.open_candidate(999).unwrap_err().is_not_found());
    assert!(service.delete_candidate(999).await.unwrap_err().is_not_found());
    assert!(view
        .notifications()
        .iter()
        .all(|n| n.kind == NotificationKind::Error));
}

#[tokio::test]
async fn scheduling_an_interview_fills_the_calendar() {
    let backend = Arc::new(FakeBackend::with_candidates(ana_and_carlos()));
    let (mut service, view) = dashboard(backend.clone());
    service.refresh().await;

    service.open_candidate(2).unwrap();
    let form = assert_ok!(service.open_interview_form());
    assert_eq!(form.candidate_id, 2);
    assert_eq!(form.date, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
    assert_eq!(form.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    assert_eq!(form.position, "Not specified");
    assert_eq!(service.controller().selected_id(), None);
    assert!(view.events().contains(&ViewEvent::DetailClosed));

    let err = assert_err!(service.schedule_interview("", "10:00").await);
    assert!(err.is_validation());

    let interview = assert_ok!(service.schedule_interview("2025-04-02", "10:00").await);
    assert_eq!(interview.candidate_name.as_deref(), Some("Carlos López"));
    assert_eq!(backend.interviews.lock().unwrap().len(), 1);

    let grid = service.calendar(CalendarMonth::containing(today()));
    assert_eq!(grid.len(), 42);
    let day = grid
        .iter()
        .find(|d| d.date == NaiveDate::from_ymd_opt(2025, 4, 2).unwrap())
        .unwrap();
    assert_eq!(day.events, vec!["Interview: Carlos López".to_string()]);
    assert_eq!(service.statistics().await.pending_interviews, 1);
}

#[tokio::test]
async fn refresh_candidate_merges_backend_changes() {
    let backend = Arc::new(FakeBackend::with_candidates(ana_and_carlos()));
    let (mut service, _) = dashboard(backend.clone());
    service.refresh().await;

    backend.candidates.lock().unwrap()[0].notes = Some("Segunda entrevista".into());
    let fresh = assert_ok!(service.refresh_candidate(1).await);
    assert_eq!(fresh.notes.as_deref(), Some("Segunda entrevista"));
    assert_eq!(
        service.controller().get(1).unwrap().notes.as_deref(),
        Some("Segunda entrevista")
    );
}

#[tokio::test]
async fn refresh_candidate_drops_fields_cleared_on_the_backend() {
    let mut seeded = ana_and_carlos();
    seeded[0].position = Some("Frontend".into());
    seeded[0].notes = Some("Llamar el lunes".into());
    let backend = Arc::new(FakeBackend::with_candidates(seeded));
    let (mut service, view) = dashboard(backend.clone());
    service.refresh().await;
    service.open_candidate(1).unwrap();

    {
        let mut stored = backend.candidates.lock().unwrap();
        stored[0].position = None;
        stored[0].notes = None;
        stored[0].registered_date = NaiveDate::from_ymd_opt(2025, 2, 1);
    }
    let fresh = assert_ok!(service.refresh_candidate(1).await);
    assert_eq!(fresh.position, None);

    let local = service.controller().get(1).unwrap();
    assert_eq!(local.position, None);
    assert_eq!(local.notes, None);
    assert_eq!(local.registered_date, NaiveDate::from_ymd_opt(2025, 2, 1));
    assert!(view.events().contains(&ViewEvent::DetailShown(fresh)));
}
