//! End-to-end flows through the workspace against the in-memory backend

use std::sync::Arc;

use request_portal::app::access::AccessDecision;
use request_portal::app::navigation::Route;
use request_portal::components::composite::data_table::{Column, DataTable};
use request_portal::domain::config::PortalConfig;
use request_portal::domain::role::{Role, RoleAssignment};
use request_portal::services::collection::{Collection, to_record};
use request_portal::services::{MemoryBackend, NotificationLevel};
use request_portal::utils::config_store::MemoryPreferenceStore;
use serde_json::{Value, json};

fn backend() -> Arc<MemoryBackend> {
    let backend = MemoryBackend::new();
    let both = backend.add_user("both@example.com", "secret1", Some("Dual Role"));
    let requester = backend.add_user("req@example.com", "secret1", Some("Rex"));
    backend.seed(
        Collection::UserRoles,
        [
            to_record(&RoleAssignment::new(both.id.clone(), Role::Admin)).unwrap(),
            to_record(&RoleAssignment::new(both.id, Role::Requester)).unwrap(),
            to_record(&RoleAssignment::new(requester.id, Role::Requester)).unwrap(),
        ],
    );
    backend.seed(
        Collection::RequestTypes,
        [to_record(&json!({"id": "type-laptop", "name": "Laptop", "team_key": "it"})).unwrap()],
    );
    Arc::new(backend)
}

type TestWorkspace =
    request_portal::app::workspace::Workspace<MemoryBackend, MemoryPreferenceStore>;

async fn signed_in(backend: Arc<MemoryBackend>, email: &str) -> TestWorkspace {
    let mut workspace =
        TestWorkspace::new(backend, MemoryPreferenceStore::new(), PortalConfig::default());
    workspace.start().await;
    workspace.auth().sign_in(email, "secret1").await.unwrap();
    workspace
}

#[tokio::test]
async fn requester_without_requests_sees_empty_dashboard() {
    let workspace = signed_in(backend(), "req@example.com").await;
    let mut dashboard = workspace.dashboard().unwrap();
    dashboard.load().await.unwrap();

    let view = dashboard.view();
    assert!(view.cards.iter().all(|card| card.value == 0));
    assert_eq!(view.empty_message, Some("No requests yet."));
    assert!(view.recent.is_empty());
}

#[tokio::test]
async fn highest_priority_role_wins() {
    let mut workspace = signed_in(backend(), "both@example.com").await;
    assert_eq!(workspace.session().role(), Some(Role::Admin));

    assert_eq!(workspace.navigate("/admin/users").await, AccessDecision::Render);
    assert_eq!(workspace.current_route(), &Route::AdminUsers);
    assert!(workspace.layout().unwrap().navigation.admin.is_some());
}

#[tokio::test]
async fn requester_is_redirected_from_admin_routes() {
    let mut workspace = signed_in(backend(), "req@example.com").await;

    for path in ["/admin/request-types", "/admin/users"] {
        workspace.navigate(path).await;
        assert_eq!(workspace.current_route(), &Route::Dashboard);
    }
}

#[tokio::test]
async fn submitted_request_shows_up_in_lists() {
    let backend = backend();
    let workspace = signed_in(backend.clone(), "req@example.com").await;

    let mut create = workspace.create_request().unwrap();
    create.load_types().await.unwrap();
    create.form.request_type_id = Some("type-laptop".into());
    create.form.title = "New laptop".into();
    assert_eq!(create.submit().await.unwrap(), Route::Requests);

    let mut requests = workspace.requests().unwrap();
    requests.load().await.unwrap();
    assert_eq!(requests.table().total_items(), 1);
    let rows = requests.table().page_rows();
    assert_eq!(rows[0].type_name.as_deref(), Some("Laptop"));

    let mut dashboard = workspace.dashboard().unwrap();
    dashboard.load().await.unwrap();
    assert_eq!(dashboard.stats().total, 1);

    let notes = workspace.notifier().drain();
    assert!(notes
        .iter()
        .any(|n| n.level == NotificationLevel::Success && n.message == "Request submitted"));
}

#[tokio::test]
async fn failed_load_notifies_once() {
    let backend = backend();
    let workspace = signed_in(backend.clone(), "req@example.com").await;
    workspace.notifier().drain();
    backend.fail_on(Collection::Requests, request_portal::services::Operation::List);

    let mut requests = workspace.requests().unwrap();
    assert!(requests.load().await.is_err());
    let notes = workspace.notifier().drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
}

#[test]
fn twenty_five_rows_paginate_into_three_pages() {
    let rows: Vec<Value> = (1..=25).map(|n| json!({"n": n})).collect();
    let mut table = DataTable::new(vec![Column::new("n", "N")])
        .with_rows(rows)
        .page_size(10);

    assert_eq!(table.total_pages(), 3);
    let first: Vec<i64> = table.page_rows().iter().map(|r| r["n"].as_i64().unwrap()).collect();
    assert_eq!(first, (1..=10).collect::<Vec<_>>());

    table.go_to_page(5);
    assert_eq!(table.current_page(), 3);
    assert_eq!(table.page_rows().len(), 5);
}
