//! Application - Demo Portal Run
//!
//! Seeds an in-memory backend, then walks through the portal as each role:
//! sidebar, route decisions, dashboard counts and the requests table.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::app::workspace::Workspace;
use crate::domain::config::PortalConfig;
use crate::error::Result;
use crate::services::collection::{Collection, Record};
use crate::services::{MemoryBackend, NotificationLevel};
use crate::utils::config_store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use crate::utils::format::truncate;

/// Demo accounts as (email, password), one per role
pub const DEMO_ACCOUNTS: [(&str, &str); 3] = [
    ("admin@portal.test", "admin-pass"),
    ("backoffice@portal.test", "backoffice-pass"),
    ("requester@portal.test", "requester-pass"),
];

const DEMO_ROUTES: [&str; 8] = [
    "/",
    "/dashboard",
    "/requests",
    "/requests/new",
    "/admin/request-types",
    "/admin/users",
    "/account",
    "/missing",
];

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

/// Backend with teams, request types, three users and a few requests
pub fn seed_demo_backend() -> MemoryBackend {
    let backend = MemoryBackend::new();

    backend.seed(
        Collection::RequestTeams,
        [
            record(json!({"key": "it", "name": "IT Support"})),
            record(json!({"key": "facilities", "name": "Facilities"})),
            record(json!({"key": "hr", "name": "People Ops"})),
        ],
    );
    backend.seed(
        Collection::RequestTypes,
        [
            record(json!({"id": "type-laptop", "name": "Laptop", "team_key": "it"})),
            record(json!({"id": "type-badge", "name": "Access badge", "team_key": "facilities"})),
            record(json!({"id": "type-leave", "name": "Leave", "team_key": "hr"})),
            record(json!({
                "id": "type-fax",
                "name": "Fax machine",
                "team_key": "it",
                "active": false
            })),
        ],
    );

    let names = ["Ada Admin", "Bo Backoffice", "Rae Requester"];
    let roles = ["admin", "backoffice", "requester"];
    let mut requester_id = String::new();
    for (((email, password), name), role) in DEMO_ACCOUNTS.iter().zip(names).zip(roles) {
        let user = backend.add_user(email, password, Some(name));
        backend.seed(
            Collection::Profiles,
            [record(json!({"id": user.id, "full_name": name, "email": email}))],
        );
        backend.seed(
            Collection::UserRoles,
            [record(json!({"user_id": user.id, "role": role, "team_key": "it"}))],
        );
        if role == "requester" {
            requester_id = user.id;
        }
    }

    let requests = [
        ("New laptop for onboarding", "type-laptop", "it", "submitted", "2024-05-02T09:00:00Z"),
        (
            "Badge for the third floor",
            "type-badge",
            "facilities",
            "in_review",
            "2024-05-04T10:30:00Z",
        ),
        ("Parental leave", "type-leave", "hr", "approved", "2024-04-20T08:15:00Z"),
        ("Second monitor", "type-laptop", "it", "rejected", "2024-05-06T14:45:00Z"),
    ];
    backend.seed(
        Collection::Requests,
        requests.iter().map(|(title, type_id, team, status, created)| {
            record(json!({
                "title": title,
                "description": format!("{title} (demo)"),
                "requester_id": requester_id,
                "request_type_id": type_id,
                "team_key": team,
                "status": status,
                "created_at": created,
            }))
        }),
    );
    backend
}

/// Run the demo with preferences in the config directory, or in memory when
/// that directory is unavailable
pub async fn run_app(config: PortalConfig) -> Result<()> {
    match FilePreferenceStore::open_default() {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "using preference file");
            run_with(config, store).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "preference file unavailable, using memory");
            run_with(config, MemoryPreferenceStore::new()).await
        }
    }
}

async fn run_with<P: PreferenceStore>(config: PortalConfig, preferences: P) -> Result<()> {
    let backend = Arc::new(seed_demo_backend());
    let mut workspace = Workspace::new(backend, preferences, config);
    workspace.start().await;
    println!("Theme: {}", workspace.appearance().mode);

    for (email, password) in DEMO_ACCOUNTS {
        if let Err(e) = workspace.auth().sign_in(email, password).await {
            tracing::error!(email, error = %e, "demo sign-in failed");
            continue;
        }
        print_session(&mut workspace).await;
        workspace.sign_out().await;
    }

    for note in workspace.notifier().drain() {
        let marker = match note.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        println!("[{marker}] {}", note.message);
    }
    workspace.teardown();
    Ok(())
}

async fn print_session<P: PreferenceStore>(workspace: &mut Workspace<MemoryBackend, P>) {
    let Some(layout) = workspace.layout() else {
        return;
    };
    println!();
    println!(
        "== {} {} ({}) ==",
        layout.footer.caption, layout.footer.name, layout.footer.role_label
    );

    for entry in layout.navigation.main.iter() {
        println!("  nav  {:<14} {}", entry.label, entry.path());
    }
    if let Some(section) = &layout.navigation.admin {
        for entry in &section.entries {
            println!("  nav  {} / {:<8} {}", section.label, entry.label, entry.path());
        }
    }

    for path in DEMO_ROUTES {
        let decision = workspace.navigate(path).await;
        println!("  {path:<22} -> {:?} at {}", decision, workspace.current_route());
    }

    if let Some(mut dashboard) = workspace.dashboard() {
        if dashboard.load().await.is_err() {
            return;
        }
        let view = dashboard.view();
        let counts: Vec<String> = view
            .cards
            .iter()
            .map(|c| format!("{} {}", c.title, c.value))
            .collect();
        println!("  {}: {}", view.heading, counts.join(", "));
        for item in &view.recent {
            println!("    {} [{}] {}", truncate(&item.title, 28), item.badge.label, item.meta);
        }
    }

    if let Some(mut requests) = workspace.requests() {
        if requests.load().await.is_err() {
            return;
        }
        requests.table_mut().toggle_sort("title");
        println!("  {} ({})", requests.page().title, requests.page().subtitle);
        for line in requests.table().view().to_text().lines() {
            println!("    {line}");
        }
    }
}
