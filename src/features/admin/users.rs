//! Admin: Users
//!
//! Directory entries joined with their role assignment. Role and team edits
//! upsert the assignment keyed by `user_id`.

use std::sync::Arc;

use ahash::AHashMap;

use crate::components::composite::data_table::{CellValue, Column, DataTable, TableRow};
use crate::domain::profile::ProfileRecord;
use crate::domain::role::{Role, RoleAssignment};
use crate::domain::team::Team;
use crate::error::{Error, Result};
use crate::services::collection::{Collection, Query, to_record};
use crate::services::data::list_as;
use crate::services::{DataService, Notifier};

/// One line of the user table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub team_key: Option<String>,
    /// Display name of the team, "No team" when unassigned
    pub team_name: String,
}

impl TableRow for UserRow {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "full_name" => self.full_name.as_str().into(),
            "email" => self.email.as_str().into(),
            "role" => self.role.as_str().into(),
            "team" => self.team_name.as_str().into(),
            _ => CellValue::Null,
        }
    }

    fn values(&self) -> Vec<CellValue> {
        ["full_name", "email", "role", "team"]
            .into_iter()
            .map(|key| self.field(key))
            .collect()
    }
}

fn users_table(page_size: usize) -> DataTable<UserRow> {
    DataTable::new(vec![
        Column::new("full_name", "Name"),
        Column::new("email", "Email"),
        Column::new("role", "Role"),
        Column::new("team", "Team"),
    ])
    .page_size(page_size)
    .searchable(true)
    .search_placeholder("Search users...")
    .empty_message("No users found.")
}

pub struct UsersController<B> {
    backend: Arc<B>,
    notifier: Notifier,
    teams: Vec<Team>,
    assignments: AHashMap<String, RoleAssignment>,
    table: DataTable<UserRow>,
}

impl<B: DataService> UsersController<B> {
    pub fn new(backend: Arc<B>, notifier: Notifier, page_size: usize) -> Self {
        Self {
            backend,
            notifier,
            teams: Vec::new(),
            assignments: AHashMap::new(),
            table: users_table(page_size),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        let backend = self.backend.as_ref();
        let teams_query = Query::new().order_by("name", true);
        let profiles_query = Query::new().order_by("full_name", true);
        let all = Query::new();
        let loaded = futures::try_join!(
            list_as::<Team, _>(backend, Collection::RequestTeams, &teams_query),
            list_as::<ProfileRecord, _>(backend, Collection::Profiles, &profiles_query),
            list_as::<RoleAssignment, _>(backend, Collection::UserRoles, &all),
        );
        let (teams, profiles, assignments) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => return self.fail(e),
        };

        // Later rows win, matching a keyed upsert
        let assignments: AHashMap<String, RoleAssignment> = assignments
            .into_iter()
            .map(|a| (a.user_id.clone(), a))
            .collect();

        let rows = profiles
            .into_iter()
            .map(|p| {
                let assignment = assignments.get(&p.id);
                let team_key = assignment.and_then(|a| a.team_key.clone());
                let team_name = match team_key.as_deref() {
                    Some(key) => crate::domain::team::team_label(&teams, Some(key)),
                    None => "No team".to_string(),
                };
                UserRow {
                    role: assignment.map(|a| a.role).unwrap_or_default(),
                    user_id: p.id,
                    full_name: p.full_name.unwrap_or_default(),
                    email: p.email.unwrap_or_default(),
                    team_key,
                    team_name,
                }
            })
            .collect();

        self.teams = teams;
        self.assignments = assignments;
        self.table.set_rows(rows);
        Ok(())
    }

    pub fn table(&self) -> &DataTable<UserRow> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<UserRow> {
        &mut self.table
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Choices of the role select as (role, label), in display order
    pub fn role_options(&self) -> Vec<(Role, &'static str)> {
        Role::OPTIONS.iter().map(|role| (*role, role.label())).collect()
    }

    /// Role currently assigned, requester when none
    pub fn role_of(&self, user_id: &str) -> Role {
        self.assignments
            .get(user_id)
            .map(|a| a.role)
            .unwrap_or_default()
    }

    pub async fn change_role(&mut self, user_id: &str, role: Role) -> Result<()> {
        let payload = serde_json::json!({ "user_id": user_id, "role": role });
        self.upsert(payload, "Role updated").await
    }

    /// Assign a team, keeping the user's current role
    pub async fn change_team(&mut self, user_id: &str, team_key: &str) -> Result<()> {
        let payload = serde_json::json!({
            "user_id": user_id,
            "role": self.role_of(user_id),
            "team_key": team_key,
        });
        self.upsert(payload, "Team updated").await
    }

    async fn upsert(&mut self, payload: serde_json::Value, success: &str) -> Result<()> {
        let row = match to_record(&payload) {
            Ok(row) => row,
            Err(e) => return self.fail(e),
        };
        if let Err(e) = self.backend.upsert(Collection::UserRoles, row, "user_id").await {
            return self.fail(e);
        }
        self.notifier.success(success);
        self.load().await
    }

    fn fail(&self, error: Error) -> Result<()> {
        self.notifier.error(error.to_string());
        Err(error)
    }
}
