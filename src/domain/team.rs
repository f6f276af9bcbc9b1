//! Team - Handling Teams

use serde::{Deserialize, Serialize};

/// One row of the `request_teams` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub key: String,
    pub name: String,
}

/// Display label of a team key: the team's name, else the key, else "-"
pub fn team_label(teams: &[Team], team_key: Option<&str>) -> String {
    let Some(key) = team_key else {
        return "-".to_string();
    };
    teams
        .iter()
        .find(|t| t.key == key)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| key.to_string())
}
