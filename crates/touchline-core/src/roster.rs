//! Roster entries and the capability used to fetch them.

use serde::{Deserialize, Serialize};

use crate::Result;

/// One active player on a team's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
}

impl RosterEntry {
    pub fn new(id: i64, name: impl Into<String>, position: Option<&str>) -> Self {
        Self {
            id,
            name: name.into(),
            position: position.map(str::to_string),
        }
    }
}

/// Read-only lookup of a team's roster.
///
/// Implementations must return entries in a stable order (ascending id):
/// fuzzy-match ties are broken by roster position, so an unstable order
/// makes parsing non-deterministic.
pub trait RosterSource {
    fn team_roster(&self, team_id: i64) -> Result<Vec<RosterEntry>>;
}

impl<F> RosterSource for F
where
    F: Fn(i64) -> Result<Vec<RosterEntry>>,
{
    fn team_roster(&self, team_id: i64) -> Result<Vec<RosterEntry>> {
        self(team_id)
    }
}
