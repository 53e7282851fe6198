//! Dashboard snapshots
//!
//! Rows are kept exactly as the backend sent them.

use crate::types::StationName;
use serde::{Deserialize, Serialize};

/// Latest dashboard fetched for a station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Station the rows belong to
    pub station: StationName,
    /// Opaque per-team state rows
    pub rows: Vec<serde_json::Value>,
}

impl DashboardSnapshot {
    /// Create snapshot
    #[inline]
    #[must_use]
    pub fn new(station: impl Into<StationName>, rows: Vec<serde_json::Value>) -> Self {
        Self {
            station: station.into(),
            rows,
        }
    }

    /// Row whose `"team"` field equals `team`
    #[must_use]
    pub fn row_for_team(&self, team: &str) -> Option<&serde_json::Value> {
        find_team_row(&self.rows, team)
    }

    /// Check if no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Latest race-wide dashboard: one row per team, each listing every station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalDashboard {
    /// Opaque per-team rows
    pub rows: Vec<serde_json::Value>,
}

impl GlobalDashboard {
    /// Create snapshot
    #[inline]
    #[must_use]
    pub fn new(rows: Vec<serde_json::Value>) -> Self {
        Self { rows }
    }

    /// Row whose `"team"` field equals `team`
    #[must_use]
    pub fn row_for_team(&self, team: &str) -> Option<&serde_json::Value> {
        find_team_row(&self.rows, team)
    }

    /// State cell of `team` at `station`, from the row's `"stations"` list
    #[must_use]
    pub fn cell(&self, team: &str, station: &str) -> Option<&serde_json::Value> {
        self.row_for_team(team)?
            .get("stations")?
            .as_array()?
            .iter()
            .find(|cell| cell.get("name").and_then(serde_json::Value::as_str) == Some(station))
    }
}

fn find_team_row<'a>(rows: &'a [serde_json::Value], team: &str) -> Option<&'a serde_json::Value> {
    rows.iter()
        .find(|row| row.get("team").and_then(serde_json::Value::as_str) == Some(team))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_lookup_by_team() {
        let snapshot = DashboardSnapshot::new(
            "S1",
            vec![
                json!({"team": "A", "state": "arrived", "score": 3}),
                json!({"team": "B", "state": "unknown", "score": 0}),
                json!("not-an-object"),
            ],
        );

        assert_eq!(snapshot.row_for_team("B").unwrap()["state"], json!("unknown"));
        assert!(snapshot.row_for_team("C").is_none());
    }

    #[test]
    fn global_cell_lookup() {
        let dashboard = GlobalDashboard::new(vec![json!({
            "team": "A",
            "stations": [
                {"name": "S1", "score": 5, "state": "finished"},
                {"name": "S2", "score": 0, "state": "unreachable"},
            ],
        })]);

        assert_eq!(dashboard.cell("A", "S1").unwrap()["score"], json!(5));
        assert!(dashboard.cell("A", "S9").is_none());
        assert!(dashboard.cell("B", "S1").is_none());
    }
}
