//! Aggregate client state
//!
//! Everything the sync actions commit into lives here. The state is plain
//! data; sharing and locking are the owner's concern.

use crate::assignment::AssignmentIndex;
use crate::dashboard::{DashboardSnapshot, GlobalDashboard};
use crate::error::SyncError;
use crate::error_log::ErrorLog;
use crate::store::EntityStore;
use crate::types::{AssignmentPayload, EntityKind, Named, StationName, TeamName, UserName};
use crate::views;

/// Entity store, assignment index, dashboard and error log
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    /// Entity collections
    pub store: EntityStore,
    /// Derived assignment relations
    pub assignments: AssignmentIndex,
    /// Latest station dashboard, if one was fetched
    pub dashboard: Option<DashboardSnapshot>,
    /// Latest race-wide dashboard, if one was fetched
    pub global_dashboard: Option<GlobalDashboard>,
    /// Failed actions
    pub errors: ErrorLog,
}

impl SyncState {
    /// Create empty state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the assignment index from a payload
    pub fn replace_assignments(&mut self, payload: &AssignmentPayload) {
        self.assignments.rebuild_from_payload(payload);
    }

    /// Remove the first entity of `kind` named `name`
    ///
    /// Assignments are not touched; they catch up on the next refresh.
    pub fn remove_entity(&mut self, kind: EntityKind, name: &str) -> bool {
        match kind {
            EntityKind::Team => self.store.teams.remove_by_name(name).is_some(),
            EntityKind::Station => self.store.stations.remove_by_name(name).is_some(),
            EntityKind::Route => self.store.routes.remove_by_name(name).is_some(),
            EntityKind::User => self.store.users.remove_by_name(name).is_some(),
        }
    }

    /// Check if an entity of `kind` named `name` exists
    #[must_use]
    pub fn contains_entity(&self, kind: EntityKind, name: &str) -> bool {
        match kind {
            EntityKind::Team => self.store.teams.contains(name),
            EntityKind::Station => self.store.stations.contains(name),
            EntityKind::Route => self.store.routes.contains(name),
            EntityKind::User => self.store.users.contains(name),
        }
    }

    /// Record a failed action
    pub fn log_error(&mut self, action: &str, error: &SyncError) {
        self.errors.record(action, error);
    }

    /// Teams not on any route
    #[must_use]
    pub fn unassigned_teams(&self) -> Vec<TeamName> {
        views::unassigned_teams(&self.store, &self.assignments)
    }

    /// Teams on `route`
    #[must_use]
    pub fn assigned_teams(&self, route: &str) -> Vec<TeamName> {
        views::assigned_teams(&self.assignments, route)
    }

    /// Stations not on `route`
    #[must_use]
    pub fn unassigned_stations(&self, route: &str) -> Vec<StationName> {
        views::unassigned_stations(&self.store, &self.assignments, route)
    }

    /// Stations on `route`
    #[must_use]
    pub fn assigned_stations(&self, route: &str) -> Vec<StationName> {
        views::assigned_stations(&self.assignments, route)
    }

    /// Users staffing `station`
    #[must_use]
    pub fn station_users(&self, station: &str) -> Vec<UserName> {
        views::station_users(&self.assignments, station)
    }

    /// Users not staffing `station`
    #[must_use]
    pub fn users_not_at_station(&self, station: &str) -> Vec<UserName> {
        views::users_not_at_station(&self.store, &self.assignments, station)
    }

    /// Route names known to the store
    #[must_use]
    pub fn route_names(&self) -> Vec<String> {
        self.store.routes.iter().map(|r| r.name().to_string()).collect()
    }
}
