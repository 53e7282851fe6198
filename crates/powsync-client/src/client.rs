//! Sync actions
//!
//! [`SyncClient`] owns the shared [`SyncState`] and performs every action
//! the UI can dispatch. Each action follows the same contract:
//! 1. Perform the HTTP call through the [`Backend`]
//! 2. On success, commit the local mutation (and any follow-up refresh)
//! 3. On failure, append one error log entry and leave domain state untouched
//!
//! Errors never escape an action; the returned [`Outcome`] only tells the
//! caller what happened.

use crate::generation::{Generation, Generations, Resource};
use crate::paths;
use parking_lot::RwLock;
use powsync_core::{
    AssignmentPayload, Backend, DashboardSnapshot, EntityKind, ErrorEntry, GlobalDashboard,
    Listing, Route, Station, StationName, SyncError, SyncState, Team, TeamName, User, UserName,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// Result of one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Server accepted the request and local state was updated
    Committed,
    /// Response arrived after a newer request for the same resource; dropped
    Stale,
    /// Request failed; an error log entry was appended
    Failed,
}

impl Outcome {
    /// Check if committed
    #[inline]
    #[must_use]
    pub fn is_committed(self) -> bool {
        matches!(self, Outcome::Committed)
    }

    /// Check if failed
    #[inline]
    #[must_use]
    pub fn is_failed(self) -> bool {
        matches!(self, Outcome::Failed)
    }
}

/// Outcomes of a full refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    /// `GET /user`
    pub users: Outcome,
    /// `GET /team`
    pub teams: Outcome,
    /// `GET /route`
    pub routes: Outcome,
    /// `GET /station`
    pub stations: Outcome,
    /// `GET /assignments`
    pub assignments: Outcome,
}

impl RefreshSummary {
    fn outcomes(&self) -> [Outcome; 5] {
        [
            self.users,
            self.teams,
            self.routes,
            self.stations,
            self.assignments,
        ]
    }

    /// Check if every part was committed
    #[must_use]
    pub fn all_committed(&self) -> bool {
        self.outcomes().iter().all(|o| o.is_committed())
    }

    /// Number of parts that failed
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes().iter().filter(|o| o.is_failed()).count()
    }
}

/// Shared handle to the client store and its backend
///
/// Cloning is cheap; clones share the same state. The state lock is never
/// held across a network call.
pub struct SyncClient<B> {
    backend: Arc<B>,
    state: Arc<RwLock<SyncState>>,
    generations: Arc<Generations>,
}

impl<B> Clone for SyncClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            state: Arc::clone(&self.state),
            generations: Arc::clone(&self.generations),
        }
    }
}

impl<B> fmt::Debug for SyncClient<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncClient")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl<B: Backend> SyncClient<B> {
    /// Create client with empty state
    #[inline]
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Create client over a backend the caller keeps a handle to
    #[inline]
    #[must_use]
    pub fn from_shared(backend: Arc<B>) -> Self {
        Self::with_state(backend, SyncState::new())
    }

    /// Create client starting from `state`
    #[must_use]
    pub fn with_state(backend: Arc<B>, state: SyncState) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(state)),
            generations: Arc::new(Generations::new()),
        }
    }

    /// Backend in use
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run `f` against the current state
    pub fn read<R>(&self, f: impl FnOnce(&SyncState) -> R) -> R {
        f(&self.state.read())
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> SyncState {
        self.state.read().clone()
    }

    /// Take the state out, leaving an empty one behind
    pub fn take_state(&self) -> SyncState {
        std::mem::take(&mut *self.state.write())
    }

    /// Error log entries, oldest first
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorEntry> {
        self.read(|state| state.errors.entries().to_vec())
    }

    /// Latest dashboard
    #[must_use]
    pub fn dashboard(&self) -> Option<DashboardSnapshot> {
        self.read(|state| state.dashboard.clone())
    }

    /// Latest race-wide dashboard
    #[must_use]
    pub fn global_dashboard(&self) -> Option<GlobalDashboard> {
        self.read(|state| state.global_dashboard.clone())
    }

    /// Teams not on any route
    #[must_use]
    pub fn unassigned_teams(&self) -> Vec<TeamName> {
        self.read(SyncState::unassigned_teams)
    }

    /// Teams on `route`
    #[must_use]
    pub fn assigned_teams(&self, route: &str) -> Vec<TeamName> {
        self.read(|state| state.assigned_teams(route))
    }

    /// Stations not on `route`
    #[must_use]
    pub fn unassigned_stations(&self, route: &str) -> Vec<StationName> {
        self.read(|state| state.unassigned_stations(route))
    }

    /// Stations on `route`
    #[must_use]
    pub fn assigned_stations(&self, route: &str) -> Vec<StationName> {
        self.read(|state| state.assigned_stations(route))
    }

    // --- Refresh ---------------------------------------------------------

    /// Refresh every collection and the assignments concurrently
    pub async fn refresh_all(&self) -> RefreshSummary {
        tracing::info!("Refreshing all state from backend");

        let (users, teams, routes, stations, assignments) = futures::join!(
            self.refresh_users(),
            self.refresh_teams(),
            self.refresh_routes(),
            self.refresh_stations(),
            self.refresh_assignments(),
        );

        let summary = RefreshSummary {
            users,
            teams,
            routes,
            stations,
            assignments,
        };
        tracing::info!("Refresh finished with {} failures", summary.failures());
        summary
    }

    /// Replace the user collection
    pub async fn refresh_users(&self) -> Outcome {
        self.refresh_collection(EntityKind::User, |state, items: Vec<User>| {
            state.store.users.replace_all(items);
        })
        .await
    }

    /// Replace the team collection
    pub async fn refresh_teams(&self) -> Outcome {
        self.refresh_collection(EntityKind::Team, |state, items: Vec<Team>| {
            state.store.teams.replace_all(items);
        })
        .await
    }

    /// Replace the route collection
    pub async fn refresh_routes(&self) -> Outcome {
        self.refresh_collection(EntityKind::Route, |state, items: Vec<Route>| {
            state.store.routes.replace_all(items);
        })
        .await
    }

    /// Replace the station collection
    pub async fn refresh_stations(&self) -> Outcome {
        self.refresh_collection(EntityKind::Station, |state, items: Vec<Station>| {
            state.store.stations.replace_all(items);
        })
        .await
    }

    /// Rebuild the assignment index from the server
    pub async fn refresh_assignments(&self) -> Outcome {
        const ACTION: &str = "refresh_assignments";
        let generation = self.generations.begin(&Resource::Assignments);

        let result = self
            .backend
            .get(paths::ASSIGNMENTS)
            .await
            .and_then(decode::<AssignmentPayload>);
        match result {
            Ok(payload) => self.commit_latest(&Resource::Assignments, generation, |state| {
                state.replace_assignments(&payload);
            }),
            Err(error) => self.fail(ACTION, &error),
        }
    }

    async fn refresh_collection<T: DeserializeOwned>(
        &self,
        kind: EntityKind,
        commit: impl FnOnce(&mut SyncState, Vec<T>),
    ) -> Outcome {
        let action = format!("refresh_{}s", kind.label());
        let resource = Resource::from(kind);
        let generation = self.generations.begin(&resource);

        let result = self
            .backend
            .get(kind.collection_path())
            .await
            .and_then(decode::<Listing<T>>);
        match result {
            Ok(listing) => {
                tracing::debug!("Received {} {}s", listing.items.len(), kind);
                self.commit_latest(&resource, generation, |state| commit(state, listing.items))
            }
            Err(error) => self.fail(&action, &error),
        }
    }

    // --- Dashboard and jobs ----------------------------------------------

    /// Fetch the dashboard of `station`
    pub async fn fetch_dashboard(&self, station: &str) -> Outcome {
        const ACTION: &str = "fetch_dashboard";
        let generation = self.generations.begin(&Resource::Dashboard);

        let result = self
            .backend
            .get(&paths::dashboard(station))
            .await
            .and_then(decode::<Vec<Value>>);
        match result {
            Ok(rows) => self.commit_latest(&Resource::Dashboard, generation, |state| {
                state.dashboard = Some(DashboardSnapshot::new(station, rows));
            }),
            Err(error) => self.fail(ACTION, &error),
        }
    }

    /// Fetch the race-wide dashboard
    pub async fn fetch_global_dashboard(&self) -> Outcome {
        const ACTION: &str = "fetch_global_dashboard";
        let generation = self.generations.begin(&Resource::GlobalDashboard);

        let result = self
            .backend
            .get(paths::GLOBAL_DASHBOARD)
            .await
            .and_then(decode::<Vec<Value>>);
        match result {
            Ok(rows) => self.commit_latest(&Resource::GlobalDashboard, generation, |state| {
                state.global_dashboard = Some(GlobalDashboard::new(rows));
            }),
            Err(error) => self.fail(ACTION, &error),
        }
    }

    /// Advance the state of `team` on `station`, then refetch its dashboard
    pub async fn advance_state(&self, station: &str, team: &str) -> Outcome {
        let job = json!({
            "action": "advance",
            "args": {"station_name": station, "team_name": team},
        });
        self.run_job("advance_state", station, job).await
    }

    /// Set the score of `team` on `station`, then refetch its dashboard
    pub async fn set_score(&self, station: &str, team: &str, score: i64) -> Outcome {
        let job = json!({
            "action": "set_score",
            "args": {"station_name": station, "team_name": team, "score": score},
        });
        self.run_job("set_score", station, job).await
    }

    async fn run_job(&self, action: &str, station: &str, job: Value) -> Outcome {
        match self.backend.post(paths::JOB, job).await {
            Ok(_) => {
                tracing::info!("Job {} accepted for station {}", action, station);
                self.fetch_dashboard(station).await;
                Outcome::Committed
            }
            Err(error) => self.fail(action, &error),
        }
    }

    // --- Create / delete -------------------------------------------------

    /// Create a team on the server and append it locally
    pub async fn create_team(&self, team: Team) -> Outcome {
        self.create_entity(EntityKind::Team, team, |state, team| {
            state.store.teams.append(team);
        })
        .await
    }

    /// Create a route on the server and append it locally
    pub async fn create_route(&self, route: Route) -> Outcome {
        self.create_entity(EntityKind::Route, route, |state, route| {
            state.store.routes.append(route);
        })
        .await
    }

    /// Create a station on the server and append it locally
    pub async fn create_station(&self, station: Station) -> Outcome {
        self.create_entity(EntityKind::Station, station, |state, station| {
            state.store.stations.append(station);
        })
        .await
    }

    /// Create a user on the server and append it locally
    pub async fn create_user(&self, user: User) -> Outcome {
        self.create_entity(EntityKind::User, user, |state, user| {
            state.store.users.append(user);
        })
        .await
    }

    async fn create_entity<T: Serialize>(
        &self,
        kind: EntityKind,
        item: T,
        commit: impl FnOnce(&mut SyncState, T),
    ) -> Outcome {
        let action = format!("create_{}", kind.label());
        let body = match encode(&item) {
            Ok(body) => body,
            Err(error) => return self.fail(&action, &error),
        };

        match self.backend.post(kind.collection_path(), body).await {
            Ok(_) => {
                tracing::info!("Created {}", kind);
                self.commit(|state| commit(state, item));
                Outcome::Committed
            }
            Err(error) => self.fail(&action, &error),
        }
    }

    /// Delete a team, then refresh the assignments
    pub async fn delete_team(&self, name: &str) -> Outcome {
        self.delete_entity(EntityKind::Team, name).await
    }

    /// Delete a route, then refresh the assignments
    pub async fn delete_route(&self, name: &str) -> Outcome {
        self.delete_entity(EntityKind::Route, name).await
    }

    /// Delete a station, then refresh the assignments
    pub async fn delete_station(&self, name: &str) -> Outcome {
        self.delete_entity(EntityKind::Station, name).await
    }

    /// Delete a user, then refresh the assignments
    pub async fn delete_user(&self, name: &str) -> Outcome {
        self.delete_entity(EntityKind::User, name).await
    }

    /// Delete the entity of `kind` named `name`
    ///
    /// The local record is removed without touching the assignment index;
    /// the follow-up assignment refresh brings the index back in line.
    pub async fn delete_entity(&self, kind: EntityKind, name: &str) -> Outcome {
        let action = format!("delete_{}", kind.label());

        match self.backend.delete(&paths::entity(kind, name)).await {
            Ok(_) => {
                if !self.commit(|state| state.remove_entity(kind, name)) {
                    tracing::debug!("Deleted {} {} was not held locally", kind, name);
                }
                tracing::info!("Deleted {} {}", kind, name);
                self.refresh_assignments().await;
                Outcome::Committed
            }
            Err(error) => self.fail(&action, &error),
        }
    }

    // --- Assignments -----------------------------------------------------

    /// Put the locally known team `team` on `route`, then refresh everything
    pub async fn assign_team(&self, route: &str, team: &str) -> Outcome {
        const ACTION: &str = "assign_team";
        let Some(record) = self.read(|state| state.store.teams.find(team).cloned()) else {
            return self.fail(ACTION, &SyncError::not_found(EntityKind::Team, team));
        };
        let body = match encode(&record) {
            Ok(body) => body,
            Err(error) => return self.fail(ACTION, &error),
        };

        match self.backend.post(&paths::route_teams(route), body).await {
            Ok(_) => {
                self.commit(|state| state.assignments.assign_team(route, &record));
                tracing::info!("Assigned team {} to route {}", team, route);
                self.refresh_all().await;
                Outcome::Committed
            }
            Err(error) => self.fail(ACTION, &error),
        }
    }

    /// Take `team` off `route`, then refresh everything
    pub async fn unassign_team(&self, route: &str, team: &str) -> Outcome {
        match self.backend.delete(&paths::route_team(route, team)).await {
            Ok(_) => {
                self.commit(|state| state.assignments.unassign_team(route, team));
                tracing::info!("Unassigned team {} from route {}", team, route);
                self.refresh_all().await;
                Outcome::Committed
            }
            Err(error) => self.fail("unassign_team", &error),
        }
    }

    /// Put the locally known station `station` on `route`, then refresh everything
    pub async fn assign_station(&self, route: &str, station: &str) -> Outcome {
        const ACTION: &str = "assign_station";
        let Some(record) = self.read(|state| state.store.stations.find(station).cloned()) else {
            return self.fail(ACTION, &SyncError::not_found(EntityKind::Station, station));
        };
        let body = match encode(&record) {
            Ok(body) => body,
            Err(error) => return self.fail(ACTION, &error),
        };

        match self.backend.post(&paths::route_stations(route), body).await {
            Ok(_) => {
                self.commit(|state| state.assignments.assign_station(route, record));
                tracing::info!("Assigned station {} to route {}", station, route);
                self.refresh_all().await;
                Outcome::Committed
            }
            Err(error) => self.fail(ACTION, &error),
        }
    }

    /// Take `station` off `route`, then refresh everything
    pub async fn unassign_station(&self, route: &str, station: &str) -> Outcome {
        match self.backend.delete(&paths::route_station(route, station)).await {
            Ok(_) => {
                self.commit(|state| state.assignments.unassign_station(route, station));
                tracing::info!("Unassigned station {} from route {}", station, route);
                self.refresh_all().await;
                Outcome::Committed
            }
            Err(error) => self.fail("unassign_station", &error),
        }
    }

    // --- Station staffing ------------------------------------------------

    /// Replace the stations staffed by `user` with the server's view
    pub async fn refresh_user_stations(&self, user: &str) -> Outcome {
        const ACTION: &str = "refresh_user_stations";
        let resource = Resource::UserStations(user.to_string());
        let generation = self.generations.begin(&resource);

        let result = self
            .backend
            .get(&paths::user_stations(user))
            .await
            .and_then(decode::<Vec<(StationName, bool)>>);
        match result {
            Ok(flags) => self.commit_latest(&resource, generation, |state| {
                let staffed = flags
                    .into_iter()
                    .filter_map(|(station, assigned)| assigned.then_some(station));
                state.assignments.replace_user_stations(user, staffed);
            }),
            Err(error) => self.fail(ACTION, &error),
        }
    }

    /// Put the locally known user `user` on `station`, then refresh that
    /// user's stations
    pub async fn assign_user_to_station(&self, station: &str, user: &str) -> Outcome {
        const ACTION: &str = "assign_user_to_station";
        let Some(record) = self.read(|state| state.store.users.find(user).cloned()) else {
            return self.fail(ACTION, &SyncError::not_found(EntityKind::User, user));
        };
        let body = match encode(&record) {
            Ok(body) => body,
            Err(error) => return self.fail(ACTION, &error),
        };

        match self.backend.post(&paths::station_users(station), body).await {
            Ok(_) => {
                self.commit(|state| state.assignments.assign_user(station, user));
                tracing::info!("Assigned user {} to station {}", user, station);
                self.refresh_user_stations(user).await;
                Outcome::Committed
            }
            Err(error) => self.fail(ACTION, &error),
        }
    }

    /// Take `user` off `station`, then refresh that user's stations
    pub async fn unassign_user_from_station(&self, station: &str, user: &str) -> Outcome {
        match self.backend.delete(&paths::station_user(station, user)).await {
            Ok(_) => {
                self.commit(|state| state.assignments.unassign_user(station, user));
                tracing::info!("Unassigned user {} from station {}", user, station);
                self.refresh_user_stations(user).await;
                Outcome::Committed
            }
            Err(error) => self.fail("unassign_user_from_station", &error),
        }
    }

    /// Users staffing `station`
    #[must_use]
    pub fn station_users(&self, station: &str) -> Vec<UserName> {
        self.read(|state| state.station_users(station))
    }

    // --- Roles -----------------------------------------------------------

    /// Grant `role` to the locally known user `user`
    pub async fn grant_role(&self, user: &str, role: &str) -> Outcome {
        const ACTION: &str = "grant_role";
        if !self.read(|state| state.contains_entity(EntityKind::User, user)) {
            return self.fail(ACTION, &SyncError::not_found(EntityKind::User, user));
        }

        match self
            .backend
            .post(&paths::user_roles(user), json!({ "name": role }))
            .await
        {
            Ok(_) => {
                self.commit(|state| {
                    if let Some(record) = state.store.users.find_mut(user) {
                        record.roles.insert(role.to_string());
                    }
                });
                tracing::info!("Granted role {} to {}", role, user);
                Outcome::Committed
            }
            Err(error) => self.fail(ACTION, &error),
        }
    }

    /// Revoke `role` from `user`
    pub async fn revoke_role(&self, user: &str, role: &str) -> Outcome {
        match self.backend.delete(&paths::user_role(user, role)).await {
            Ok(_) => {
                self.commit(|state| {
                    if let Some(record) = state.store.users.find_mut(user) {
                        record.roles.remove(role);
                    }
                });
                tracing::info!("Revoked role {} from {}", role, user);
                Outcome::Committed
            }
            Err(error) => self.fail("revoke_role", &error),
        }
    }

    // --- Commit helpers --------------------------------------------------

    fn commit<R>(&self, f: impl FnOnce(&mut SyncState) -> R) -> R {
        f(&mut self.state.write())
    }

    /// Apply `f` only if `generation` is still the newest for `resource`
    fn commit_latest(
        &self,
        resource: &Resource,
        generation: Generation,
        f: impl FnOnce(&mut SyncState),
    ) -> Outcome {
        let mut state = self.state.write();
        if !self.generations.is_current(resource, generation) {
            tracing::debug!(
                "Discarding stale {} response (generation {})",
                resource,
                generation.value()
            );
            return Outcome::Stale;
        }
        f(&mut state);
        Outcome::Committed
    }

    fn fail(&self, action: &str, error: &SyncError) -> Outcome {
        tracing::warn!("Action {} failed: {}", action, error);
        self.state.write().log_error(action, error);
        Outcome::Failed
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, SyncError> {
    serde_json::from_value(body).map_err(SyncError::from)
}

fn encode<T: Serialize>(value: &T) -> Result<Value, SyncError> {
    serde_json::to_value(value).map_err(SyncError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use powsync_core::ErrorKind;
    use std::collections::BTreeMap;

    mockall::mock! {
        pub Api {}

        #[async_trait]
        impl Backend for Api {
            async fn get(&self, path: &str) -> Result<Value, SyncError>;
            async fn post(&self, path: &str, body: Value) -> Result<Value, SyncError>;
            async fn delete(&self, path: &str) -> Result<Value, SyncError>;
        }
    }

    #[tokio::test]
    async fn create_failure_logs_once_and_keeps_collection() {
        let mut api = MockApi::new();
        api.expect_post()
            .withf(|path, _| path == "/team")
            .times(1)
            .returning(|_, _| {
                let mut fields = BTreeMap::new();
                fields.insert("name".to_string(), "required".to_string());
                Err(SyncError::Validation {
                    status: 400,
                    fields,
                })
            });

        let client = SyncClient::new(api);
        let outcome = client.create_team(Team::new("")).await;

        assert_eq!(outcome, Outcome::Failed);
        assert!(client.read(|s| s.store.teams.is_empty()));

        let errors = client.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].action, "create_team");
        assert_eq!(errors[0].fields["name"], "required");
    }

    #[tokio::test]
    async fn assigning_unknown_team_never_hits_backend() {
        let mut api = MockApi::new();
        api.expect_post().never();

        let client = SyncClient::new(api);
        let outcome = client.assign_team("R1", "ghost").await;

        assert_eq!(outcome, Outcome::Failed);
        let errors = client.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn granting_role_to_unknown_user_never_hits_backend() {
        let mut api = MockApi::new();
        api.expect_post().never();

        let client = SyncClient::new(api);
        assert_eq!(client.grant_role("ghost", "admin").await, Outcome::Failed);
        assert_eq!(client.errors()[0].kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn staffing_unknown_user_never_hits_backend() {
        let mut api = MockApi::new();
        api.expect_post().never();

        let client = SyncClient::new(api);
        let outcome = client.assign_user_to_station("S1", "ghost").await;

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(client.errors()[0].action, "assign_user_to_station");
        assert_eq!(client.errors()[0].kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn dashboard_must_be_a_list() {
        let mut api = MockApi::new();
        api.expect_get()
            .withf(|path| path == "/station/S1/dashboard")
            .times(1)
            .returning(|_| Ok(json!({"rows": []})));

        let client = SyncClient::new(api);
        assert_eq!(client.fetch_dashboard("S1").await, Outcome::Failed);
        assert!(client.dashboard().is_none());
        assert_eq!(client.errors()[0].kind, ErrorKind::Decode);
    }

    #[tokio::test]
    async fn refresh_teams_replaces_collection() {
        let mut api = MockApi::new();
        api.expect_get()
            .withf(|path| path == "/team")
            .times(1)
            .returning(|_| Ok(json!({"items": [{"name": "A"}, {"name": "B"}]})));

        let mut initial = SyncState::new();
        initial.store.teams.append(Team::new("old"));
        let client = SyncClient::with_state(Arc::new(api), initial);

        assert_eq!(client.refresh_teams().await, Outcome::Committed);
        assert_eq!(client.read(|s| s.store.teams.names()), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn revoke_role_updates_user() {
        let mut api = MockApi::new();
        api.expect_delete()
            .withf(|path| path == "/user/jane/roles/admin")
            .times(1)
            .returning(|_| Ok(Value::Null));

        let mut initial = SyncState::new();
        initial
            .store
            .users
            .append(User::new("jane").with_role("admin").with_role("station"));
        let client = SyncClient::with_state(Arc::new(api), initial);

        assert_eq!(client.revoke_role("jane", "admin").await, Outcome::Committed);
        let roles = client.read(|s| s.store.users.find("jane").unwrap().roles.clone());
        assert_eq!(roles.into_iter().collect::<Vec<_>>(), vec!["station"]);
    }

    #[tokio::test]
    async fn take_state_hands_over_and_resets() {
        let mut api = MockApi::new();
        api.expect_post().never();
        let client = SyncClient::new(api);
        client.grant_role("ghost", "admin").await;

        let state = client.take_state();

        assert_eq!(state.errors.len(), 1);
        assert!(client.errors().is_empty());
    }

    #[test]
    fn client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncClient<MockApi>>();
    }

    #[test]
    fn summary_counts_failures() {
        let summary = RefreshSummary {
            users: Outcome::Committed,
            teams: Outcome::Failed,
            routes: Outcome::Stale,
            stations: Outcome::Committed,
            assignments: Outcome::Failed,
        };
        assert_eq!(summary.failures(), 2);
        assert!(!summary.all_committed());
    }
}
