//! Assignment index
//!
//! Flattened view of the server's assignments:
//! - `team_to_route`: which route a team is on (at most one)
//! - `route_to_stations`: which stations a route has, in order
//! - `station_to_users`: which users staff a station
//!
//! The full rebuild and the incremental edits go through the same
//! primitives (`link_*` / `unlink_*`), so an incrementally edited index
//! always has the shape a rebuild from the equivalent payload would produce:
//! - a team maps to exactly one route name
//! - a route's station list is unique by name and never empty
//! - a station's user set is never empty
//!
//! `GET /assignments` only carries the route relations, so a payload rebuild
//! leaves station staffing alone; that relation is replaced per user.

use crate::types::{
    AssignmentPayload, RouteName, Station, StationName, Team, TeamName, UserName,
};
use std::collections::{BTreeMap, BTreeSet};

/// Derived team/station -> route and user -> station relations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentIndex {
    team_to_route: BTreeMap<TeamName, RouteName>,
    route_to_stations: BTreeMap<RouteName, Vec<Station>>,
    station_to_users: BTreeMap<StationName, BTreeSet<UserName>>,
}

impl AssignmentIndex {
    /// Create empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a nested payload
    #[must_use]
    pub fn from_payload(payload: &AssignmentPayload) -> Self {
        let mut index = Self::new();
        index.rebuild_from_payload(payload);
        index
    }

    /// Discard the route relations and rebuild them from `payload`
    ///
    /// If the payload lists a team under two routes, the later route (in
    /// route-name order) wins; the backend guarantees this does not happen.
    pub fn rebuild_from_payload(&mut self, payload: &AssignmentPayload) {
        self.team_to_route.clear();
        self.route_to_stations.clear();

        for (route, teams) in &payload.teams {
            for team in teams {
                self.link_team(&team.name, route);
            }
        }

        for (route, stations) in &payload.stations {
            for station in stations {
                self.link_station(route, station.clone());
            }
        }
    }

    /// Assign `team` to `route`, replacing any previous route of that team
    pub fn assign_team(&mut self, route: &str, team: &Team) {
        self.link_team(&team.name, route);
    }

    /// Remove `team` from `route`
    ///
    /// Returns `false` (and leaves the index untouched) when the team is not
    /// currently on `route`.
    pub fn unassign_team(&mut self, route: &str, team: &str) -> bool {
        self.unlink_team(team, route)
    }

    /// Add `station` to the end of `route`'s station list
    ///
    /// A station already on the route is updated in place.
    pub fn assign_station(&mut self, route: &str, station: Station) {
        self.link_station(route, station);
    }

    /// Remove the station named `station` from `route`
    pub fn unassign_station(&mut self, route: &str, station: &str) -> bool {
        self.unlink_station(route, station)
    }

    /// Put `user` on `station`
    pub fn assign_user(&mut self, station: &str, user: &str) {
        self.link_user(station, user);
    }

    /// Take `user` off `station`
    pub fn unassign_user(&mut self, station: &str, user: &str) -> bool {
        self.unlink_user(station, user)
    }

    /// Make `stations` the complete set of stations staffed by `user`
    pub fn replace_user_stations<I, S>(&mut self, user: &str, stations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for station in self.stations_of_user(user) {
            self.unlink_user(&station, user);
        }
        for station in stations {
            self.link_user(station.as_ref(), user);
        }
    }

    /// Drop every assignment
    pub fn clear(&mut self) {
        self.team_to_route.clear();
        self.route_to_stations.clear();
        self.station_to_users.clear();
    }

    /// Route the team is assigned to
    #[must_use]
    pub fn route_of_team(&self, team: &str) -> Option<&str> {
        self.team_to_route.get(team).map(String::as_str)
    }

    /// Check if a team is assigned to any route
    #[inline]
    #[must_use]
    pub fn is_team_assigned(&self, team: &str) -> bool {
        self.team_to_route.contains_key(team)
    }

    /// Teams on `route`, in team-name order
    #[must_use]
    pub fn teams_on_route(&self, route: &str) -> Vec<TeamName> {
        self.team_to_route
            .iter()
            .filter(|(_, assigned)| assigned.as_str() == route)
            .map(|(team, _)| team.clone())
            .collect()
    }

    /// Stations on `route`, in assignment order (empty when unknown)
    #[must_use]
    pub fn stations_on_route(&self, route: &str) -> &[Station] {
        self.route_to_stations
            .get(route)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Names of the stations on `route`
    #[must_use]
    pub fn station_names_on_route(&self, route: &str) -> Vec<StationName> {
        self.stations_on_route(route)
            .iter()
            .map(|station| station.name.clone())
            .collect()
    }

    /// Users staffing `station`, in name order
    #[must_use]
    pub fn users_at_station(&self, station: &str) -> Vec<UserName> {
        self.station_to_users
            .get(station)
            .map(|users| users.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Stations staffed by `user`, in name order
    #[must_use]
    pub fn stations_of_user(&self, user: &str) -> Vec<StationName> {
        self.station_to_users
            .iter()
            .filter(|(_, users)| users.contains(user))
            .map(|(station, _)| station.clone())
            .collect()
    }

    /// Full station -> users mapping
    #[inline]
    #[must_use]
    pub fn station_users(&self) -> &BTreeMap<StationName, BTreeSet<UserName>> {
        &self.station_to_users
    }

    /// Full team -> route mapping
    #[inline]
    #[must_use]
    pub fn team_routes(&self) -> &BTreeMap<TeamName, RouteName> {
        &self.team_to_route
    }

    /// Full route -> stations mapping
    #[inline]
    #[must_use]
    pub fn route_stations(&self) -> &BTreeMap<RouteName, Vec<Station>> {
        &self.route_to_stations
    }

    /// Check if nothing is assigned
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.team_to_route.is_empty()
            && self.route_to_stations.is_empty()
            && self.station_to_users.is_empty()
    }

    fn link_team(&mut self, team: &str, route: &str) {
        self.team_to_route.insert(team.to_string(), route.to_string());
    }

    fn unlink_team(&mut self, team: &str, route: &str) -> bool {
        match self.team_to_route.get(team) {
            Some(current) if current == route => {
                self.team_to_route.remove(team);
                true
            }
            _ => false,
        }
    }

    fn link_station(&mut self, route: &str, station: Station) {
        let stations = self.route_to_stations.entry(route.to_string()).or_default();
        match stations.iter_mut().find(|s| s.name == station.name) {
            Some(existing) => *existing = station,
            None => stations.push(station),
        }
    }

    fn unlink_station(&mut self, route: &str, station: &str) -> bool {
        let Some(stations) = self.route_to_stations.get_mut(route) else {
            return false;
        };
        let Some(idx) = stations.iter().position(|s| s.name == station) else {
            return false;
        };
        stations.remove(idx);
        if stations.is_empty() {
            self.route_to_stations.remove(route);
        }
        true
    }

    fn link_user(&mut self, station: &str, user: &str) {
        self.station_to_users
            .entry(station.to_string())
            .or_default()
            .insert(user.to_string());
    }

    fn unlink_user(&mut self, station: &str, user: &str) -> bool {
        let Some(users) = self.station_to_users.get_mut(station) else {
            return false;
        };
        if !users.remove(user) {
            return false;
        }
        if users.is_empty() {
            self.station_to_users.remove(station);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_payload() -> AssignmentPayload {
        AssignmentPayload::new()
            .with_team("R1", Team::new("A"))
            .with_team("R1", Team::new("B"))
            .with_team("R2", Team::new("C"))
            .with_station("R1", Station::new("S1"))
            .with_station("R1", Station::new("S2"))
    }

    #[test]
    fn rebuild_inverts_team_relation() {
        let index = AssignmentIndex::from_payload(&sample_payload());

        assert_eq!(index.route_of_team("A"), Some("R1"));
        assert_eq!(index.route_of_team("C"), Some("R2"));
        assert_eq!(index.teams_on_route("R1"), vec!["A", "B"]);
        assert_eq!(index.station_names_on_route("R1"), vec!["S1", "S2"]);
        assert!(index.stations_on_route("R2").is_empty());
    }

    #[test]
    fn rebuild_discards_previous_state() {
        let mut index = AssignmentIndex::from_payload(&sample_payload());
        index.assign_team("R9", &Team::new("Z"));

        index.rebuild_from_payload(&AssignmentPayload::new().with_team("R2", Team::new("A")));

        assert_eq!(index.team_routes().len(), 1);
        assert_eq!(index.route_of_team("A"), Some("R2"));
        assert!(index.route_stations().is_empty());
    }

    #[test]
    fn rebuild_skips_empty_station_lists() {
        let mut payload = AssignmentPayload::new();
        payload.stations.insert("R1".to_string(), Vec::new());

        let index = AssignmentIndex::from_payload(&payload);
        assert!(index.is_empty());
    }

    #[test]
    fn duplicate_team_last_route_wins() {
        let payload = AssignmentPayload::new()
            .with_team("R1", Team::new("A"))
            .with_team("R2", Team::new("A"));

        let index = AssignmentIndex::from_payload(&payload);
        assert_eq!(index.route_of_team("A"), Some("R2"));
    }

    #[test]
    fn incremental_matches_rebuild() {
        let mut incremental = AssignmentIndex::new();
        incremental.assign_team("R1", &Team::new("A"));
        incremental.assign_team("R1", &Team::new("B"));
        incremental.assign_team("R2", &Team::new("C"));
        incremental.assign_station("R1", Station::new("S1"));
        incremental.assign_station("R1", Station::new("S2"));

        assert_eq!(incremental, AssignmentIndex::from_payload(&sample_payload()));
    }

    #[test]
    fn reassigning_team_moves_it() {
        let mut index = AssignmentIndex::new();
        index.assign_team("R1", &Team::new("A"));
        index.assign_team("R2", &Team::new("A"));

        assert!(index.teams_on_route("R1").is_empty());
        assert_eq!(index.teams_on_route("R2"), vec!["A"]);
    }

    #[test]
    fn unassign_team_removes_mapping() {
        let mut index = AssignmentIndex::from_payload(&sample_payload());

        assert!(index.unassign_team("R1", "A"));
        assert!(!index.is_team_assigned("A"));
        assert_eq!(index.teams_on_route("R1"), vec!["B"]);
    }

    #[test]
    fn unassign_team_from_other_route_is_noop() {
        let mut index = AssignmentIndex::from_payload(&sample_payload());
        let before = index.clone();

        assert!(!index.unassign_team("R2", "A"));
        assert!(!index.unassign_team("R1", "ghost"));
        assert_eq!(index, before);
    }

    #[test]
    fn assign_then_unassign_round_trips() {
        let original = AssignmentIndex::from_payload(&sample_payload());
        let mut index = original.clone();

        index.assign_team("R2", &Team::new("D"));
        index.unassign_team("R2", "D");
        index.assign_station("R3", Station::new("S9"));
        index.unassign_station("R3", "S9");

        assert_eq!(index, original);
    }

    #[test]
    fn assign_station_twice_keeps_one_entry() {
        let mut index = AssignmentIndex::new();
        index.assign_station("R1", Station::new("S1"));
        index.assign_station("R1", Station::new("S2"));
        index.assign_station(
            "R1",
            Station::new("S1").with_attribute("order", serde_json::json!(10)),
        );

        assert_eq!(index.station_names_on_route("R1"), vec!["S1", "S2"]);
        assert_eq!(
            index.stations_on_route("R1")[0].attributes.get("order"),
            Some(&serde_json::json!(10))
        );
    }

    #[test]
    fn unassign_last_station_drops_route() {
        let mut index = AssignmentIndex::new();
        index.assign_station("R1", Station::new("S1"));

        assert!(index.unassign_station("R1", "S1"));
        assert!(index.route_stations().is_empty());
        assert!(!index.unassign_station("R1", "S1"));
    }

    #[test]
    fn users_staff_stations() {
        let mut index = AssignmentIndex::new();
        index.assign_user("S1", "jane");
        index.assign_user("S1", "admin");
        index.assign_user("S2", "jane");
        index.assign_user("S1", "jane");

        assert_eq!(index.users_at_station("S1"), vec!["admin", "jane"]);
        assert_eq!(index.stations_of_user("jane"), vec!["S1", "S2"]);
        assert!(index.users_at_station("S3").is_empty());
    }

    #[test]
    fn unassign_last_user_drops_station() {
        let mut index = AssignmentIndex::new();
        index.assign_user("S1", "jane");

        assert!(!index.unassign_user("S1", "admin"));
        assert!(index.unassign_user("S1", "jane"));
        assert!(index.is_empty());
        assert!(!index.unassign_user("S1", "jane"));
    }

    #[test]
    fn replace_user_stations_swaps_whole_set() {
        let mut index = AssignmentIndex::new();
        index.assign_user("S1", "jane");
        index.assign_user("S2", "jane");
        index.assign_user("S2", "admin");

        index.replace_user_stations("jane", ["S3"]);

        assert_eq!(index.stations_of_user("jane"), vec!["S3"]);
        assert_eq!(index.users_at_station("S2"), vec!["admin"]);
        assert!(!index.station_users().contains_key("S1"));
    }

    #[test]
    fn rebuild_keeps_station_staffing() {
        let mut index = AssignmentIndex::from_payload(&sample_payload());
        index.assign_user("S1", "jane");

        index.rebuild_from_payload(&AssignmentPayload::new());

        assert!(index.team_routes().is_empty());
        assert_eq!(index.users_at_station("S1"), vec!["jane"]);
    }

    #[test]
    fn station_may_serve_several_routes() {
        let mut index = AssignmentIndex::new();
        index.assign_station("R1", Station::new("S1"));
        index.assign_station("R2", Station::new("S1"));

        assert_eq!(index.station_names_on_route("R1"), vec!["S1"]);
        assert_eq!(index.station_names_on_route("R2"), vec!["S1"]);
    }
}
