//! Derived views
//!
//! Pure functions over the entity store and the assignment index. Nothing is
//! memoized; every call recomputes from source state.

use crate::assignment::AssignmentIndex;
use crate::store::EntityStore;
use crate::types::{StationName, TeamName, UserName};

/// Teams in the store that are not on any route, in store order
#[must_use]
pub fn unassigned_teams(store: &EntityStore, index: &AssignmentIndex) -> Vec<TeamName> {
    store
        .teams
        .iter()
        .filter(|team| !index.is_team_assigned(&team.name))
        .map(|team| team.name.clone())
        .collect()
}

/// Teams assigned to `route`
#[must_use]
pub fn assigned_teams(index: &AssignmentIndex, route: &str) -> Vec<TeamName> {
    index.teams_on_route(route)
}

/// Stations in the store that are not on `route`, in store order
#[must_use]
pub fn unassigned_stations(
    store: &EntityStore,
    index: &AssignmentIndex,
    route: &str,
) -> Vec<StationName> {
    let assigned = index.stations_on_route(route);
    store
        .stations
        .iter()
        .filter(|station| !assigned.iter().any(|s| s.name == station.name))
        .map(|station| station.name.clone())
        .collect()
}

/// Stations on `route`, in assignment order
#[must_use]
pub fn assigned_stations(index: &AssignmentIndex, route: &str) -> Vec<StationName> {
    index.station_names_on_route(route)
}

/// Users staffing `station`
#[must_use]
pub fn station_users(index: &AssignmentIndex, station: &str) -> Vec<UserName> {
    index.users_at_station(station)
}

/// Users in the store not staffing `station`, in store order
#[must_use]
pub fn users_not_at_station(
    store: &EntityStore,
    index: &AssignmentIndex,
    station: &str,
) -> Vec<UserName> {
    let staff = index.users_at_station(station);
    store
        .users
        .iter()
        .filter(|user| !staff.contains(&user.name))
        .map(|user| user.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssignmentPayload, Station, Team, User};
    use pretty_assertions::assert_eq;

    fn fixture() -> (EntityStore, AssignmentIndex) {
        let mut store = EntityStore::new();
        store
            .teams
            .replace_all(vec![Team::new("A"), Team::new("B"), Team::new("C")]);
        store
            .stations
            .replace_all(vec![Station::new("S1"), Station::new("S2")]);

        let index = AssignmentIndex::from_payload(
            &AssignmentPayload::new()
                .with_team("R1", Team::new("A"))
                .with_station("R1", Station::new("S1")),
        );
        (store, index)
    }

    #[test]
    fn single_assignment_views() {
        let (store, index) = fixture();

        assert_eq!(assigned_teams(&index, "R1"), vec!["A"]);
        assert_eq!(unassigned_teams(&store, &index), vec!["B", "C"]);
        assert_eq!(assigned_stations(&index, "R1"), vec!["S1"]);
        assert_eq!(unassigned_stations(&store, &index, "R1"), vec!["S2"]);
    }

    #[test]
    fn unknown_route_has_nothing_assigned() {
        let (store, index) = fixture();

        assert!(assigned_teams(&index, "R9").is_empty());
        assert!(assigned_stations(&index, "R9").is_empty());
        assert_eq!(unassigned_stations(&store, &index, "R9"), vec!["S1", "S2"]);
    }

    #[test]
    fn assigned_team_missing_from_store_is_still_listed() {
        let (mut store, index) = fixture();
        store.teams.remove_by_name("A");

        assert_eq!(assigned_teams(&index, "R1"), vec!["A"]);
        assert_eq!(unassigned_teams(&store, &index), vec!["B", "C"]);
    }

    #[test]
    fn station_staff_views() {
        let (mut store, mut index) = fixture();
        store
            .users
            .replace_all(vec![User::new("admin"), User::new("jane"), User::new("joe")]);
        index.assign_user("S1", "jane");

        assert_eq!(station_users(&index, "S1"), vec!["jane"]);
        assert_eq!(users_not_at_station(&store, &index, "S1"), vec!["admin", "joe"]);
        assert_eq!(users_not_at_station(&store, &index, "S2").len(), 3);
    }
}
