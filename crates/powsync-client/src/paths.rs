//! Backend endpoint paths
//!
//! Names are percent-encoded before they become path segments.

use powsync_core::EntityKind;

/// Nested assignments
pub const ASSIGNMENTS: &str = "/assignments";

/// Race-wide dashboard
pub const GLOBAL_DASHBOARD: &str = "/dashboard";

/// Job queue (state advance, scoring)
pub const JOB: &str = "/job";

fn segment(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}

/// `/{collection}/{name}`
#[must_use]
pub fn entity(kind: EntityKind, name: &str) -> String {
    format!("{}/{}", kind.collection_path(), segment(name))
}

/// `/station/{name}/dashboard`
#[must_use]
pub fn dashboard(station: &str) -> String {
    format!("/station/{}/dashboard", segment(station))
}

/// `/route/{name}/teams`
#[must_use]
pub fn route_teams(route: &str) -> String {
    format!("/route/{}/teams", segment(route))
}

/// `/route/{name}/teams/{team}`
#[must_use]
pub fn route_team(route: &str, team: &str) -> String {
    format!("{}/{}", route_teams(route), segment(team))
}

/// `/route/{name}/stations`
#[must_use]
pub fn route_stations(route: &str) -> String {
    format!("/route/{}/stations", segment(route))
}

/// `/route/{name}/stations/{station}`
#[must_use]
pub fn route_station(route: &str, station: &str) -> String {
    format!("{}/{}", route_stations(route), segment(station))
}

/// `/user/{name}/roles`
#[must_use]
pub fn user_roles(user: &str) -> String {
    format!("/user/{}/roles", segment(user))
}

/// `/user/{name}/roles/{role}`
#[must_use]
pub fn user_role(user: &str, role: &str) -> String {
    format!("{}/{}", user_roles(user), segment(role))
}

/// `/station/{name}/users`
#[must_use]
pub fn station_users(station: &str) -> String {
    format!("/station/{}/users", segment(station))
}

/// `/station/{name}/users/{user}`
#[must_use]
pub fn station_user(station: &str, user: &str) -> String {
    format!("{}/{}", station_users(station), segment(user))
}

/// `/user/{name}/stations`
#[must_use]
pub fn user_stations(user: &str) -> String {
    format!("/user/{}/stations", segment(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names() {
        assert_eq!(entity(EntityKind::Team, "A"), "/team/A");
        assert_eq!(dashboard("S1"), "/station/S1/dashboard");
        assert_eq!(route_team("R1", "A"), "/route/R1/teams/A");
        assert_eq!(route_station("R1", "S1"), "/route/R1/stations/S1");
        assert_eq!(user_role("jane", "admin"), "/user/jane/roles/admin");
        assert_eq!(station_user("S1", "jane"), "/station/S1/users/jane");
        assert_eq!(user_stations("jane"), "/user/jane/stations");
    }

    #[test]
    fn names_are_encoded() {
        assert_eq!(entity(EntityKind::Station, "Old Mill"), "/station/Old%20Mill");
        assert_eq!(route_teams("a/b"), "/route/a%2Fb/teams");
    }
}
