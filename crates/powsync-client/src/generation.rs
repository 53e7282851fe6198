//! Request generations
//!
//! Each replace-type request takes a ticket for its resource before it is
//! sent. Its result may only be committed while that ticket is still the
//! newest one issued; anything older has been superseded and is dropped.

use dashmap::DashMap;
use powsync_core::{EntityKind, UserName};
use std::fmt;

/// Independently refreshed piece of client state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    /// User collection
    Users,
    /// Team collection
    Teams,
    /// Route collection
    Routes,
    /// Station collection
    Stations,
    /// Assignment index
    Assignments,
    /// Station dashboard
    Dashboard,
    /// Race-wide dashboard
    GlobalDashboard,
    /// Stations staffed by one user
    UserStations(UserName),
}

impl From<EntityKind> for Resource {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::User => Resource::Users,
            EntityKind::Team => Resource::Teams,
            EntityKind::Route => Resource::Routes,
            EntityKind::Station => Resource::Stations,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Resource::Users => "users",
            Resource::Teams => "teams",
            Resource::Routes => "routes",
            Resource::Stations => "stations",
            Resource::Assignments => "assignments",
            Resource::Dashboard => "dashboard",
            Resource::GlobalDashboard => "global dashboard",
            Resource::UserStations(user) => return write!(f, "stations of {user}"),
        };
        f.write_str(label)
    }
}

/// Ticket for one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// Numeric value
    #[inline]
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Latest generation issued per resource
#[derive(Debug, Default)]
pub struct Generations {
    latest: DashMap<Resource, u64>,
}

impl Generations {
    /// Create tracker with nothing issued
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket for `resource`
    pub fn begin(&self, resource: &Resource) -> Generation {
        let mut latest = self.latest.entry(resource.clone()).or_insert(0);
        *latest += 1;
        Generation(*latest)
    }

    /// Check `generation` is still the newest ticket for `resource`
    #[must_use]
    pub fn is_current(&self, resource: &Resource, generation: Generation) -> bool {
        self.latest
            .get(resource)
            .is_some_and(|latest| *latest == generation.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let generations = Generations::new();
        let first = generations.begin(&Resource::Teams);
        let second = generations.begin(&Resource::Teams);

        assert!(second > first);
        assert!(!generations.is_current(&Resource::Teams, first));
        assert!(generations.is_current(&Resource::Teams, second));
    }

    #[test]
    fn resources_are_independent() {
        let generations = Generations::new();
        let teams = generations.begin(&Resource::Teams);
        generations.begin(&Resource::Dashboard);

        assert!(generations.is_current(&Resource::Teams, teams));
        assert_eq!(Resource::from(EntityKind::Station), Resource::Stations);
    }

    #[test]
    fn user_station_tickets_are_per_user() {
        let generations = Generations::new();
        let jane = Resource::UserStations("jane".to_string());
        let joe = Resource::UserStations("joe".to_string());

        let ticket = generations.begin(&jane);
        generations.begin(&joe);

        assert!(generations.is_current(&jane, ticket));
        assert_eq!(jane.to_string(), "stations of jane");
    }
}
