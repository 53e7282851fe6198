//! Core types for the sync store
//!
//! Defines the records mirrored from the backend:
//! - Teams, stations, routes and users (keyed by name)
//! - The nested assignment payload served by `GET /assignments`
//! - Entity kinds and their collection paths

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Name of a team (the team's identity in every relation)
pub type TeamName = String;

/// Name of a station
pub type StationName = String;

/// Name of a route
pub type RouteName = String;

/// Name of a user
pub type UserName = String;

/// Server fields the client does not interpret, kept verbatim
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Anything stored in an entity collection
pub trait Named {
    /// Unique name of the record
    fn name(&self) -> &str;
}

/// Kind of entity collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Teams
    Team,
    /// Stations
    Station,
    /// Routes
    Route,
    /// Users
    User,
}

impl EntityKind {
    /// Collection path on the backend (`/team`, ...)
    #[inline]
    #[must_use]
    pub fn collection_path(self) -> &'static str {
        match self {
            EntityKind::Team => "/team",
            EntityKind::Station => "/station",
            EntityKind::Route => "/route",
            EntityKind::User => "/user",
        }
    }

    /// Lowercase label used in messages
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Team => "team",
            EntityKind::Station => "station",
            EntityKind::Route => "route",
            EntityKind::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A team taking part in the event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team name
    pub name: TeamName,
    /// Remaining server fields
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Team {
    /// Create a team with no extra attributes
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<TeamName>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// With an extra server attribute
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl Named for Team {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A checkpoint along a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station name
    pub name: StationName,
    /// Remaining server fields
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Station {
    /// Create a station with no extra attributes
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<StationName>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// With an extra server attribute
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl Named for Station {
    fn name(&self) -> &str {
        &self.name
    }
}

/// An ordered path through stations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Unique route name
    pub name: RouteName,
    /// Display color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Remaining server fields
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Route {
    /// Create a route without a color
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<RouteName>) -> Self {
        Self {
            name: name.into(),
            color: None,
            attributes: Attributes::new(),
        }
    }

    /// With display color
    #[inline]
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl Named for Route {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A user of the management tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique login name
    pub name: String,
    /// Granted roles
    #[serde(default)]
    pub roles: BTreeSet<String>,
    /// Remaining server fields
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl User {
    /// Create a user without roles
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: BTreeSet::new(),
            attributes: Attributes::new(),
        }
    }

    /// With role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Check role membership
    #[inline]
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

impl Named for User {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Envelope of collection listings: `{ "items": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing<T> {
    /// Listed records
    pub items: Vec<T>,
}

/// Nested assignments as served by the backend
///
/// Both relations are keyed by route name. Missing keys deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPayload {
    /// Route name -> teams on that route
    #[serde(default)]
    pub teams: BTreeMap<RouteName, Vec<Team>>,
    /// Route name -> stations on that route
    #[serde(default)]
    pub stations: BTreeMap<RouteName, Vec<Station>>,
}

impl AssignmentPayload {
    /// Create empty payload
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a team listed under a route
    #[must_use]
    pub fn with_team(mut self, route: impl Into<RouteName>, team: Team) -> Self {
        self.teams.entry(route.into()).or_default().push(team);
        self
    }

    /// With a station listed under a route
    #[must_use]
    pub fn with_station(mut self, route: impl Into<RouteName>, station: Station) -> Self {
        self.stations.entry(route.into()).or_default().push(station);
        self
    }
}
