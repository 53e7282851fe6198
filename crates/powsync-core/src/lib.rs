//! powsync core - client-side mirror of the Powonline backend
//!
//! Holds the state a race-management front-end works from:
//! - Entity collections (teams, stations, routes, users)
//! - The assignment index (team -> route, route -> stations)
//! - The latest station dashboard
//! - An append-only log of failed actions
//!
//! plus the derived views computed from them and the [`Backend`] capability
//! the sync actions use to reach the server.
//!
//! # Example
//!
//! ```rust
//! use powsync_core::{AssignmentPayload, Station, SyncState, Team};
//!
//! let mut state = SyncState::new();
//! state.store.teams.replace_all(vec![Team::new("A"), Team::new("B")]);
//! state.replace_assignments(
//!     &AssignmentPayload::new()
//!         .with_team("R1", Team::new("A"))
//!         .with_station("R1", Station::new("S1")),
//! );
//!
//! assert_eq!(state.assigned_teams("R1"), vec!["A"]);
//! assert_eq!(state.unassigned_teams(), vec!["B"]);
//! assert_eq!(state.assigned_stations("R1"), vec!["S1"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod assignment;
pub mod backend;
pub mod dashboard;
pub mod error;
pub mod error_log;
pub mod state;
pub mod store;
pub mod types;
pub mod views;

// Re-exports
pub use assignment::AssignmentIndex;
pub use backend::Backend;
pub use dashboard::{DashboardSnapshot, GlobalDashboard};
pub use error::{ErrorKind, SyncError};
pub use error_log::{ErrorEntry, ErrorLog};
pub use state::SyncState;
pub use store::{Collection, EntityStore};
pub use types::{
    AssignmentPayload, Attributes, EntityKind, Listing, Named, Route, RouteName, Station,
    StationName, Team, TeamName, User, UserName,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the sync store
    pub use crate::{
        AssignmentIndex, AssignmentPayload, Backend, EntityKind, Named, Route, Station, SyncError,
        SyncState, Team, User,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
