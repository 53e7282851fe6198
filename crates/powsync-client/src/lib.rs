//! powsync client - sync actions over the Powonline REST API
//!
//! Wraps a [`powsync_core::SyncState`] in a shareable [`SyncClient`] whose
//! actions talk to the backend and commit the results locally:
//! - Full and per-collection refreshes, guarded against stale responses
//! - Create and delete of teams, routes, stations and users
//! - Team and station assignment to routes
//! - Station dashboard and scoring jobs
//! - User role management
//!
//! Failures never propagate out of an action; they land in the state's
//! error log.
//!
//! # Example
//!
//! ```rust,no_run
//! use powsync_client::{ClientConfig, HttpBackend, SyncClient};
//!
//! # async fn example() -> Result<(), powsync_client::ConfigError> {
//! let config = ClientConfig::new()
//!     .with_base_url("https://race.example.org/api")
//!     .with_token("secret");
//! let client = SyncClient::new(HttpBackend::new(&config)?);
//!
//! client.refresh_all().await;
//! for team in client.unassigned_teams() {
//!     println!("unassigned: {team}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod client;
pub mod config;
pub mod generation;
pub mod http;
pub mod paths;

// Re-exports
pub use client::{Outcome, RefreshSummary, SyncClient};
pub use config::{ClientConfig, ConfigError};
pub use generation::{Generation, Generations, Resource};
pub use http::HttpBackend;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the sync client
    pub use crate::{ClientConfig, HttpBackend, Outcome, SyncClient};
    pub use powsync_core::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
