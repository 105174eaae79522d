//! Core library for the `bikeshare` CLI.
//!
//! This crate defines:
//! - The station feed client and its typed error taxonomy
//! - Great-circle distance ranking of stations
//! - The nearby-station resolver and the acquisition state machine
//! - The `Locator` and `Presenter` collaborator traits
//!
//! It is used by `bikeshare-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod distance;
pub mod feed;
pub mod locate;
pub mod machine;
pub mod model;
pub mod resolver;

pub use config::Config;
pub use distance::{haversine_distance_m, rank};
pub use feed::{DEFAULT_FEED_URL, FetchError, StationFeed, StationFeedClient};
pub use locate::{AuthorizationStatus, Locator, LocatorError};
pub use machine::{AcquisitionError, AcquisitionState, AcquisitionStateMachine, Presenter};
pub use model::{Coordinate, FeedSnapshot, RankedStation, StationRecord};
pub use resolver::NearbyStationResolver;
