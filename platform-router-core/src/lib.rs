//! Pedestrian transfer routing between the platforms of a rail station.
//!
//! Builds a walking graph and a rail proximity index from an OSM snapshot,
//! reduces platforms to the edge facing the tracks, and finds the shortest
//! walk between two platforms together with the door position on each.

pub mod cancel;
pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod session;
pub mod station;

pub use cancel::Cancellation;
pub use error::Error;
