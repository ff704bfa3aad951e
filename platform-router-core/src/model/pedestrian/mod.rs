//! Pedestrian network model

pub mod components;
pub mod network;

pub use components::{PedestrianEdge, PedestrianNode};
pub use network::PedestrianGraph;
