//! Walking search over the pedestrian graph and transfer planning

mod dijkstra;
pub mod shortest_path;
pub mod transfer;

pub use shortest_path::{WalkingPath, shortest_path_between};
pub use transfer::{PlatformPosition, RouteSelection, TransferPlan, egress_nodes, plan_transfer};
