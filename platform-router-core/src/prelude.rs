// Re-export key components
pub use crate::cancel::Cancellation;
pub use crate::error::Error;
pub use crate::loading::{StationModelConfig, create_station_model};
pub use crate::model::{
    ElementId, MapSnapshot, NodeId, PlatformCatalog, PlatformRecord, PlatformSpine, RelationId,
    StationModel, WayId,
};
pub use crate::routing::{PlatformPosition, RouteSelection, TransferPlan, plan_transfer};
pub use crate::session::{SelectionReceiver, SelectionSender, run_session, selection_channel};
pub use crate::station::{DoorPosition, SpineResolver, build_catalog};
