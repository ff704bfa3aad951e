//! Platform records, services and spines

pub mod record;
pub mod service;
pub mod spine;

pub use record::{PlatformCatalog, PlatformRecord};
pub use service::{RouteKind, ServiceSummary};
pub use spine::PlatformSpine;
