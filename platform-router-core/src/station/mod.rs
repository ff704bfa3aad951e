//! Station-level analysis: which platforms exist, which services call at
//! them, and where along a platform to stand.

pub mod catalog;
pub mod door;
pub mod orientation;
pub mod spine;

pub use catalog::{build_catalog, resolve_platform_number};
pub use door::{DoorPosition, project_door};
pub use orientation::{next_stop, orient_spine};
pub use spine::SpineResolver;
