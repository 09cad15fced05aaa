//! Routing matched records to output handles

mod capture;
mod router;
mod routing;

pub use capture::{CaptureRecord, ReplayStats, replay};
pub use router::{FileSinkRouter, SinkError, SinkRouter};
pub use routing::RoutingTable;
