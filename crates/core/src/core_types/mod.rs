//! Core types: measurement units, factor levels and the environmental snapshot

pub mod levels;
pub mod snapshot;
pub mod units;

pub use levels::*;
pub use snapshot::{EnvironmentalSnapshot, SnapshotInput};
pub use units::*;
