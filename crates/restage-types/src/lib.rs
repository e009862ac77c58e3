//! Shared type definitions for the restage rollback timeline.
//!
//! This crate holds the plain value types that flow across the workspace:
//! strongly-typed identifiers and the timestamp scalar. It carries no
//! engine logic -- ordering, equality, display, and serde are the whole
//! surface.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers for timeline entities.
//! - [`time`] -- The [`Timestamp`] scalar and its `ZERO` origin.

pub mod ids;
pub mod time;

// Re-export all public types at crate root for convenience.
pub use ids::ActorId;
pub use time::Timestamp;
