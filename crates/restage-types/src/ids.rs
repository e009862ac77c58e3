//! Type-safe identifier wrappers for timeline entities.
//!
//! Identifiers are plain `u64` values supplied by the embedder; the
//! newtype exists to prevent accidental mixing with timestamps and other
//! raw integers at compile time. Uniqueness within a stage is an
//! invariant the stage container enforces by construction (one entry per
//! id).

use serde::{Deserialize, Serialize};

/// Unique identifier for an actor within a stage.
///
/// The embedder chooses the numbering scheme; the library only compares
/// ids for equality and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Create an identifier from its raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the inner `u64` value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ActorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<ActorId> for u64 {
    fn from(id: ActorId) -> Self {
        id.0
    }
}
