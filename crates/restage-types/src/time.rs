//! The timeline's scalar time value.
//!
//! A [`Timestamp`] is an opaque, totally-ordered `u64`. The library never
//! interprets the units -- ticks, milliseconds, frame numbers -- it only
//! compares. [`Timestamp::ZERO`] is the distinguished origin that anchors
//! the sentinel snapshot at the start of every timeline.

use serde::{Deserialize, Serialize};

/// A totally-ordered point in simulation time.
///
/// Equality and ordering are the only operations; no arithmetic is
/// exposed. [`Timestamp::ZERO`] compares less than every positive
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The origin of time; no event can predate it.
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from its raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the inner `u64` value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Return whether this timestamp is the origin.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<Timestamp> for u64 {
    fn from(at: Timestamp) -> Self {
        at.0
    }
}
