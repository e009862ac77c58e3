//! Typed timeline configuration.
//!
//! The library does no I/O of its own; the policy is plain data with
//! serde support so an embedder can populate it from whatever
//! configuration layer it already has.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Retention policy for a timeline.
///
/// More snapshots make out-of-order insertions cheaper to replay but
/// grow memory linearly with the number of live actors per snapshot.
/// `max_snapshots` bounds that growth: when set, every snapshot creation
/// trims the timeline down to the most recent `max_snapshots` entries,
/// permanently dropping older snapshots and the events anchored in them.
/// Events older than the oldest retained begin are rejected on
/// submission from then on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePolicy {
    /// Maximum number of snapshots retained, oldest trimmed first.
    /// `None` retains everything.
    #[serde(default)]
    pub max_snapshots: Option<NonZeroUsize>,
}

impl TimelinePolicy {
    /// A policy that retains every snapshot. This is the default.
    pub const fn unbounded() -> Self {
        Self {
            max_snapshots: None,
        }
    }

    /// A policy that retains at most `max` snapshots.
    pub const fn retain_at_most(max: NonZeroUsize) -> Self {
        Self {
            max_snapshots: Some(max),
        }
    }
}
