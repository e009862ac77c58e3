//! The timeline engine: ordered snapshots, the live stage, and the
//! insertion/replay protocol.
//!
//! A timeline always holds at least one snapshot -- the sentinel pinned
//! at [`Timestamp::ZERO`] -- and the begin times of its snapshots are
//! strictly increasing. The live stage equals the newest snapshot's base
//! with that snapshot's events applied, and every older snapshot's base
//! is the world as of its begin. Both invariants are re-established
//! after every insertion: in-order submissions append and apply in O(1)
//! stage work, out-of-order submissions rebuild every snapshot from the
//! insertion point forward.

use tracing::{debug, trace};

use restage_types::Timestamp;

use crate::config::TimelinePolicy;
use crate::event::Event;
use crate::snapshot::StageSnapshot;
use crate::stage::Stage;
use crate::TimelineError;

/// The rollback engine: an ordered sequence of snapshots plus the
/// current observable stage.
#[derive(Debug)]
pub struct Timeline {
    /// Snapshots in strictly increasing begin order; never empty.
    snapshots: Vec<StageSnapshot>,

    /// The newest snapshot's base with its events applied.
    live: Stage,

    /// Retention policy applied after each snapshot creation.
    policy: TimelinePolicy,
}

impl Timeline {
    /// Create a timeline that retains every snapshot.
    pub fn new() -> Self {
        Self::with_policy(TimelinePolicy::unbounded())
    }

    /// Create a timeline with the given retention policy.
    ///
    /// The timeline starts with the sentinel snapshot at
    /// [`Timestamp::ZERO`], which catches every event until the first
    /// explicit snapshot is taken.
    pub fn with_policy(policy: TimelinePolicy) -> Self {
        Self {
            snapshots: vec![StageSnapshot::new(Timestamp::ZERO)],
            live: Stage::new(),
            policy,
        }
    }

    /// The current observable stage.
    pub const fn live(&self) -> &Stage {
        &self.live
    }

    /// Submit an event. Ownership passes to the timeline.
    ///
    /// Returns `false` iff the event is older than the oldest retained
    /// snapshot's begin -- history before that point has been discarded
    /// and cannot be revised. In every other case the event is inserted
    /// at its timestamp-ordered position (ties after equal timestamps)
    /// and the observable state is brought up to date: directly when the
    /// event is the newest known, by rebuilding the affected suffix of
    /// the timeline otherwise.
    pub fn add(&mut self, event: Box<dyn Event>) -> bool {
        let when = event.when();
        let Some(index) = self.locate(when) else {
            debug!(%when, oldest = %self.oldest_begin(), "event predates retained history; rejected");
            return false;
        };

        let newest_index = self.snapshots.len().saturating_sub(1);
        let at_end = match self.snapshots.get_mut(index) {
            Some(snapshot) => snapshot.add(event),
            None => return false,
        };

        if index == newest_index && at_end {
            trace!(%when, "in-order event; applying to live stage");
            // The event just landed at the end of the newest snapshot's
            // list; apply it to the live stage without replay.
            if let Some(snapshot) = self.snapshots.get_mut(newest_index) {
                if let Some(event) = snapshot.events_mut().last_mut() {
                    let _ = event.apply(&mut self.live);
                }
            }
        } else {
            debug!(
                %when,
                rebuilt = self.snapshots.len() - index,
                "out-of-order event; replaying from insertion point"
            );
            self.rebuild_from(index);
        }
        true
    }

    /// Pin the current live stage as the base of a new snapshot
    /// beginning at `at`.
    ///
    /// Events submitted later with timestamps at or after `at` anchor in
    /// the new snapshot; a late insertion older than `at` only forces a
    /// replay of the snapshots it precedes.
    ///
    /// If the policy bounds snapshot count, the oldest snapshots are
    /// trimmed afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::NonMonotonicSnapshot`] if `at` is not
    /// strictly greater than the newest snapshot's begin; accepting it
    /// would break the strictly-increasing begin invariant that the
    /// locate step relies on.
    pub fn snapshot_at(&mut self, at: Timestamp) -> Result<(), TimelineError> {
        let newest = self.newest_begin();
        if at <= newest {
            return Err(TimelineError::NonMonotonicSnapshot { at, newest });
        }

        self.snapshots.push(StageSnapshot::with_base(at, &self.live));
        if let Some(max) = self.policy.max_snapshots {
            self.limit_snapshots(max.get());
        }
        Ok(())
    }

    /// Retain only the most recent `count` snapshots; `count` is clamped
    /// to at least 1.
    ///
    /// Dropped snapshots take their events with them: that history can
    /// no longer be revised, and future submissions older than the new
    /// oldest begin are rejected.
    pub fn limit_snapshots(&mut self, count: usize) {
        let count = count.max(1);
        if self.snapshots.len() <= count {
            return;
        }
        let excess = self.snapshots.len() - count;
        self.snapshots.drain(..excess);
        debug!(
            dropped = excess,
            oldest = %self.oldest_begin(),
            "trimmed snapshots; older history is no longer revisable"
        );
    }

    /// Return the number of retained snapshots (always at least 1).
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Return the begin time of the oldest retained snapshot. Events
    /// older than this are rejected by [`add`](Timeline::add).
    pub fn oldest_begin(&self) -> Timestamp {
        self.snapshots.first().map_or(Timestamp::ZERO, StageSnapshot::begin)
    }

    /// Return the begin time of the newest snapshot.
    pub fn newest_begin(&self) -> Timestamp {
        self.snapshots.last().map_or(Timestamp::ZERO, StageSnapshot::begin)
    }

    /// Return the number of events currently retained across all
    /// snapshots.
    pub fn event_count(&self) -> usize {
        self.snapshots.iter().map(StageSnapshot::len).sum()
    }

    /// Find the index of the snapshot whose range covers `when`: the
    /// largest index whose begin is at or before `when`. An event whose
    /// timestamp equals a snapshot begin anchors in that snapshot, not
    /// the one before it. Returns `None` when `when` predates the oldest
    /// retained begin.
    fn locate(&self, when: Timestamp) -> Option<usize> {
        let upper = self
            .snapshots
            .partition_point(|snapshot| snapshot.begin() <= when);
        upper.checked_sub(1)
    }

    /// Re-establish base-correctness and live-correctness for every
    /// snapshot from `index` forward.
    ///
    /// Threads a working stage through the suffix: replay snapshot `k`'s
    /// events onto the working stage, move it in as snapshot `k+1`'s
    /// base, and continue from a fresh clone of that base. The final
    /// snapshot's replay result becomes the live stage. Event outcomes
    /// along the way are discarded; `CallbackEvent` wrappers observe
    /// their own transitions.
    fn rebuild_from(&mut self, index: usize) {
        let Some(newest_index) = self.snapshots.len().checked_sub(1) else {
            return;
        };

        let mut working = match self.snapshots.get(index) {
            Some(snapshot) => snapshot.base().clone(),
            None => return,
        };

        for k in index..newest_index {
            if let Some(snapshot) = self.snapshots.get_mut(k) {
                for event in snapshot.events_mut() {
                    let _ = event.apply(&mut working);
                }
            }
            if let Some(next) = self.snapshots.get_mut(k + 1) {
                next.set_base(working);
                working = next.base().clone();
            }
        }

        if let Some(newest) = self.snapshots.get_mut(newest_index) {
            for event in newest.events_mut() {
                let _ = event.apply(&mut working);
            }
        }
        self.live = working;
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
