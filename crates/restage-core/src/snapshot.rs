//! A pinned base stage plus the ordered events anchored at it.
//!
//! A snapshot covers the half-open time range from its begin (inclusive)
//! to the next snapshot's begin (exclusive). Its base is the world as of
//! the begin instant: every event of every earlier snapshot applied,
//! none of its own. The event list stays sorted ascending by timestamp
//! with ties kept in insertion order, so equal-timestamp events replay
//! in submission order.

use restage_types::Timestamp;

use crate::event::Event;
use crate::stage::Stage;

/// A base stage pinned at a begin time, plus the events anchored here.
#[derive(Debug)]
pub struct StageSnapshot {
    /// Inclusive lower bound of the covered time range.
    begin: Timestamp,

    /// The stage as of `begin`, before any of `events`.
    base: Stage,

    /// Events in ascending timestamp order, stable on ties.
    events: Vec<Box<dyn Event>>,
}

impl StageSnapshot {
    /// Create a snapshot with an empty base stage.
    pub const fn new(begin: Timestamp) -> Self {
        Self {
            begin,
            base: Stage::new(),
            events: Vec::new(),
        }
    }

    /// Create a snapshot whose base is a deep copy of the given stage.
    pub fn with_base(begin: Timestamp, base: &Stage) -> Self {
        Self {
            begin,
            base: base.clone(),
            events: Vec::new(),
        }
    }

    /// Return the begin time.
    pub const fn begin(&self) -> Timestamp {
        self.begin
    }

    /// Borrow the base stage.
    pub const fn base(&self) -> &Stage {
        &self.base
    }

    /// Replace the base stage by move.
    pub fn set_base(&mut self, base: Stage) {
        self.base = base;
    }

    /// Insert an event at its sorted position.
    ///
    /// The insertion point is after every event with an equal or earlier
    /// timestamp, which keeps ties in submission order. Returns `true`
    /// iff the event landed at the end of the list, i.e. it is not older
    /// than any event already held -- the timeline uses this as its
    /// fast-path signal.
    pub fn add(&mut self, event: Box<dyn Event>) -> bool {
        let at = self
            .events
            .partition_point(|held| held.when() <= event.when());
        let is_newest = at == self.events.len();
        self.events.insert(at, event);
        is_newest
    }

    /// Read-only view of the held events.
    pub fn events(&self) -> &[Box<dyn Event>] {
        &self.events
    }

    /// Mutable view of the held events, for replay.
    pub(crate) fn events_mut(&mut self) -> &mut [Box<dyn Event>] {
        &mut self.events
    }

    /// Return the number of held events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return whether no events are held.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
