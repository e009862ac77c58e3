//! Deterministic rollback timeline for simulated worlds.
//!
//! A consumer models a world as a set of identified actors holding
//! arbitrary state, submits timestamped events that mutate those actors,
//! and may insert events *in the past*. The observable state is always
//! the one that would result from applying every known event in strict
//! timestamp order, regardless of submission order. Periodic snapshots
//! pin a base state at a point in time so that a late insertion only
//! replays the events after the nearest preceding snapshot.
//!
//! # Architecture
//!
//! - [`actor`] -- The [`ActorState`] trait (deep clone + variant
//!   downcast) and the [`Actor`] that owns one state.
//! - [`stage`] -- The [`Stage`]: the id-to-actor map with deep-copy
//!   clone semantics. Snapshots never share mutable state.
//! - [`event`] -- The [`Event`] trait plus the [`StateSpecificEvent`]
//!   typed-dispatch adapter and the [`CallbackEvent`] transition
//!   reporter.
//! - [`snapshot`] -- A [`StageSnapshot`]: a base stage pinned at a
//!   begin time plus the ordered events anchored there.
//! - [`timeline`] -- The [`Timeline`] engine: locate, fast-path append,
//!   slow-path rebuild, snapshot creation, and retention.
//! - [`config`] -- The [`TimelinePolicy`] retention configuration.
//!
//! # Usage
//!
//! ```
//! use restage_core::{Actor, ActorState, Event, Stage, StateSpecificEvent, Timeline};
//! use restage_types::{ActorId, Timestamp};
//!
//! #[derive(Debug, Clone)]
//! struct Counter {
//!     value: i64,
//! }
//!
//! impl ActorState for Counter {
//!     fn boxed_clone(&self) -> Box<dyn ActorState> {
//!         Box::new(self.clone())
//!     }
//!     fn as_any(&self) -> &dyn std::any::Any {
//!         self
//!     }
//!     fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
//!         self
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct Spawn {
//!     when: Timestamp,
//!     target: ActorId,
//! }
//!
//! impl Event for Spawn {
//!     fn when(&self) -> Timestamp {
//!         self.when
//!     }
//!     fn target(&self) -> ActorId {
//!         self.target
//!     }
//!     fn apply(&mut self, stage: &mut Stage) -> bool {
//!         if stage.get(self.target).is_some() {
//!             return false;
//!         }
//!         stage.add(Actor::new(self.target, Box::new(Counter { value: 0 })));
//!         true
//!     }
//! }
//!
//! let mut timeline = Timeline::new();
//! let hero = ActorId::new(1);
//!
//! timeline.add(Box::new(Spawn { when: Timestamp::new(10), target: hero }));
//! timeline.add(Box::new(StateSpecificEvent::new(
//!     Timestamp::new(30),
//!     hero,
//!     |_stage: &mut Stage, counter: &mut Counter| {
//!         counter.value *= 2;
//!         true
//!     },
//! )));
//!
//! // A submission that logically happened earlier: the timeline
//! // re-executes, so the doubling now sees the incremented value.
//! timeline.add(Box::new(StateSpecificEvent::new(
//!     Timestamp::new(20),
//!     hero,
//!     |_stage: &mut Stage, counter: &mut Counter| {
//!         counter.value += 1;
//!         true
//!     },
//! )));
//!
//! let counter = timeline.live().get(hero).and_then(Actor::state_as::<Counter>);
//! assert_eq!(counter.map(|c| c.value), Some(2));
//! ```

pub mod actor;
pub mod config;
pub mod event;
pub mod snapshot;
pub mod stage;
pub mod timeline;

// Re-export primary types at crate root.
pub use actor::{Actor, ActorState};
pub use config::TimelinePolicy;
pub use event::{CallbackEvent, Event, StateSpecificEvent};
pub use snapshot::StageSnapshot;
pub use stage::Stage;
pub use timeline::Timeline;

use restage_types::Timestamp;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during timeline operations.
///
/// The timeline's only hard failure domain is the accept/reject decision
/// at the API boundary: an event-level precondition miss is an ordinary
/// `false` from [`Event::apply`], and an event older than the oldest
/// retained snapshot is an ordinary `false` from [`Timeline::add`].
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// `snapshot_at` was called with a timestamp that is not strictly
    /// greater than the newest snapshot's begin time.
    #[error("snapshot timestamp {at} is not after the newest snapshot begin {newest}")]
    NonMonotonicSnapshot {
        /// The rejected timestamp.
        at: Timestamp,
        /// The newest snapshot's begin time.
        newest: Timestamp,
    },
}
