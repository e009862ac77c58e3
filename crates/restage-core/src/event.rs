//! Events: timestamped, actor-targeted state mutators.
//!
//! An event is submitted to the timeline once and owned by it from then
//! on. It is *not* cloned across replays -- a single event value is
//! applied to many different stage values as history is re-executed, so
//! a plain event must be deterministic given the same input stage.
//! Cross-replay memory is reserved for the [`CallbackEvent`] adapter,
//! which uses it to report outcome transitions.

use core::fmt;
use std::marker::PhantomData;

use restage_types::{ActorId, Timestamp};

use crate::actor::ActorState;
use crate::stage::Stage;

/// A timestamped mutation of one target actor.
///
/// `apply` returns `true` when the event took effect and `false` on a
/// precondition miss (absent actor, wrong state variant, domain rule).
/// The return value is advisory: the timeline discards it except where
/// a [`CallbackEvent`] observes it. It must be deterministic for a given
/// input stage.
pub trait Event: fmt::Debug {
    /// The instant this event occurs at.
    fn when(&self) -> Timestamp;

    /// The actor this event targets.
    fn target(&self) -> ActorId;

    /// Apply the event to a stage. `apply` takes `&mut self` so that
    /// adapters can keep cross-replay memory; plain events must not
    /// depend on their own mutation.
    fn apply(&mut self, stage: &mut Stage) -> bool;
}

// ---------------------------------------------------------------------------
// StateSpecificEvent
// ---------------------------------------------------------------------------

/// An event that pre-resolves its target and downcasts the target's
/// state to a declared variant before running its behavior.
///
/// Resolution happens in two guarded steps: if the target actor is
/// absent, or its state is not of variant `S`, the event is a `false`
/// no-op. This removes per-event boilerplate and prevents silent writes
/// to the wrong variant.
///
/// While the behavior runs, the target actor is detached from the stage:
/// the `&mut Stage` argument exposes every *other* actor. The target is
/// reinserted afterwards, overwriting any same-id actor the behavior may
/// have added.
pub struct StateSpecificEvent<S, F> {
    /// The instant this event occurs at.
    when: Timestamp,

    /// The actor whose state is mutated.
    target: ActorId,

    /// The behavior run against the downcast state.
    behavior: F,

    _state: PhantomData<fn(S)>,
}

impl<S, F> StateSpecificEvent<S, F>
where
    S: ActorState,
    F: FnMut(&mut Stage, &mut S) -> bool,
{
    /// Create an event from its instant, target, and behavior.
    pub fn new(when: Timestamp, target: ActorId, behavior: F) -> Self {
        Self {
            when,
            target,
            behavior,
            _state: PhantomData,
        }
    }
}

impl<S, F> Event for StateSpecificEvent<S, F>
where
    S: ActorState,
    F: FnMut(&mut Stage, &mut S) -> bool,
{
    fn when(&self) -> Timestamp {
        self.when
    }

    fn target(&self) -> ActorId {
        self.target
    }

    fn apply(&mut self, stage: &mut Stage) -> bool {
        let Some(mut actor) = stage.remove(self.target) else {
            return false;
        };
        let applied = match actor.state_as_mut::<S>() {
            Some(state) => (self.behavior)(stage, state),
            None => false,
        };
        stage.add(actor);
        applied
    }
}

impl<S, F> fmt::Debug for StateSpecificEvent<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSpecificEvent")
            .field("when", &self.when)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// CallbackEvent
// ---------------------------------------------------------------------------

/// An event wrapper that reports outcome transitions to a sink.
///
/// On each application the inner event runs and produces a value. The
/// sink is invoked with `(target, value)` on the first application and
/// whenever the value differs from the previously recorded one. The
/// wrapper itself always returns `true`.
///
/// The recorded value survives replays on purpose: the sink observes
/// timeline-level transitions, not per-replay deltas. A late insertion
/// that flips the inner event's outcome fires the sink again, so the
/// sink is an at-least-once transition notifier, never an exactly-once
/// one.
pub struct CallbackEvent<C> {
    /// The wrapped event.
    inner: Box<dyn Event>,

    /// Outcome recorded by the most recent application.
    last: Option<bool>,

    /// Receives `(target, outcome)` on each transition.
    sink: C,
}

impl<C> CallbackEvent<C>
where
    C: FnMut(ActorId, bool),
{
    /// Wrap an event with a transition sink.
    pub fn wrap(inner: Box<dyn Event>, sink: C) -> Self {
        Self {
            inner,
            last: None,
            sink,
        }
    }
}

impl<C> Event for CallbackEvent<C>
where
    C: FnMut(ActorId, bool),
{
    fn when(&self) -> Timestamp {
        self.inner.when()
    }

    fn target(&self) -> ActorId {
        self.inner.target()
    }

    fn apply(&mut self, stage: &mut Stage) -> bool {
        let value = self.inner.apply(stage);
        if self.last != Some(value) {
            (self.sink)(self.inner.target(), value);
        }
        self.last = Some(value);
        true
    }
}

impl<C> fmt::Debug for CallbackEvent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackEvent")
            .field("inner", &self.inner)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}
