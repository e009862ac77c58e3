//! The stage: a mapping from actor id to actor with deep-copy semantics.
//!
//! A stage exclusively owns every actor it contains, and every actor
//! exclusively owns its state, so a stage clone is a fully independent
//! world. Snapshots rely on this: no actor or state is ever shared by
//! reference between a snapshot base and the live stage.

use std::collections::BTreeMap;

use restage_types::ActorId;

use crate::actor::Actor;

/// The set of currently active actors, keyed by id.
///
/// Cloning a stage deep-clones every actor and therefore every state.
/// Iteration order is the id order and carries no semantic meaning.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    /// Actors keyed by their unique id.
    actors: BTreeMap<ActorId, Actor>,
}

impl Stage {
    /// Create an empty stage.
    pub const fn new() -> Self {
        Self {
            actors: BTreeMap::new(),
        }
    }

    /// Insert an actor, replacing (and dropping) any prior actor with the
    /// same id.
    pub fn add(&mut self, actor: Actor) {
        self.actors.insert(actor.id(), actor);
    }

    /// Remove and return the actor with the given id. A no-op returning
    /// `None` if the id is absent.
    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(&id)
    }

    /// Borrow the actor with the given id.
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Mutably borrow the actor with the given id.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Return whether an actor with the given id is present.
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    /// Return the number of actors on the stage.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Return whether the stage holds no actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Iterate over the actors in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::actor::ActorState;

    #[derive(Debug, Clone)]
    struct Counter {
        value: i64,
    }

    impl ActorState for Counter {
        fn boxed_clone(&self) -> Box<dyn ActorState> {
            Box::new(self.clone())
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    fn counter_actor(id: u64, value: i64) -> Actor {
        Actor::new(ActorId::new(id), Box::new(Counter { value }))
    }

    #[test]
    fn add_and_get() {
        let mut stage = Stage::new();
        assert!(stage.is_empty());

        stage.add(counter_actor(100, 5));
        assert_eq!(stage.len(), 1);
        assert!(stage.contains(ActorId::new(100)));

        let actor = stage.get(ActorId::new(100)).unwrap();
        assert_eq!(actor.state_as::<Counter>().unwrap().value, 5);
        assert!(stage.get(ActorId::new(101)).is_none());
    }

    #[test]
    fn add_overwrites_same_id() {
        let mut stage = Stage::new();
        stage.add(counter_actor(100, 1));
        stage.add(counter_actor(100, 2));

        assert_eq!(stage.len(), 1);
        let actor = stage.get(ActorId::new(100)).unwrap();
        assert_eq!(actor.state_as::<Counter>().unwrap().value, 2);
    }

    #[test]
    fn remove_is_noop_on_absent_id() {
        let mut stage = Stage::new();
        stage.add(counter_actor(100, 1));

        assert!(stage.remove(ActorId::new(999)).is_none());
        assert_eq!(stage.len(), 1);

        let removed = stage.remove(ActorId::new(100)).unwrap();
        assert_eq!(removed.id(), ActorId::new(100));
        assert!(stage.is_empty());

        // Removing again is still a no-op.
        assert!(stage.remove(ActorId::new(100)).is_none());
    }

    #[test]
    fn clone_is_deep() {
        let mut stage = Stage::new();
        stage.add(counter_actor(100, 10));
        stage.add(counter_actor(101, 20));

        let mut copy = stage.clone();
        copy.get_mut(ActorId::new(100))
            .unwrap()
            .state_as_mut::<Counter>()
            .unwrap()
            .value = 777;
        copy.remove(ActorId::new(101));

        // The original is untouched by any mutation of the clone.
        let original = stage.get(ActorId::new(100)).unwrap();
        assert_eq!(original.state_as::<Counter>().unwrap().value, 10);
        assert!(stage.contains(ActorId::new(101)));
        assert_eq!(stage.len(), 2);
        assert_eq!(copy.len(), 1);
    }

    #[test]
    fn iterates_in_id_order() {
        let mut stage = Stage::new();
        stage.add(counter_actor(30, 0));
        stage.add(counter_actor(10, 0));
        stage.add(counter_actor(20, 0));

        let ids: Vec<u64> = stage.iter().map(|a| a.id().into_inner()).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
