//! Polymorphic actor state and the actor that owns it.
//!
//! Concrete state types are defined by the embedder and are opaque to the
//! engine. The engine needs exactly two capabilities from a state: a deep
//! clone (snapshots must never share mutable storage) and a runtime
//! variant check (so a typed event can refuse to write to the wrong kind
//! of state). Both are expressed through the [`ActorState`] trait.

use std::any::Any;

use restage_types::ActorId;

/// A polymorphic per-actor payload.
///
/// Implementors supply a deep clone and the [`Any`] accessors used for
/// variant downcasting. The clone contract is strict: the returned value
/// must share no mutable storage with the original, so that mutating one
/// never affects the other.
///
/// For a state type that derives [`Clone`], the implementation is
/// mechanical:
///
/// ```
/// use restage_core::ActorState;
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     points: u32,
/// }
///
/// impl ActorState for Health {
///     fn boxed_clone(&self) -> Box<dyn ActorState> {
///         Box::new(self.clone())
///     }
///     fn as_any(&self) -> &dyn std::any::Any {
///         self
///     }
///     fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
///         self
///     }
/// }
/// ```
pub trait ActorState: Any + core::fmt::Debug {
    /// Produce an independent deep copy of this state.
    fn boxed_clone(&self) -> Box<dyn ActorState>;

    /// Borrow this state as [`Any`] for variant downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow this state as [`Any`] for variant downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn ActorState> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// An identified entity holding one exclusively-owned state.
///
/// Cloning an actor deep-clones its state.
#[derive(Debug, Clone)]
pub struct Actor {
    /// The actor's identifier, unique within its stage.
    id: ActorId,

    /// The owned state payload.
    state: Box<dyn ActorState>,
}

impl Actor {
    /// Create an actor from an id and a boxed state.
    pub fn new(id: ActorId, state: Box<dyn ActorState>) -> Self {
        Self { id, state }
    }

    /// Return the actor's identifier.
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Borrow the state payload.
    pub fn state(&self) -> &dyn ActorState {
        self.state.as_ref()
    }

    /// Mutably borrow the state payload.
    pub fn state_mut(&mut self) -> &mut dyn ActorState {
        self.state.as_mut()
    }

    /// Borrow the state downcast to a concrete variant, or `None` if the
    /// state is of a different variant.
    pub fn state_as<S: ActorState>(&self) -> Option<&S> {
        self.state.as_any().downcast_ref::<S>()
    }

    /// Mutably borrow the state downcast to a concrete variant, or `None`
    /// if the state is of a different variant.
    pub fn state_as_mut<S: ActorState>(&mut self) -> Option<&mut S> {
        self.state.as_any_mut().downcast_mut::<S>()
    }
}
