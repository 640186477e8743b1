//! Model objects making up the live game graph.
//!
//! Every model type carries a type-scoped identifier handed out by a
//! [`Registry`](crate::identity::Registry) and implements [`Persistable`],
//! the contract that flattens it into a wire record with
//! [`ModelRef`]s in place of edges to other objects.

pub mod game;
pub mod item;
pub mod location;
pub mod person;
pub mod player;

pub use game::{Game, GameRecord};
pub use item::{Item, ItemRecord};
pub use location::{Direction, DirectionRecord, Exit, ExitRecord, Location, LocationRecord};
pub use person::{Gender, GenderName, GenderRecord, Person, PersonRecord};
pub use player::{Player, PlayerRecord, VisibleObject};

use crate::identity::{ModelKind, ModelRef};
use thiserror::Error;

/// A model invariant was violated at construction, whether the object was
/// freshly created or rehydrated from a document. The object is never
/// observable in the violating state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown gender \"{given}\", expected one of {allowed:?}")]
    UnknownGender {
        given: String,
        allowed: &'static [&'static str],
    },
}

/// Capability implemented by every model type that appears in a save
/// document.
pub trait Persistable {
    /// Flat record type this model serializes into.
    type Record;

    const KIND: ModelKind;

    /// Type-scoped identifier.
    fn identifier(&self) -> u64;

    /// Project the current state into a flat record, substituting a
    /// [`ModelRef`] for every field that points at another model object.
    /// Pure; always succeeds.
    fn to_record(&self) -> Self::Record;

    /// The reference other records use to point at this object.
    fn model_ref(&self) -> ModelRef {
        ModelRef::new(Self::KIND, self.identifier())
    }
}

/// Model objects of the same type are the same entity iff their identifiers
/// match, regardless of being distinct in-memory instances.
macro_rules! identity_eq {
    ($model:ty) => {
        impl PartialEq for $model {
            fn eq(&self, other: &Self) -> bool {
                self.identifier == other.identifier
            }
        }

        impl Eq for $model {}
    };
}

pub(crate) use identity_eq;
