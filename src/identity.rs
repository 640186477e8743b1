//! Identity bookkeeping for model objects.
//!
//! Every model object carries an identifier that is unique within its own
//! type (never globally). The [`Registry`] hands out fresh identifiers and
//! records identifiers rehydrated from a save document so the two never
//! collide within a session.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The concrete model types that participate in persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Direction,
    Gender,
    Item,
    Exit,
    Location,
    Person,
    Player,
    Game,
}

impl ModelKind {
    /// The fully-qualified type tag written into save documents.
    pub fn qualified_name(self) -> &'static str {
        match self {
            ModelKind::Direction => "adventure_core::models::Direction",
            ModelKind::Gender => "adventure_core::models::Gender",
            ModelKind::Item => "adventure_core::models::Item",
            ModelKind::Exit => "adventure_core::models::Exit",
            ModelKind::Location => "adventure_core::models::Location",
            ModelKind::Person => "adventure_core::models::Person",
            ModelKind::Player => "adventure_core::models::Player",
            ModelKind::Game => "adventure_core::models::Game",
        }
    }

    /// Reverse of [`qualified_name`](Self::qualified_name).
    pub fn from_qualified_name(name: &str) -> Option<Self> {
        let kind = match name {
            "adventure_core::models::Direction" => ModelKind::Direction,
            "adventure_core::models::Gender" => ModelKind::Gender,
            "adventure_core::models::Item" => ModelKind::Item,
            "adventure_core::models::Exit" => ModelKind::Exit,
            "adventure_core::models::Location" => ModelKind::Location,
            "adventure_core::models::Person" => ModelKind::Person,
            "adventure_core::models::Player" => ModelKind::Player,
            "adventure_core::models::Game" => ModelKind::Game,
            _ => return None,
        };
        Some(kind)
    }

    /// Short type name, used in error messages.
    pub fn short_name(self) -> &'static str {
        match self {
            ModelKind::Direction => "Direction",
            ModelKind::Gender => "Gender",
            ModelKind::Item => "Item",
            ModelKind::Exit => "Exit",
            ModelKind::Location => "Location",
            ModelKind::Person => "Person",
            ModelKind::Player => "Player",
            ModelKind::Game => "Game",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl Serialize for ModelKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.qualified_name())
    }
}

impl<'de> Deserialize<'de> for ModelKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KindVisitor;

        impl Visitor<'_> for KindVisitor {
            type Value = ModelKind;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a fully-qualified model type name")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ModelKind, E> {
                ModelKind::from_qualified_name(value).ok_or_else(|| {
                    E::invalid_value(de::Unexpected::Str(value), &"a known model type name")
                })
            }
        }

        deserializer.deserialize_str(KindVisitor)
    }
}

/// A (type, identifier) pair standing in for a model object inside a save
/// document. This is the only way one serialized record points at another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelRef {
    /// The fully-qualified type tag of the referenced object.
    #[serde(rename = "model_ref")]
    pub kind: ModelKind,

    /// The referenced object's type-scoped identifier.
    pub identifier: u64,
}

impl ModelRef {
    pub fn new(kind: ModelKind, identifier: u64) -> Self {
        Self { kind, identifier }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.identifier)
    }
}

/// Per-type auto-incrementing identifier counters, scoped to one game
/// session. Pass a registry into whatever scope constructs model objects (a
/// load, a fixture builder, a test) so identifiers never leak between
/// unrelated sessions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    counters: HashMap<ModelKind, u64>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next fresh identifier for `kind`.
    pub fn next(&mut self, kind: ModelKind) -> u64 {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Record an identifier assigned elsewhere (a loaded document), raising
    /// the counter floor so later fresh identifiers never collide with it.
    pub fn observe(&mut self, kind: ModelKind, identifier: u64) {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter = (*counter).max(identifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_starts_at_one_and_increments() {
        let mut registry = Registry::new();
        assert_eq!(registry.next(ModelKind::Item), 1);
        assert_eq!(registry.next(ModelKind::Item), 2);
        assert_eq!(registry.next(ModelKind::Item), 3);
    }

    #[test]
    fn counters_are_scoped_per_kind() {
        let mut registry = Registry::new();
        assert_eq!(registry.next(ModelKind::Item), 1);
        assert_eq!(registry.next(ModelKind::Location), 1);
        assert_eq!(registry.next(ModelKind::Item), 2);
        assert_eq!(registry.next(ModelKind::Location), 2);
    }

    #[test]
    fn observe_raises_the_floor() {
        let mut registry = Registry::new();
        registry.observe(ModelKind::Person, 1);
        registry.observe(ModelKind::Person, 5);
        registry.observe(ModelKind::Person, 9);
        assert_eq!(registry.next(ModelKind::Person), 10);
    }

    #[test]
    fn observe_never_lowers_the_counter() {
        let mut registry = Registry::new();
        registry.observe(ModelKind::Person, 9);
        registry.observe(ModelKind::Person, 5);
        assert_eq!(registry.next(ModelKind::Person), 10);
    }

    #[test]
    fn model_ref_equality_is_structural() {
        let a = ModelRef::new(ModelKind::Item, 3);
        let b = ModelRef::new(ModelKind::Item, 3);
        let c = ModelRef::new(ModelKind::Person, 3);
        let d = ModelRef::new(ModelKind::Item, 4);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn model_ref_wire_shape() {
        let reference = ModelRef::new(ModelKind::Location, 7);
        let value = serde_json::to_value(reference).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model_ref": "adventure_core::models::Location",
                "identifier": 7,
            })
        );
    }

    #[test]
    fn model_ref_round_trips_through_json() {
        let reference = ModelRef::new(ModelKind::Gender, 2);
        let text = serde_json::to_string(&reference).unwrap();
        let decoded: ModelRef = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, reference);
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let result: Result<ModelRef, _> = serde_json::from_str(
            r#"{"model_ref": "adventure_core::models::Dragon", "identifier": 1}"#,
        );
        assert!(result.is_err());
    }
}
