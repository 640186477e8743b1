//! The player: current location, inventory, score.

use crate::identity::{ModelKind, ModelRef, Registry};
use crate::models::{identity_eq, Item, Location, Persistable, Person};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// An item or person currently visible to the player.
#[derive(Debug, Clone, PartialEq)]
pub enum VisibleObject {
    Item(Rc<Item>),
    Person(Rc<Person>),
}

/// The current player.
#[derive(Debug)]
pub struct Player {
    identifier: u64,
    pub location: Rc<Location>,
    pub inventory: Vec<Rc<Item>>,
    pub score: u32,
}

identity_eq!(Player);

impl Player {
    /// Create a fresh player at `location` with an empty inventory.
    pub fn new(registry: &mut Registry, location: Rc<Location>) -> Self {
        Self {
            identifier: registry.next(ModelKind::Player),
            location,
            inventory: Vec::new(),
            score: 0,
        }
    }

    pub(crate) fn rehydrate(
        registry: &mut Registry,
        record: PlayerRecord,
        location: Rc<Location>,
        inventory: Vec<Rc<Item>>,
    ) -> Self {
        registry.observe(ModelKind::Player, record.identifier);
        Self {
            identifier: record.identifier,
            location,
            inventory,
            score: record.score,
        }
    }

    /// Find an item or person the player can currently see, matched by name
    /// or synonym: the current location's items and people, then the
    /// inventory.
    pub fn find_visible_object(&self, name: &str) -> Option<VisibleObject> {
        for item in self.location.items() {
            if item.is_called(name) {
                return Some(VisibleObject::Item(item));
            }
        }
        for person in self.location.people() {
            if person.is_called(name) {
                return Some(VisibleObject::Person(person));
            }
        }
        for item in &self.inventory {
            if item.is_called(name) {
                return Some(VisibleObject::Item(Rc::clone(item)));
            }
        }
        None
    }
}

impl Persistable for Player {
    type Record = PlayerRecord;

    const KIND: ModelKind = ModelKind::Player;

    fn identifier(&self) -> u64 {
        self.identifier
    }

    fn to_record(&self) -> PlayerRecord {
        PlayerRecord {
            location: self.location.model_ref(),
            inventory: self.inventory.iter().map(|i| i.model_ref()).collect(),
            score: self.score,
            identifier: self.identifier,
        }
    }
}

/// Flat wire form of a [`Player`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub location: ModelRef,
    pub inventory: Vec<ModelRef>,
    pub score: u32,
    #[serde(rename = "_identifier")]
    pub identifier: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, GenderName};

    #[test]
    fn fresh_player_has_empty_inventory_and_zero_score() {
        let mut registry = Registry::new();
        let foyer = Rc::new(Location::new(&mut registry, "Foyer", "A dusty foyer."));
        let player = Player::new(&mut registry, foyer);
        assert!(player.inventory.is_empty());
        assert_eq!(player.score, 0);
    }

    #[test]
    fn find_visible_object_searches_location_then_inventory() {
        let mut registry = Registry::new();
        let foyer = Rc::new(Location::new(&mut registry, "Foyer", "A dusty foyer."));
        let lamp = Rc::new(Item::new(&mut registry, "lamp", "a", "", true));
        let key = Rc::new(Item::new(&mut registry, "key", "a", "", true));
        let gender = Rc::new(Gender::new(
            &mut registry,
            GenderName::Female,
            "she",
            "her",
            "her",
        ));
        let ada = Rc::new(Person::new(&mut registry, "Ada", "A programmer.", gender));

        foyer.add_item(Rc::clone(&lamp));
        foyer.add_person(Rc::clone(&ada));
        let mut player = Player::new(&mut registry, foyer);
        player.inventory.push(Rc::clone(&key));

        assert_eq!(
            player.find_visible_object("lamp"),
            Some(VisibleObject::Item(lamp))
        );
        assert_eq!(
            player.find_visible_object("ada"),
            Some(VisibleObject::Person(ada))
        );
        assert_eq!(
            player.find_visible_object("key"),
            Some(VisibleObject::Item(key))
        );
        assert_eq!(player.find_visible_object("sword"), None);
    }

    #[test]
    fn player_record_references_location_and_inventory() {
        let mut registry = Registry::new();
        let foyer = Rc::new(Location::new(&mut registry, "Foyer", "A dusty foyer."));
        let lamp = Rc::new(Item::new(&mut registry, "lamp", "a", "", true));
        let mut player = Player::new(&mut registry, Rc::clone(&foyer));
        player.inventory.push(Rc::clone(&lamp));
        player.score = 42;

        let record = player.to_record();
        assert_eq!(record.location, foyer.model_ref());
        assert_eq!(record.inventory, vec![lamp.model_ref()]);
        assert_eq!(record.score, 42);
    }
}
