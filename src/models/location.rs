//! Locations, the exits connecting them, and the directions exits face.
//!
//! Exits are the one cyclic edge in the model graph: a location owns exits
//! whose destinations are locations. The destination slot therefore starts
//! out as a raw [`ModelRef`] during reconstitution and is linked to the
//! concrete location in a final patch pass.

use crate::identity::{ModelKind, ModelRef, Registry};
use crate::models::{identity_eq, Item, Persistable, Person};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

// ============================================================================
// Direction
// ============================================================================

/// A direction (cardinal or relative) an exit can face. Shared across every
/// exit facing that way.
#[derive(Debug)]
pub struct Direction {
    identifier: u64,
    pub name: String,
    pub abbrev: String,
}

identity_eq!(Direction);

impl Direction {
    /// Create a fresh direction. Names and abbreviations are lowercased.
    pub fn new(
        registry: &mut Registry,
        name: impl Into<String>,
        abbrev: impl Into<String>,
    ) -> Self {
        Self {
            identifier: registry.next(ModelKind::Direction),
            name: name.into().to_lowercase(),
            abbrev: abbrev.into().to_lowercase(),
        }
    }

    pub(crate) fn rehydrate(registry: &mut Registry, record: DirectionRecord) -> Self {
        registry.observe(ModelKind::Direction, record.identifier);
        Self {
            identifier: record.identifier,
            name: record.name,
            abbrev: record.abbrev,
        }
    }

    /// Whether `text` names this direction, by full name or abbreviation.
    pub fn matches(&self, text: &str) -> bool {
        self.name.eq_ignore_ascii_case(text) || self.abbrev.eq_ignore_ascii_case(text)
    }
}

impl Persistable for Direction {
    type Record = DirectionRecord;

    const KIND: ModelKind = ModelKind::Direction;

    fn identifier(&self) -> u64 {
        self.identifier
    }

    fn to_record(&self) -> DirectionRecord {
        DirectionRecord {
            name: self.name.clone(),
            abbrev: self.abbrev.clone(),
            identifier: self.identifier,
        }
    }
}

/// Flat wire form of a [`Direction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionRecord {
    pub name: String,
    pub abbrev: String,
    #[serde(rename = "_identifier")]
    pub identifier: u64,
}

// ============================================================================
// Exit
// ============================================================================

/// Destination slot of an exit: a raw reference until the cycle-closing
/// pass links the concrete location.
enum ExitTarget {
    Pending(ModelRef),
    Linked(Rc<Location>),
}

impl fmt::Debug for ExitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitTarget::Pending(reference) => write!(f, "Pending({reference})"),
            ExitTarget::Linked(location) => write!(f, "Linked(Location#{})", location.identifier()),
        }
    }
}

/// A one-way connection from one location to another.
#[derive(Debug)]
pub struct Exit {
    identifier: u64,
    direction: Rc<Direction>,
    destination: RefCell<ExitTarget>,
}

identity_eq!(Exit);

impl Exit {
    /// Create a fresh exit, linked to its destination immediately.
    pub fn new(registry: &mut Registry, direction: Rc<Direction>, destination: Rc<Location>) -> Self {
        Self {
            identifier: registry.next(ModelKind::Exit),
            direction,
            destination: RefCell::new(ExitTarget::Linked(destination)),
        }
    }

    /// Rebuild an exit from its record. The destination stays a raw
    /// reference until [`link`](Self::link) is called.
    pub(crate) fn rehydrate(
        registry: &mut Registry,
        record: ExitRecord,
        direction: Rc<Direction>,
    ) -> Self {
        registry.observe(ModelKind::Exit, record.identifier);
        Self {
            identifier: record.identifier,
            direction,
            destination: RefCell::new(ExitTarget::Pending(record.destination)),
        }
    }

    pub fn direction(&self) -> Rc<Direction> {
        Rc::clone(&self.direction)
    }

    /// The location this exit leads to.
    ///
    /// Panics if the destination was never linked; an exit only becomes
    /// reachable outside the loader once every destination is resolved.
    pub fn destination(&self) -> Rc<Location> {
        match &*self.destination.borrow() {
            ExitTarget::Linked(location) => Rc::clone(location),
            ExitTarget::Pending(reference) => {
                panic!("exit {} destination {reference} was never linked", self.identifier)
            }
        }
    }

    /// The raw reference still waiting to be linked, if any.
    pub(crate) fn pending_destination(&self) -> Option<ModelRef> {
        match &*self.destination.borrow() {
            ExitTarget::Pending(reference) => Some(*reference),
            ExitTarget::Linked(_) => None,
        }
    }

    /// Replace a pending destination with the concrete location.
    pub(crate) fn link(&self, destination: Rc<Location>) {
        *self.destination.borrow_mut() = ExitTarget::Linked(destination);
    }

    /// Demote the destination back to a raw reference, releasing the strong
    /// reference that closes the location/exit cycle. Called at session
    /// teardown.
    pub(crate) fn unlink(&self) {
        let mut slot = self.destination.borrow_mut();
        if let ExitTarget::Linked(location) = &*slot {
            *slot = ExitTarget::Pending(location.model_ref());
        }
    }

    fn destination_ref(&self) -> ModelRef {
        match &*self.destination.borrow() {
            ExitTarget::Pending(reference) => *reference,
            ExitTarget::Linked(location) => location.model_ref(),
        }
    }
}

impl Persistable for Exit {
    type Record = ExitRecord;

    const KIND: ModelKind = ModelKind::Exit;

    fn identifier(&self) -> u64 {
        self.identifier
    }

    fn to_record(&self) -> ExitRecord {
        ExitRecord {
            direction: self.direction.model_ref(),
            destination: self.destination_ref(),
            identifier: self.identifier,
        }
    }
}

/// Flat wire form of an [`Exit`]. Both fields are references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitRecord {
    pub direction: ModelRef,
    pub destination: ModelRef,
    #[serde(rename = "_identifier")]
    pub identifier: u64,
}

// ============================================================================
// Location
// ============================================================================

/// A single area on the map, holding the items, people, and exits found
/// there.
#[derive(Debug)]
pub struct Location {
    identifier: u64,
    pub name: String,
    pub description: String,
    items: RefCell<Vec<Rc<Item>>>,
    people: RefCell<Vec<Rc<Person>>>,
    exits: RefCell<Vec<Rc<Exit>>>,
}

identity_eq!(Location);

impl Location {
    /// Create a fresh, empty location.
    pub fn new(
        registry: &mut Registry,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            identifier: registry.next(ModelKind::Location),
            name: name.into(),
            description: description.into(),
            items: RefCell::new(Vec::new()),
            people: RefCell::new(Vec::new()),
            exits: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn rehydrate(
        registry: &mut Registry,
        record: LocationRecord,
        items: Vec<Rc<Item>>,
        people: Vec<Rc<Person>>,
        exits: Vec<Rc<Exit>>,
    ) -> Self {
        registry.observe(ModelKind::Location, record.identifier);
        Self {
            identifier: record.identifier,
            name: record.name,
            description: record.description,
            items: RefCell::new(items),
            people: RefCell::new(people),
            exits: RefCell::new(exits),
        }
    }

    pub fn add_item(&self, item: Rc<Item>) {
        self.items.borrow_mut().push(item);
    }

    /// Remove the item with `item`'s identifier, returning it if present.
    pub fn remove_item(&self, item: &Item) -> Option<Rc<Item>> {
        let mut items = self.items.borrow_mut();
        let position = items.iter().position(|held| **held == *item)?;
        Some(items.remove(position))
    }

    pub fn add_person(&self, person: Rc<Person>) {
        self.people.borrow_mut().push(person);
    }

    pub fn add_exit(&self, exit: Rc<Exit>) {
        self.exits.borrow_mut().push(exit);
    }

    pub fn items(&self) -> Vec<Rc<Item>> {
        self.items.borrow().clone()
    }

    pub fn people(&self) -> Vec<Rc<Person>> {
        self.people.borrow().clone()
    }

    pub fn exits(&self) -> Vec<Rc<Exit>> {
        self.exits.borrow().clone()
    }
}

impl Persistable for Location {
    type Record = LocationRecord;

    const KIND: ModelKind = ModelKind::Location;

    fn identifier(&self) -> u64 {
        self.identifier
    }

    fn to_record(&self) -> LocationRecord {
        LocationRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            items: self.items.borrow().iter().map(|i| i.model_ref()).collect(),
            people: self.people.borrow().iter().map(|p| p.model_ref()).collect(),
            exits: self.exits.borrow().iter().map(|e| e.model_ref()).collect(),
            identifier: self.identifier,
        }
    }
}

/// Flat wire form of a [`Location`]. Contents are reference lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub description: String,
    pub items: Vec<ModelRef>,
    pub people: Vec<ModelRef>,
    pub exits: Vec<ModelRef>,
    #[serde(rename = "_identifier")]
    pub identifier: u64,
}
