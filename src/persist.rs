//! Save/load engine.
//!
//! Flattens a live game graph into a single JSON document with one record
//! per distinct reachable object, and reconstitutes the graph from such a
//! document. Edges are persisted as [`ModelRef`]s, never inline records, so
//! shared objects are written exactly once and the one cyclic edge in the
//! schema (exit -> location -> exit) has an acyclic wire form.

use crate::identity::{ModelKind, ModelRef, Registry};
use crate::models::{
    Direction, DirectionRecord, Exit, ExitRecord, Game, GameRecord, Gender, GenderRecord, Item,
    ItemRecord, Location, LocationRecord, Persistable, Person, PersonRecord, Player, PlayerRecord,
    ValidationError,
};
use crate::store::BlobStore;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed save document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unresolved reference: no {kind} record with identifier {identifier}")]
    UnresolvedReference { kind: ModelKind, identifier: u64 },

    #[error("reference kind mismatch: expected a {expected} reference, found {found}")]
    KindMismatch { expected: ModelKind, found: ModelRef },

    #[error("duplicate {kind} record with identifier {identifier}")]
    DuplicateIdentifier { kind: ModelKind, identifier: u64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// One complete save: every object reachable from the game root, flattened
/// into per-type buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub game: GameRecord,
    pub player: PlayerRecord,
    pub people: Vec<PersonRecord>,
    pub genders: Vec<GenderRecord>,
    pub items: Vec<ItemRecord>,
    pub locations: Vec<LocationRecord>,
    pub exits: Vec<ExitRecord>,
    pub directions: Vec<DirectionRecord>,
}

/// Serialize `game` and write it to `store` under `name`.
///
/// The document is assembled entirely in memory before anything is written;
/// a failed save leaves no partial output.
pub fn save_game<S: BlobStore>(game: &Game, store: &S, name: &str) -> Result<(), PersistError> {
    let document = build_document(game);
    let contents = serde_json::to_string_pretty(&document)?;
    store.write(name, &contents)?;
    info!(name, title = %game.title, "saved game");
    Ok(())
}

/// Read the document stored under `name` and reconstitute the game graph.
pub fn load_game<S: BlobStore>(
    store: &S,
    name: &str,
    registry: &mut Registry,
) -> Result<Game, PersistError> {
    let contents = store.read(name)?;
    let document: SaveDocument = serde_json::from_str(&contents)?;
    let game = reconstitute(document, registry)?;
    info!(name, title = %game.title, "loaded game");
    Ok(game)
}

// ============================================================================
// Saver
// ============================================================================

/// First-seen-order collection keeping one entry per identifier, so an
/// object reachable via several paths contributes a single record.
struct Collected<T> {
    seen: HashSet<u64>,
    entries: Vec<Rc<T>>,
}

impl<T: Persistable> Collected<T> {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            entries: Vec::new(),
        }
    }

    fn push(&mut self, entry: Rc<T>) {
        if self.seen.insert(entry.identifier()) {
            self.entries.push(entry);
        }
    }

    fn extend(&mut self, entries: impl IntoIterator<Item = Rc<T>>) {
        for entry in entries {
            self.push(entry);
        }
    }

    fn records(&self) -> Vec<T::Record> {
        self.entries.iter().map(|entry| entry.to_record()).collect()
    }
}

/// Flatten a live game into a save document.
///
/// Collection is reachability based: the player's inventory and every
/// location's items, exits, and people are gathered, then the genders and
/// directions they mention. An object not linked from the game root is not
/// persisted.
pub fn build_document(game: &Game) -> SaveDocument {
    let mut items = Collected::new();
    let mut people = Collected::new();
    let mut exits = Collected::new();
    let mut locations = Collected::new();

    items.extend(game.player.inventory.iter().cloned());
    for location in &game.locations {
        locations.push(Rc::clone(location));
        items.extend(location.items());
        exits.extend(location.exits());
        people.extend(location.people());
    }

    let mut genders = Collected::new();
    for person in &people.entries {
        genders.push(person.gender());
    }

    let mut directions = Collected::new();
    for exit in &exits.entries {
        directions.push(exit.direction());
    }

    debug!(
        locations = locations.entries.len(),
        items = items.entries.len(),
        people = people.entries.len(),
        exits = exits.entries.len(),
        genders = genders.entries.len(),
        directions = directions.entries.len(),
        "collected reachable game objects"
    );

    SaveDocument {
        game: game.to_record(),
        player: game.player.to_record(),
        people: people.records(),
        genders: genders.records(),
        items: items.records(),
        locations: locations.records(),
        exits: exits.records(),
        directions: directions.records(),
    }
}

// ============================================================================
// Loader / reconstitution
// ============================================================================

/// Per-type lookup table of already-constructed objects.
struct Table<T: Persistable> {
    entries: HashMap<u64, Rc<T>>,
}

impl<T: Persistable> Table<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn insert(&mut self, entry: Rc<T>) -> Result<(), PersistError> {
        let identifier = entry.identifier();
        if self.entries.insert(identifier, entry).is_some() {
            return Err(PersistError::DuplicateIdentifier {
                kind: T::KIND,
                identifier,
            });
        }
        Ok(())
    }

    fn resolve(&self, reference: ModelRef) -> Result<Rc<T>, PersistError> {
        if reference.kind != T::KIND {
            return Err(PersistError::KindMismatch {
                expected: T::KIND,
                found: reference,
            });
        }
        self.entries
            .get(&reference.identifier)
            .cloned()
            .ok_or(PersistError::UnresolvedReference {
                kind: T::KIND,
                identifier: reference.identifier,
            })
    }

    fn resolve_all(&self, references: &[ModelRef]) -> Result<Vec<Rc<T>>, PersistError> {
        references
            .iter()
            .map(|reference| self.resolve(*reference))
            .collect()
    }

    fn values(&self) -> impl Iterator<Item = &Rc<T>> + '_ {
        self.entries.values()
    }
}

/// Rebuild a live game graph from a save document.
///
/// Reconstitution is two-phase and dependency ordered. Phase 1 builds the
/// types with no entity-valued fields (directions, genders, items). Phase 2
/// builds people, then exits (destination kept as a raw reference, since
/// the target location may not exist yet), then locations, then runs one
/// cycle-closing pass linking every exit to its concrete destination, then
/// the player and the game root.
///
/// A reference that does not resolve, a duplicate identifier within a
/// bucket, or an invalid gender name aborts the whole load; no partial game
/// is ever returned.
pub fn reconstitute(document: SaveDocument, registry: &mut Registry) -> Result<Game, PersistError> {
    let SaveDocument {
        game,
        player,
        people,
        genders,
        items,
        locations,
        exits,
        directions,
    } = document;

    // Phase 1: no entity-valued fields.
    let mut direction_table = Table::new();
    for record in directions {
        direction_table.insert(Rc::new(Direction::rehydrate(registry, record)))?;
    }

    let mut gender_table = Table::new();
    for record in genders {
        gender_table.insert(Rc::new(Gender::rehydrate(registry, record)?))?;
    }

    let mut item_table = Table::new();
    for record in items {
        item_table.insert(Rc::new(Item::rehydrate(registry, record)))?;
    }

    // Phase 2: dependency order.
    let mut person_table = Table::new();
    for record in people {
        let gender = gender_table.resolve(record.gender)?;
        person_table.insert(Rc::new(Person::rehydrate(registry, record, gender)))?;
    }

    let mut exit_table = Table::new();
    for record in exits {
        let direction = direction_table.resolve(record.direction)?;
        exit_table.insert(Rc::new(Exit::rehydrate(registry, record, direction)))?;
    }

    let mut location_table = Table::new();
    let mut ordered_locations = Vec::new();
    for record in locations {
        let location_items = item_table.resolve_all(&record.items)?;
        let location_people = person_table.resolve_all(&record.people)?;
        let location_exits = exit_table.resolve_all(&record.exits)?;
        let location = Rc::new(Location::rehydrate(
            registry,
            record,
            location_items,
            location_people,
            location_exits,
        ));
        location_table.insert(Rc::clone(&location))?;
        ordered_locations.push(location);
    }

    // Cycle-closing pass: every location now exists, so the deferred exit
    // destinations can be linked.
    for exit in exit_table.values() {
        if let Some(reference) = exit.pending_destination() {
            exit.link(location_table.resolve(reference)?);
        }
    }

    let player_location = location_table.resolve(player.location)?;
    let player_inventory = item_table.resolve_all(&player.inventory)?;
    let player = Player::rehydrate(registry, player, player_location, player_inventory);

    debug!(
        locations = ordered_locations.len(),
        "reconstituted game graph"
    );

    // The game record's own player/locations references are superseded by
    // the concrete objects just built.
    Ok(Game::rehydrate(registry, game, player, ordered_locations))
}
