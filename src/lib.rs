//! Identity-preserving save/load engine for text adventure games.
//!
//! This crate provides:
//! - Model objects for a game world (locations, exits, items, people) with
//!   type-scoped identifiers handed out by a session [`Registry`]
//! - A saver that flattens the live, cyclic, shared-node game graph into a
//!   single acyclic JSON document, one record per distinct reachable object
//! - A two-phase loader that reconstitutes the graph, resolving forward
//!   references and closing the exit/location cycle without recursion
//!
//! # Quick start
//!
//! ```
//! use adventure_core::models::{Game, Location, Player};
//! use adventure_core::{load_game, save_game, MemoryStore, Registry};
//! use std::rc::Rc;
//!
//! # fn main() -> Result<(), adventure_core::PersistError> {
//! let mut registry = Registry::new();
//! let foyer = Rc::new(Location::new(&mut registry, "Foyer", "A dusty foyer."));
//! let player = Player::new(&mut registry, Rc::clone(&foyer));
//! let game = Game::new(&mut registry, "Demo", "Welcome.", player, vec![foyer]);
//!
//! let store = MemoryStore::new();
//! save_game(&game, &store, "demo")?;
//!
//! let mut session = Registry::new();
//! let loaded = load_game(&store, "demo", &mut session)?;
//! assert_eq!(loaded.title, "Demo");
//! # Ok(())
//! # }
//! ```

pub mod fixtures;
pub mod identity;
pub mod models;
pub mod persist;
pub mod store;

// Primary public API
pub use identity::{ModelKind, ModelRef, Registry};
pub use models::{Persistable, ValidationError};
pub use persist::{build_document, load_game, reconstitute, save_game, PersistError, SaveDocument};
pub use store::{BlobStore, DirectoryStore, MemoryStore};
