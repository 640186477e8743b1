//! The game root: title, opening blurb, the player, and every location.

use crate::identity::{ModelKind, ModelRef, Registry};
use crate::models::{identity_eq, Location, Persistable, Player};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// The root of the game graph. Everything persisted is reachable from here.
#[derive(Debug)]
pub struct Game {
    identifier: u64,
    pub title: String,
    pub start_blurb: String,
    pub player: Player,
    pub locations: Vec<Rc<Location>>,
}

identity_eq!(Game);

impl Game {
    /// Create a fresh game rooted at `player` and `locations`.
    pub fn new(
        registry: &mut Registry,
        title: impl Into<String>,
        start_blurb: impl Into<String>,
        player: Player,
        locations: Vec<Rc<Location>>,
    ) -> Self {
        Self {
            identifier: registry.next(ModelKind::Game),
            title: title.into(),
            start_blurb: start_blurb.into(),
            player,
            locations,
        }
    }

    pub(crate) fn rehydrate(
        registry: &mut Registry,
        record: GameRecord,
        player: Player,
        locations: Vec<Rc<Location>>,
    ) -> Self {
        registry.observe(ModelKind::Game, record.identifier);
        Self {
            identifier: record.identifier,
            title: record.title,
            start_blurb: record.start_blurb,
            player,
            locations,
        }
    }
}

impl Persistable for Game {
    type Record = GameRecord;

    const KIND: ModelKind = ModelKind::Game;

    fn identifier(&self) -> u64 {
        self.identifier
    }

    fn to_record(&self) -> GameRecord {
        GameRecord {
            title: self.title.clone(),
            start_blurb: self.start_blurb.clone(),
            player: self.player.model_ref(),
            locations: self.locations.iter().map(|l| l.model_ref()).collect(),
            identifier: self.identifier,
        }
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        // Exits hold strong references back to their destination locations,
        // closing a reference cycle. Session teardown unlinks them so the
        // whole graph can be freed.
        for location in &self.locations {
            for exit in location.exits() {
                exit.unlink();
            }
        }
    }
}

/// Flat wire form of a [`Game`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub title: String,
    pub start_blurb: String,
    pub player: ModelRef,
    pub locations: Vec<ModelRef>,
    #[serde(rename = "_identifier")]
    pub identifier: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Exit};

    #[test]
    fn game_record_references_player_and_locations() {
        let mut registry = Registry::new();
        let foyer = Rc::new(Location::new(&mut registry, "Foyer", "A dusty foyer."));
        let player = Player::new(&mut registry, Rc::clone(&foyer));
        let player_ref = player.model_ref();
        let game = Game::new(
            &mut registry,
            "Test Game",
            "It was a dark and stormy night.",
            player,
            vec![Rc::clone(&foyer)],
        );

        let record = game.to_record();
        assert_eq!(record.title, "Test Game");
        assert_eq!(record.start_blurb, "It was a dark and stormy night.");
        assert_eq!(record.player, player_ref);
        assert_eq!(record.locations, vec![foyer.model_ref()]);
    }

    #[test]
    fn dropping_a_game_releases_cyclic_locations() {
        let mut registry = Registry::new();
        let north = Rc::new(Direction::new(&mut registry, "north", "n"));
        let south = Rc::new(Direction::new(&mut registry, "south", "s"));
        let a = Rc::new(Location::new(&mut registry, "A", "Place A."));
        let b = Rc::new(Location::new(&mut registry, "B", "Place B."));
        a.add_exit(Rc::new(Exit::new(&mut registry, north, Rc::clone(&b))));
        b.add_exit(Rc::new(Exit::new(&mut registry, south, Rc::clone(&a))));

        let player = Player::new(&mut registry, Rc::clone(&a));
        let game = Game::new(
            &mut registry,
            "Cycle",
            "",
            player,
            vec![Rc::clone(&a), Rc::clone(&b)],
        );
        drop(game);

        // Only the test's own handles remain once the exits are unlinked.
        assert_eq!(Rc::strong_count(&a), 1);
        assert_eq!(Rc::strong_count(&b), 1);
    }
}
