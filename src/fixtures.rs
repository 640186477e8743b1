//! Standard fixture objects most games start from.

use crate::identity::Registry;
use crate::models::{Direction, Gender, GenderName};
use std::rc::Rc;

const DIRECTION_SPECS: [(&str, &str); 12] = [
    ("north", "n"),
    ("south", "s"),
    ("east", "e"),
    ("west", "w"),
    ("northeast", "ne"),
    ("northwest", "nw"),
    ("southeast", "se"),
    ("southwest", "sw"),
    ("up", "u"),
    ("down", "d"),
    ("left", "l"),
    ("right", "r"),
];

const GENDER_SPECS: [(GenderName, &str, &str, &str); 4] = [
    (GenderName::Male, "he", "him", "his"),
    (GenderName::Female, "she", "her", "her"),
    (GenderName::Unspecified, "they", "them", "their"),
    (GenderName::Creature, "it", "it", "its"),
];

/// The twelve standard directions (cardinal, ordinal, and relative), with
/// their abbreviations.
pub fn standard_directions(registry: &mut Registry) -> Vec<Rc<Direction>> {
    DIRECTION_SPECS
        .iter()
        .map(|(name, abbrev)| Rc::new(Direction::new(registry, *name, *abbrev)))
        .collect()
}

/// One gender per recognized gender name, each with its pronoun set.
pub fn standard_genders(registry: &mut Registry) -> Vec<Rc<Gender>> {
    GENDER_SPECS
        .iter()
        .map(|(name, subject, object, possessive)| {
            Rc::new(Gender::new(registry, *name, *subject, *object, *possessive))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Persistable;

    #[test]
    fn twelve_standard_directions() {
        let mut registry = Registry::new();
        let directions = standard_directions(&mut registry);
        assert_eq!(directions.len(), 12);
        assert_eq!(directions[0].name, "north");
        assert_eq!(directions[0].abbrev, "n");
        assert_eq!(directions[7].name, "southwest");
        assert_eq!(directions[7].abbrev, "sw");
    }

    #[test]
    fn four_standard_genders_with_pronouns() {
        let mut registry = Registry::new();
        let genders = standard_genders(&mut registry);
        assert_eq!(genders.len(), 4);

        let unspecified = genders
            .iter()
            .find(|gender| gender.name == GenderName::Unspecified)
            .expect("unspecified gender missing");
        assert_eq!(unspecified.subject_pronoun, "they");
        assert_eq!(unspecified.object_pronoun, "them");
        assert_eq!(unspecified.possessive_pronoun, "their");
    }

    #[test]
    fn fixtures_consume_identifiers_from_the_registry() {
        let mut registry = Registry::new();
        let directions = standard_directions(&mut registry);
        let fresh = Direction::new(&mut registry, "in", "i");
        assert_eq!(directions.len(), 12);
        assert_eq!(fresh.name, "in");
        assert_eq!(fresh.identifier(), 13);
    }
}
