//! People and their genders.

use crate::identity::{ModelKind, ModelRef, Registry};
use crate::models::{identity_eq, Persistable, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// The recognized gender names, in wire form.
pub const ALLOWED_GENDER_NAMES: [&str; 4] = ["male", "female", "unspecified", "creature"];

// ============================================================================
// Gender
// ============================================================================

/// The closed set of gender names. Fresh construction takes a variant, so an
/// out-of-set name is impossible to express; rehydration parses the wire
/// string and fails on anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenderName {
    Male,
    Female,
    Unspecified,
    Creature,
}

impl GenderName {
    pub fn as_str(self) -> &'static str {
        match self {
            GenderName::Male => "male",
            GenderName::Female => "female",
            GenderName::Unspecified => "unspecified",
            GenderName::Creature => "creature",
        }
    }

    /// Parse a wire gender name.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        match name {
            "male" => Ok(GenderName::Male),
            "female" => Ok(GenderName::Female),
            "unspecified" => Ok(GenderName::Unspecified),
            "creature" => Ok(GenderName::Creature),
            _ => Err(ValidationError::UnknownGender {
                given: name.to_string(),
                allowed: &ALLOWED_GENDER_NAMES,
            }),
        }
    }
}

impl fmt::Display for GenderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gender with its pronoun set, shared by every person of that gender.
#[derive(Debug)]
pub struct Gender {
    identifier: u64,
    pub name: GenderName,
    pub subject_pronoun: String,
    pub object_pronoun: String,
    pub possessive_pronoun: String,
}

identity_eq!(Gender);

impl Gender {
    /// Create a fresh gender with the next free identifier.
    pub fn new(
        registry: &mut Registry,
        name: GenderName,
        subject_pronoun: impl Into<String>,
        object_pronoun: impl Into<String>,
        possessive_pronoun: impl Into<String>,
    ) -> Self {
        Self {
            identifier: registry.next(ModelKind::Gender),
            name,
            subject_pronoun: subject_pronoun.into(),
            object_pronoun: object_pronoun.into(),
            possessive_pronoun: possessive_pronoun.into(),
        }
    }

    pub(crate) fn rehydrate(
        registry: &mut Registry,
        record: GenderRecord,
    ) -> Result<Self, ValidationError> {
        let name = GenderName::parse(&record.gender)?;
        registry.observe(ModelKind::Gender, record.identifier);
        Ok(Self {
            identifier: record.identifier,
            name,
            subject_pronoun: record.subject_pronoun,
            object_pronoun: record.object_pronoun,
            possessive_pronoun: record.possessive_pronoun,
        })
    }
}

impl Persistable for Gender {
    type Record = GenderRecord;

    const KIND: ModelKind = ModelKind::Gender;

    fn identifier(&self) -> u64 {
        self.identifier
    }

    fn to_record(&self) -> GenderRecord {
        GenderRecord {
            gender: self.name.as_str().to_string(),
            subject_pronoun: self.subject_pronoun.clone(),
            object_pronoun: self.object_pronoun.clone(),
            possessive_pronoun: self.possessive_pronoun.clone(),
            identifier: self.identifier,
        }
    }
}

/// Flat wire form of a [`Gender`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderRecord {
    pub gender: String,
    pub subject_pronoun: String,
    pub object_pronoun: String,
    pub possessive_pronoun: String,
    #[serde(rename = "_identifier")]
    pub identifier: u64,
}

// ============================================================================
// Person
// ============================================================================

/// Any living being the player can interact with.
#[derive(Debug)]
pub struct Person {
    identifier: u64,
    pub name: String,
    pub description: String,
    gender: Rc<Gender>,
    pub synonym_names: Vec<String>,
}

identity_eq!(Person);

impl Person {
    /// Create a fresh person with the next free identifier.
    pub fn new(
        registry: &mut Registry,
        name: impl Into<String>,
        description: impl Into<String>,
        gender: Rc<Gender>,
    ) -> Self {
        Self {
            identifier: registry.next(ModelKind::Person),
            name: name.into(),
            description: description.into(),
            gender,
            synonym_names: Vec::new(),
        }
    }

    /// Additional names this person answers to.
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonym_names = synonyms.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn rehydrate(
        registry: &mut Registry,
        record: PersonRecord,
        gender: Rc<Gender>,
    ) -> Self {
        registry.observe(ModelKind::Person, record.identifier);
        Self {
            identifier: record.identifier,
            name: record.name,
            description: record.description,
            gender,
            synonym_names: record.synonym_names,
        }
    }

    pub fn gender(&self) -> Rc<Gender> {
        Rc::clone(&self.gender)
    }

    pub fn subject_pronoun(&self) -> &str {
        &self.gender.subject_pronoun
    }

    pub fn object_pronoun(&self) -> &str {
        &self.gender.object_pronoun
    }

    pub fn possessive_pronoun(&self) -> &str {
        &self.gender.possessive_pronoun
    }

    /// Whether `name` matches this person's name or any synonym,
    /// case-insensitively.
    pub fn is_called(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .synonym_names
                .iter()
                .any(|synonym| synonym.eq_ignore_ascii_case(name))
    }
}

impl Persistable for Person {
    type Record = PersonRecord;

    const KIND: ModelKind = ModelKind::Person;

    fn identifier(&self) -> u64 {
        self.identifier
    }

    fn to_record(&self) -> PersonRecord {
        PersonRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            gender: self.gender.model_ref(),
            synonym_names: self.synonym_names.clone(),
            identifier: self.identifier,
        }
    }
}

/// Flat wire form of a [`Person`]. The gender is a reference, never an
/// inline record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub description: String,
    pub gender: ModelRef,
    pub synonym_names: Vec<String>,
    #[serde(rename = "_identifier")]
    pub identifier: u64,
}
