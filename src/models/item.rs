//! Items the player can interact with.

use crate::identity::{ModelKind, Registry};
use crate::models::{identity_eq, Persistable};
use serde::{Deserialize, Serialize};

/// Any object the player can examine, carry, or use: a broad catch-all for
/// everything with its own description that is not a person or a location.
#[derive(Debug)]
pub struct Item {
    identifier: u64,
    pub name: String,
    pub article: String,
    pub synonym_names: Vec<String>,
    pub description: String,
    pub is_gettable: bool,
}

identity_eq!(Item);

impl Item {
    /// Create a fresh item with the next free identifier.
    pub fn new(
        registry: &mut Registry,
        name: impl Into<String>,
        article: impl Into<String>,
        description: impl Into<String>,
        is_gettable: bool,
    ) -> Self {
        Self {
            identifier: registry.next(ModelKind::Item),
            name: name.into(),
            article: article.into(),
            synonym_names: Vec::new(),
            description: description.into(),
            is_gettable,
        }
    }

    /// Additional names this item answers to.
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonym_names = synonyms.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn rehydrate(registry: &mut Registry, record: ItemRecord) -> Self {
        registry.observe(ModelKind::Item, record.identifier);
        Self {
            identifier: record.identifier,
            name: record.name,
            article: record.article,
            synonym_names: record.synonym_names,
            description: record.description,
            is_gettable: record.is_gettable,
        }
    }

    /// The item's display name with its article, e.g. "a brass lamp".
    pub fn full_name(&self) -> String {
        if self.article.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.article, self.name)
        }
    }

    /// Whether `name` matches this item's name or any synonym,
    /// case-insensitively.
    pub fn is_called(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .synonym_names
                .iter()
                .any(|synonym| synonym.eq_ignore_ascii_case(name))
    }
}

impl Persistable for Item {
    type Record = ItemRecord;

    const KIND: ModelKind = ModelKind::Item;

    fn identifier(&self) -> u64 {
        self.identifier
    }

    fn to_record(&self) -> ItemRecord {
        ItemRecord {
            name: self.name.clone(),
            article: self.article.clone(),
            synonym_names: self.synonym_names.clone(),
            description: self.description.clone(),
            is_gettable: self.is_gettable,
            identifier: self.identifier,
        }
    }
}

/// Flat wire form of an [`Item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub article: String,
    pub synonym_names: Vec<String>,
    pub description: String,
    pub is_gettable: bool,
    #[serde(rename = "_identifier")]
    pub identifier: u64,
}
