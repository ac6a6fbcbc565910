//! Item catalog lookup

use crate::item::ItemDefinition;
use std::collections::HashMap;

/// Resolves item ids to their static definitions.
///
/// Catalogs are read-only from the point of view of containers and are
/// shared between many of them, hence the `Send + Sync` bound.
pub trait ItemCatalog: Send + Sync {
    /// Look up an item. Unknown ids resolve to `None`.
    fn resolve(&self, item_id: &str) -> Option<&ItemDefinition>;
}

/// In-memory catalog keyed by item id
#[derive(Debug, Clone, Default)]
pub struct ItemDatabase {
    items: HashMap<String, ItemDefinition>,
}

impl ItemDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, returning the one it replaced
    pub fn insert(&mut self, definition: ItemDefinition) -> Option<ItemDefinition> {
        self.items.insert(definition.id.clone(), definition)
    }

    /// Builder-style insert
    pub fn with_item(mut self, definition: ItemDefinition) -> Self {
        self.insert(definition);
        self
    }

    /// Get a definition
    pub fn get(&self, item_id: &str) -> Option<&ItemDefinition> {
        self.items.get(item_id)
    }

    /// Remove a definition
    pub fn remove(&mut self, item_id: &str) -> Option<ItemDefinition> {
        self.items.remove(item_id)
    }

    /// Check if an id is defined
    pub fn contains(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the database is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Display names, ordered by item id
    pub fn names(&self) -> Vec<&str> {
        let mut entries: Vec<&ItemDefinition> = self.items.values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries.into_iter().map(|def| def.name.as_str()).collect()
    }

    /// Iterate over all definitions
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }
}

impl ItemCatalog for ItemDatabase {
    fn resolve(&self, item_id: &str) -> Option<&ItemDefinition> {
        self.get(item_id)
    }
}

impl FromIterator<ItemDefinition> for ItemDatabase {
    fn from_iter<I: IntoIterator<Item = ItemDefinition>>(iter: I) -> Self {
        let mut db = Self::new();
        for definition in iter {
            db.insert(definition);
        }
        db
    }
}
