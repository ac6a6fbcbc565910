//! Item definitions and stacks

use serde::{Deserialize, Serialize};

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Weapons (swords, bows, etc.)
    Weapon,
    /// Armor pieces and shields
    Armor,
    /// Rings, amulets, cloaks
    Accessory,
    /// Consumables (potions, food, etc.)
    Consumable,
    /// Materials for crafting
    Material,
    /// Quest items
    Quest,
    /// Currency
    Currency,
    /// Misc items
    #[default]
    Misc,
}

/// Item rarity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemRarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Static item definition, as stored in a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Category
    #[serde(default)]
    pub category: ItemCategory,
    /// Rarity
    #[serde(default)]
    pub rarity: ItemRarity,
    /// Whether several units can share one slot
    #[serde(default)]
    pub stackable: bool,
    /// Tags for filtering and slot rules
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ItemDefinition {
    /// Create a new, non-stackable item definition
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: ItemCategory::default(),
            rarity: ItemRarity::default(),
            stackable: false,
            tags: Vec::new(),
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set category
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Set rarity
    pub fn with_rarity(mut self, rarity: ItemRarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Mark as stackable
    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Check if item has a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether two resolved definitions describe the same item
    pub fn is_same_item(&self, other: &ItemDefinition) -> bool {
        self.id == other.id
    }
}

/// The contents of one slot: an item id and a count.
///
/// An empty id always goes with a zero count; [`ItemStack::empty`] is the
/// canonical free slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item ID (references ItemDefinition)
    pub item_id: String,
    /// Number of units
    pub count: u32,
}

impl ItemStack {
    /// Create a stack. A zero count or empty id yields the empty stack.
    pub fn new(item_id: impl Into<String>, count: u32) -> Self {
        let item_id = item_id.into();
        if item_id.is_empty() || count == 0 {
            return Self::empty();
        }
        Self { item_id, count }
    }

    /// Create a single item
    pub fn single(item_id: impl Into<String>) -> Self {
        Self::new(item_id, 1)
    }

    /// The free-slot stack
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if this stack represents a free slot
    pub fn is_empty(&self) -> bool {
        self.item_id.is_empty() || self.count == 0
    }

    /// Check if this stack holds the given item
    pub fn holds(&self, item_id: &str) -> bool {
        !self.is_empty() && self.item_id == item_id
    }

    /// Reset to empty
    pub fn reset(&mut self) {
        self.item_id.clear();
        self.count = 0;
    }

    /// Copy identifier and count from another stack
    pub fn set(&mut self, other: &ItemStack) {
        self.item_id.clone_from(&other.item_id);
        self.count = other.count;
    }

    /// Exchange contents with another stack
    pub fn swap(&mut self, other: &mut ItemStack) {
        std::mem::swap(self, other);
    }

    /// Bring a stack that breaks the empty invariant back to canonical form
    pub(crate) fn normalize(&mut self) {
        if self.is_empty() {
            self.reset();
        }
    }
}
