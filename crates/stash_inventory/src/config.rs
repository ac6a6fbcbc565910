//! Inventory configuration - TOML to catalog and container presets
//!
//! # Format
//!
//! ```toml
//! [[items]]
//! id = "potion"
//! name = "Health Potion"
//! category = "consumable"
//! stackable = true
//!
//! [[items]]
//! id = "iron_sword"
//! name = "Iron Sword"
//! category = "weapon"
//!
//! [[containers]]
//! id = "player_bag"
//! capacity = 20
//! items = [{ item_id = "potion", count = 3 }]
//!
//! [[containers]]
//! id = "player_gear"
//! kind = "equipment"
//! equipment_slots = ["head", "main_hand", "off_hand"]
//! ```

use crate::capability::ContainerKind;
use crate::catalog::{ItemCatalog, ItemDatabase};
use crate::container::Container;
use crate::equipment::EquipmentSlot;
use crate::error::{ConfigError, ConfigResult};
use crate::item::{ItemDefinition, ItemStack};
use crate::state::ContainerState;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Preset container type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetKind {
    #[default]
    Unrestricted,
    Equipment,
}

/// A container described in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerPreset {
    /// Container identifier
    pub id: String,
    /// Slot count (unrestricted containers)
    #[serde(default)]
    pub capacity: usize,
    /// Container type
    #[serde(default)]
    pub kind: PresetKind,
    /// Equipment layout; the standard layout if left empty
    #[serde(default)]
    pub equipment_slots: Vec<EquipmentSlot>,
    /// Items seeded into slots `0..items.len()`
    #[serde(default)]
    pub items: Vec<ItemStack>,
}

impl ContainerPreset {
    /// Equipment layout this preset resolves to
    pub fn layout(&self) -> Vec<EquipmentSlot> {
        if self.equipment_slots.is_empty() {
            EquipmentSlot::all_standard()
        } else {
            self.equipment_slots.clone()
        }
    }

    /// Build a seeded container
    pub fn build(&self, catalog: Arc<dyn ItemCatalog>) -> Container {
        let (capacity, kind) = match self.kind {
            PresetKind::Unrestricted => (self.capacity, ContainerKind::Unrestricted),
            PresetKind::Equipment => {
                let layout = self.layout();
                (layout.len(), ContainerKind::equipment(layout))
            }
        };

        let state = ContainerState::with_defaults(capacity, &self.items);
        Container::with_state(self.id.clone(), state, catalog).with_kind(kind)
    }
}

/// Item catalog plus container presets
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
    #[serde(default)]
    pub containers: Vec<ContainerPreset>,
}

impl InventoryConfig {
    /// Reject duplicate ids, seeds naming undefined items, and equipment
    /// seeds their slot does not accept
    pub fn validate(&self) -> ConfigResult<()> {
        let mut items = HashMap::new();
        for item in &self.items {
            if items.insert(item.id.as_str(), item).is_some() {
                return Err(ConfigError::DuplicateItem(item.id.clone()));
            }
        }

        let mut container_ids = HashSet::new();
        for preset in &self.containers {
            if !container_ids.insert(preset.id.as_str()) {
                return Err(ConfigError::DuplicateContainer(preset.id.clone()));
            }
            if let Some(seed) = preset
                .items
                .iter()
                .find(|seed| !seed.is_empty() && !items.contains_key(seed.item_id.as_str()))
            {
                return Err(ConfigError::UnknownItem {
                    container: preset.id.clone(),
                    item: seed.item_id.clone(),
                });
            }
            if preset.kind == PresetKind::Equipment {
                Self::validate_equipment_seeds(preset, &items)?;
            }
        }

        Ok(())
    }

    fn validate_equipment_seeds(
        preset: &ContainerPreset,
        items: &HashMap<&str, &ItemDefinition>,
    ) -> ConfigResult<()> {
        // Seeds past the layout are truncated when the container is built
        let layout = preset.layout();
        for (slot, (equipment_slot, seed)) in layout.iter().zip(&preset.items).enumerate() {
            if seed.is_empty() {
                continue;
            }
            let accepted = items
                .get(seed.item_id.as_str())
                .is_some_and(|definition| equipment_slot.accepts(definition));
            if !accepted {
                return Err(ConfigError::SeedNotAllowed {
                    container: preset.id.clone(),
                    item: seed.item_id.clone(),
                    slot,
                });
            }
        }
        Ok(())
    }

    /// Build the item database
    pub fn catalog(&self) -> ItemDatabase {
        self.items.iter().cloned().collect()
    }

    /// Build every preset against a shared catalog
    pub fn build_containers(&self, catalog: Arc<dyn ItemCatalog>) -> Vec<Container> {
        self.containers
            .iter()
            .map(|preset| preset.build(Arc::clone(&catalog)))
            .collect()
    }

    /// Find a preset by id
    pub fn preset(&self, id: &str) -> Option<&ContainerPreset> {
        self.containers.iter().find(|preset| preset.id == id)
    }
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<InventoryConfig> {
    let config: InventoryConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate configuration from a file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<InventoryConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}
