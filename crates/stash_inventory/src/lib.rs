//! Stash Inventory - Slot-Based Item Containers
//!
//! This crate provides fixed-capacity item containers and the rules for
//! moving stacks between them.
//!
//! # Features
//!
//! - Item stacks and catalog-backed item definitions
//! - Fixed-capacity slot state, persistable as a plain slot map
//! - Add/remove with stack merging
//! - Merge, swap and relocate moves between slots and containers
//! - Bulk transfers with batched change signals
//! - Per-slot placement rules (equipment layouts, custom predicates)
//! - Mutex-guarded shared handles for multi-threaded hosts
//! - TOML configuration for catalogs and container presets
//!
//! # Example
//!
//! ```ignore
//! use stash_inventory::prelude::*;
//! use std::sync::Arc;
//!
//! let catalog: Arc<dyn ItemCatalog> = Arc::new(
//!     ItemDatabase::new().with_item(ItemDefinition::new("potion", "Potion").stackable()),
//! );
//!
//! let mut bag = Container::new("bag", 20, catalog.clone());
//! let mut chest = Container::new("chest", 10, catalog);
//! chest.add_item(ItemStack::new("potion", 3));
//!
//! bag.on_change().subscribe(|| println!("bag changed"));
//! bag.transfer_all(&mut chest);
//! ```

pub mod capability;
pub mod catalog;
pub mod config;
pub mod container;
pub mod equipment;
pub mod error;
pub mod item;
pub mod shared;
pub mod state;
pub mod transfer;

pub mod prelude {
    pub use crate::capability::{ContainerKind, SlotRule};
    pub use crate::catalog::{ItemCatalog, ItemDatabase};
    pub use crate::config::{
        load_config, parse_config, ContainerPreset, InventoryConfig, PresetKind,
    };
    pub use crate::container::Container;
    pub use crate::equipment::EquipmentSlot;
    pub use crate::error::{ConfigError, ConfigResult, InventoryError, InventoryResult};
    pub use crate::item::{ItemCategory, ItemDefinition, ItemRarity, ItemStack};
    pub use crate::shared::SharedContainer;
    pub use crate::state::ContainerState;
    pub use crate::transfer::{MoveBlock, MoveOutcome, TransferOutcome};
    pub use stash_event::{ChangeSignal, SubscriberId};
}

pub use prelude::*;
