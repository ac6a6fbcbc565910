//! Item container

use crate::capability::ContainerKind;
use crate::catalog::ItemCatalog;
use crate::equipment::EquipmentSlot;
use crate::error::InventoryResult;
use crate::item::{ItemDefinition, ItemStack};
use crate::state::ContainerState;
use stash_event::ChangeSignal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One logical inventory: a player bag, a chest, an equipment set.
///
/// The container owns its slot state exclusively and shares the item catalog
/// with every other container. Each committed mutation fires
/// [`Container::on_change`].
pub struct Container {
    /// Container identifier
    id: String,
    /// Slot storage
    pub(crate) state: ContainerState,
    /// Placement rules
    kind: ContainerKind,
    /// Shared item catalog
    catalog: Arc<dyn ItemCatalog>,
    /// Content-changed signal
    on_change: Arc<ChangeSignal>,
}

impl Container {
    /// Create an unrestricted container with `capacity` empty slots
    pub fn new(id: impl Into<String>, capacity: usize, catalog: Arc<dyn ItemCatalog>) -> Self {
        Self::with_state(id, ContainerState::new(capacity), catalog)
    }

    /// Create an unrestricted container around existing state
    pub fn with_state(
        id: impl Into<String>,
        state: ContainerState,
        catalog: Arc<dyn ItemCatalog>,
    ) -> Self {
        Self {
            id: id.into(),
            state,
            kind: ContainerKind::Unrestricted,
            catalog,
            on_change: Arc::new(ChangeSignal::new()),
        }
    }

    /// Create an equipment container with one slot per layout entry
    pub fn equipment(
        id: impl Into<String>,
        layout: Vec<EquipmentSlot>,
        catalog: Arc<dyn ItemCatalog>,
    ) -> Self {
        let capacity = layout.len();
        Self::new(id, capacity, catalog).with_kind(ContainerKind::equipment(layout))
    }

    /// Set placement rules
    pub fn with_kind(mut self, kind: ContainerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Get container id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get placement rules
    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    /// Get the shared catalog
    pub fn catalog(&self) -> &dyn ItemCatalog {
        self.catalog.as_ref()
    }

    /// Content-changed signal
    pub fn on_change(&self) -> &Arc<ChangeSignal> {
        &self.on_change
    }

    /// Get slot state
    pub fn state(&self) -> &ContainerState {
        &self.state
    }

    /// Snapshot the slots for persistence
    pub fn to_slot_map(&self) -> BTreeMap<usize, ItemStack> {
        self.state.to_slot_map()
    }

    /// Get container capacity
    pub fn capacity(&self) -> usize {
        self.state.slot_count()
    }

    /// Get slot contents
    pub fn slot(&self, slot: usize) -> InventoryResult<&ItemStack> {
        self.state.slot(slot)
    }

    /// All slots in index order
    pub fn slots(&self) -> &[ItemStack] {
        self.state.slots()
    }

    /// Get number of used slots
    pub fn used_slots(&self) -> usize {
        self.slots().iter().filter(|s| !s.is_empty()).count()
    }

    /// Get number of free slots
    pub fn free_slots(&self) -> usize {
        self.capacity() - self.used_slots()
    }

    /// Check if every slot is occupied
    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    /// Check if no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.used_slots() == 0
    }

    /// First slot holding `item_id`
    pub fn find_item(&self, item_id: &str) -> Option<usize> {
        self.state.find_item(item_id)
    }

    /// First empty slot
    pub fn find_empty_slot(&self) -> Option<usize> {
        self.state.find_empty_slot()
    }

    /// Count total quantity of an item
    pub fn count_item(&self, item_id: &str) -> u64 {
        self.slots()
            .iter()
            .filter(|s| s.holds(item_id))
            .map(|s| u64::from(s.count))
            .sum()
    }

    /// Resolve an item id against the catalog
    pub fn resolve(&self, item_id: &str) -> Option<&ItemDefinition> {
        self.catalog.resolve(item_id)
    }

    /// Decide whether `item` may occupy `slot`
    pub fn item_allowed(&self, slot: usize, item: Option<&ItemDefinition>) -> bool {
        self.kind.item_allowed(slot, item)
    }

    /// First empty slot this container lets `item_id` into
    pub(crate) fn placement_slot(&self, item_id: &str) -> Option<usize> {
        if self.kind.is_unrestricted() {
            return self.find_empty_slot();
        }

        let definition = self.resolve(item_id);
        self.state
            .iter()
            .find(|(slot, stack)| stack.is_empty() && self.item_allowed(*slot, definition))
            .map(|(slot, _)| slot)
    }

    /// Check if the stack would find a slot, without adding it
    pub fn can_add_item(&self, stack: &ItemStack) -> bool {
        if stack.is_empty() {
            return false;
        }
        self.find_item(&stack.item_id).is_some() || self.placement_slot(&stack.item_id).is_some()
    }

    /// Fire the content-changed signal
    pub fn notify(&self) {
        self.on_change.emit();
    }

    /// Reset a slot to empty
    pub fn clear_slot(&mut self, slot: usize) -> InventoryResult<()> {
        self.state.slot_mut(slot)?.reset();
        self.notify();
        Ok(())
    }

    /// Adjust a slot's count by `delta`, returning the new count.
    ///
    /// The count stays within `0..=u32::MAX`; a slot reaching zero is reset.
    /// An empty slot has no item to count and is left alone.
    pub fn add_count(&mut self, slot: usize, delta: i64) -> InventoryResult<u32> {
        let stack = self.state.slot_mut(slot)?;
        if stack.is_empty() {
            log::warn!(
                "Container '{}': ignoring count change of {} on empty slot {}",
                self.id,
                delta,
                slot
            );
            return Ok(0);
        }

        let target = i64::from(stack.count).saturating_add(delta);
        let clamped = target.clamp(0, i64::from(u32::MAX));
        if clamped != target {
            log::warn!(
                "Container '{}': slot {} count {} {:+} clamped to {}",
                self.id,
                slot,
                stack.count,
                delta,
                clamped
            );
        }
        stack.count = clamped as u32;
        stack.normalize();
        let count = stack.count;

        self.notify();
        Ok(count)
    }

    /// Add a stack to the container.
    ///
    /// Merges into the first slot already holding the same item, otherwise
    /// fills the first empty slot that accepts it. Returns the stack back if
    /// neither exists.
    pub fn add_item(&mut self, stack: ItemStack) -> Option<ItemStack> {
        if stack.is_empty() {
            return None;
        }

        if let Some(slot) = self.find_item(&stack.item_id) {
            let existing = &mut self.state.slots_mut()[slot];
            if let Some(count) = existing.count.checked_add(stack.count) {
                existing.count = count;
                self.notify();
                return None;
            }
        }

        if let Some(slot) = self.placement_slot(&stack.item_id) {
            self.state.slots_mut()[slot] = stack;
            self.notify();
            return None;
        }

        log::warn!(
            "Container '{}' has no room for {} x{}",
            self.id,
            stack.item_id,
            stack.count
        );
        Some(stack)
    }

    /// Remove up to `amount` units from the first slot holding `item_id`.
    ///
    /// Returns the amount actually removed.
    pub fn remove_item(&mut self, item_id: &str, amount: u32) -> u32 {
        let Some(slot) = self.find_item(item_id) else {
            return 0;
        };

        let stack = &mut self.state.slots_mut()[slot];
        let removed = amount.min(stack.count);
        stack.count -= removed;
        stack.normalize();

        if removed > 0 {
            self.notify();
        }
        removed
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
