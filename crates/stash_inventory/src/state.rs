//! Slot storage for a container

use crate::error::{InventoryError, InventoryResult};
use crate::item::ItemStack;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed-capacity slot storage.
///
/// Capacity is set at construction and never changes. Every slot always holds
/// an [`ItemStack`], possibly the empty one. On the wire the state is a plain
/// `slot index -> stack` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<usize, ItemStack>",
    into = "BTreeMap<usize, ItemStack>"
)]
pub struct ContainerState {
    slots: Vec<ItemStack>,
}

impl ContainerState {
    /// Create a state with `capacity` empty slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![ItemStack::empty(); capacity],
        }
    }

    /// Create a state seeded with `defaults` in slots `0..defaults.len()`.
    ///
    /// Defaults that do not fit are dropped with a warning.
    pub fn with_defaults(capacity: usize, defaults: &[ItemStack]) -> Self {
        if defaults.len() > capacity {
            log::warn!(
                "Container has {} slots but {} default items, dropping {}",
                capacity,
                defaults.len(),
                defaults.len() - capacity
            );
        }

        let mut state = Self::new(capacity);
        for (slot, item) in state.slots.iter_mut().zip(defaults) {
            slot.set(item);
            slot.normalize();
        }
        state
    }

    /// Restore from a persisted slot map. Keys must be exactly `0..len`.
    pub fn from_slot_map(map: BTreeMap<usize, ItemStack>) -> InventoryResult<Self> {
        let mut slots = Vec::with_capacity(map.len());
        for (expected, (found, mut stack)) in map.into_iter().enumerate() {
            if expected != found {
                return Err(InventoryError::InvalidSlotMap { expected, found });
            }
            stack.normalize();
            slots.push(stack);
        }
        Ok(Self { slots })
    }

    /// Convert to a plain slot map for persistence
    pub fn to_slot_map(&self) -> BTreeMap<usize, ItemStack> {
        self.slots.iter().cloned().enumerate().collect()
    }

    /// Number of slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// All slots in index order
    pub fn slots(&self) -> &[ItemStack] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [ItemStack] {
        &mut self.slots
    }

    /// Iterate over `(index, stack)` pairs, empty slots included
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots.iter().enumerate()
    }

    /// Fail with `OutOfRange` unless `slot` is a valid index
    pub fn check(&self, slot: usize) -> InventoryResult<()> {
        if slot < self.slots.len() {
            Ok(())
        } else {
            Err(InventoryError::OutOfRange {
                slot,
                capacity: self.slots.len(),
            })
        }
    }

    /// Get slot contents
    pub fn slot(&self, slot: usize) -> InventoryResult<&ItemStack> {
        self.check(slot)?;
        Ok(&self.slots[slot])
    }

    /// Get mutable slot contents
    pub fn slot_mut(&mut self, slot: usize) -> InventoryResult<&mut ItemStack> {
        self.check(slot)?;
        Ok(&mut self.slots[slot])
    }

    /// Borrow two distinct slots mutably at once
    pub(crate) fn pair_mut(
        &mut self,
        a: usize,
        b: usize,
    ) -> InventoryResult<(&mut ItemStack, &mut ItemStack)> {
        self.check(a)?;
        self.check(b)?;
        debug_assert_ne!(a, b, "pair_mut needs two distinct slots");

        if a < b {
            let (left, right) = self.slots.split_at_mut(b);
            Ok((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.slots.split_at_mut(a);
            Ok((&mut right[0], &mut left[b]))
        }
    }

    /// First slot holding `item_id`
    pub fn find_item(&self, item_id: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.holds(item_id))
    }

    /// First empty slot
    pub fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(ItemStack::is_empty)
    }

    /// Reset every slot
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(ItemStack::reset);
    }
}

impl TryFrom<BTreeMap<usize, ItemStack>> for ContainerState {
    type Error = InventoryError;

    fn try_from(map: BTreeMap<usize, ItemStack>) -> InventoryResult<Self> {
        Self::from_slot_map(map)
    }
}

impl From<ContainerState> for BTreeMap<usize, ItemStack> {
    fn from(state: ContainerState) -> Self {
        state.slots.into_iter().enumerate().collect()
    }
}
