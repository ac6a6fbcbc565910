//! Moving stacks between slots and containers
//!
//! A move inspects both slots first and decides one of three committed
//! outcomes (merge, swap, relocate) or a no-op. Capability checks run before
//! anything is written, so a refused move never leaves a half-applied state.

use crate::capability::ContainerKind;
use crate::catalog::ItemCatalog;
use crate::container::Container;
use crate::error::InventoryResult;
use crate::item::ItemStack;

/// Result of [`Container::move_slot`] and [`Container::move_slot_to`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Source count added onto the same stackable item at the destination
    Merged,
    /// Source and destination stacks traded places
    Swapped,
    /// Source stack moved into an empty destination slot
    Relocated,
    /// Nothing changed
    Ignored(MoveBlock),
}

impl MoveOutcome {
    /// Check if the move changed any slot
    pub fn is_committed(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }

    /// Ignored because source and destination are the same slot
    pub fn is_same_slot(&self) -> bool {
        matches!(self, Self::Ignored(MoveBlock::SameSlot))
    }
}

/// Why a move was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveBlock {
    /// Nothing to move
    EmptySource,
    /// Source and destination are the same slot
    SameSlot,
    /// An item involved is missing from the catalog
    UnknownItem,
    /// A slot rule refused the item
    NotAllowed,
}

/// Result of [`Container::transfer_slot_to_container`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Count added to a slot already holding the item
    Merged { slot: usize },
    /// Stack placed into an empty slot
    Placed { slot: usize },
    /// Source empty, missing, or no room
    Ignored,
}

impl TransferOutcome {
    /// Check if the transfer moved anything
    pub fn is_committed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// One side of a move
struct MoveSide<'a> {
    kind: &'a ContainerKind,
    slot: usize,
    stack: &'a ItemStack,
}

/// Decide what moving `source` onto `dest` does, without touching either
fn plan_move(
    catalog: &dyn ItemCatalog,
    source: MoveSide<'_>,
    dest: MoveSide<'_>,
    same_slot: bool,
) -> MoveOutcome {
    if source.stack.is_empty() {
        return MoveOutcome::Ignored(MoveBlock::EmptySource);
    }

    let source_item = catalog.resolve(&source.stack.item_id);

    if dest.stack.is_empty() {
        return if dest.kind.item_allowed(dest.slot, source_item) {
            MoveOutcome::Relocated
        } else if source_item.is_none() {
            MoveOutcome::Ignored(MoveBlock::UnknownItem)
        } else {
            MoveOutcome::Ignored(MoveBlock::NotAllowed)
        };
    }

    // Checked before stackability so a slot never merges into itself
    if same_slot {
        return MoveOutcome::Ignored(MoveBlock::SameSlot);
    }

    let dest_item = catalog.resolve(&dest.stack.item_id);

    if let (Some(from), Some(to)) = (source_item, dest_item) {
        let fits = dest.stack.count.checked_add(source.stack.count).is_some();
        if from.is_same_item(to) && from.stackable && fits {
            return MoveOutcome::Merged;
        }
    }

    if dest.kind.item_allowed(dest.slot, source_item)
        && source.kind.item_allowed(source.slot, dest_item)
    {
        MoveOutcome::Swapped
    } else if source_item.is_none() || dest_item.is_none() {
        MoveOutcome::Ignored(MoveBlock::UnknownItem)
    } else {
        MoveOutcome::Ignored(MoveBlock::NotAllowed)
    }
}

/// Write a planned outcome into the two slots
fn apply_move(outcome: MoveOutcome, source: &mut ItemStack, dest: &mut ItemStack) {
    match outcome {
        MoveOutcome::Merged => {
            dest.count += source.count;
            source.reset();
        }
        MoveOutcome::Swapped => source.swap(dest),
        MoveOutcome::Relocated => {
            dest.set(source);
            source.reset();
        }
        MoveOutcome::Ignored(_) => {}
    }
}

impl Container {
    /// Exchange two slots of this container without consulting any rule
    pub fn swap_slots(&mut self, a: usize, b: usize) -> InventoryResult<()> {
        if a == b {
            return self.state.check(a);
        }
        let (first, second) = self.state.pair_mut(a, b)?;
        first.swap(second);
        self.notify();
        Ok(())
    }

    /// Exchange a slot of this container with a slot of another, without
    /// consulting any rule
    pub fn swap_slots_with(
        &mut self,
        slot: usize,
        other: &mut Container,
        other_slot: usize,
    ) -> InventoryResult<()> {
        other.state.check(other_slot)?;
        self.state
            .slot_mut(slot)?
            .swap(other.state.slot_mut(other_slot)?);
        self.notify();
        other.notify();
        Ok(())
    }

    /// Move the stack at `from` onto slot `to` of this container.
    ///
    /// Fails only if either index is out of range.
    pub fn move_slot(&mut self, from: usize, to: usize) -> InventoryResult<MoveOutcome> {
        let outcome = self.move_slot_quiet(from, to)?;
        if outcome.is_committed() {
            self.notify();
        }
        Ok(outcome)
    }

    /// Move the stack at `from` onto slot `to` of another container.
    ///
    /// Item semantics come from this container's catalog. On commit both
    /// containers fire their change signal.
    pub fn move_slot_to(
        &mut self,
        from: usize,
        dest: &mut Container,
        to: usize,
    ) -> InventoryResult<MoveOutcome> {
        let outcome = self.move_slot_to_quiet(from, dest, to)?;
        if outcome.is_committed() {
            self.notify();
            dest.notify();
        }
        Ok(outcome)
    }

    /// `move_slot` without firing the change signal
    pub(crate) fn move_slot_quiet(
        &mut self,
        from: usize,
        to: usize,
    ) -> InventoryResult<MoveOutcome> {
        let source = MoveSide {
            kind: self.kind(),
            slot: from,
            stack: self.state.slot(from)?,
        };
        let dest = MoveSide {
            kind: self.kind(),
            slot: to,
            stack: self.state.slot(to)?,
        };
        let outcome = plan_move(self.catalog(), source, dest, from == to);

        if outcome.is_committed() {
            let (source, dest) = self.state.pair_mut(from, to)?;
            apply_move(outcome, source, dest);
            log::debug!("Container '{}': {:?} slot {} -> {}", self.id(), outcome, from, to);
        }
        Ok(outcome)
    }

    /// `move_slot_to` without firing either change signal
    pub(crate) fn move_slot_to_quiet(
        &mut self,
        from: usize,
        dest: &mut Container,
        to: usize,
    ) -> InventoryResult<MoveOutcome> {
        let source_side = MoveSide {
            kind: self.kind(),
            slot: from,
            stack: self.state.slot(from)?,
        };
        let dest_side = MoveSide {
            kind: dest.kind(),
            slot: to,
            stack: dest.state.slot(to)?,
        };
        let outcome = plan_move(self.catalog(), source_side, dest_side, false);

        if outcome.is_committed() {
            apply_move(outcome, self.state.slot_mut(from)?, dest.state.slot_mut(to)?);
            log::debug!(
                "{:?} '{}' slot {} -> '{}' slot {}",
                outcome,
                self.id(),
                from,
                dest.id(),
                to
            );
        }
        Ok(outcome)
    }

    /// Pull one slot of `source` into any available spot of this container.
    ///
    /// Merges into a slot already holding the item (no stack cap), otherwise
    /// places the stack in the first empty slot that accepts it. A missing or
    /// empty source slot, or a full container, is ignored. Does not fire
    /// change signals; callers batch that.
    pub fn transfer_slot_to_container(
        &mut self,
        source: &mut Container,
        source_slot: usize,
    ) -> TransferOutcome {
        let Ok(stack) = source.state.slot_mut(source_slot) else {
            return TransferOutcome::Ignored;
        };
        if stack.is_empty() {
            return TransferOutcome::Ignored;
        }

        if let Some(slot) = self.find_item(&stack.item_id) {
            let existing = &mut self.state.slots_mut()[slot];
            if let Some(count) = existing.count.checked_add(stack.count) {
                existing.count = count;
                stack.reset();
                return TransferOutcome::Merged { slot };
            }
        }

        match self.placement_slot(&stack.item_id) {
            Some(slot) => {
                self.state.slots_mut()[slot].set(stack);
                stack.reset();
                TransferOutcome::Placed { slot }
            }
            None => {
                log::debug!(
                    "Container '{}' is full, leaving {} x{} in source slot {}",
                    self.id(),
                    stack.item_id,
                    stack.count,
                    source_slot
                );
                TransferOutcome::Ignored
            }
        }
    }

    /// Pull every slot of `source` into this container.
    ///
    /// Fires each container's change signal once after the sweep. Returns the
    /// number of slots transferred.
    pub fn transfer_all(&mut self, source: &mut Container) -> usize {
        let transferred = self.transfer_all_quiet(source);
        source.notify();
        self.notify();
        transferred
    }

    /// `transfer_all` without firing either change signal
    pub(crate) fn transfer_all_quiet(&mut self, source: &mut Container) -> usize {
        let transferred = (0..source.capacity())
            .filter(|&slot| self.transfer_slot_to_container(source, slot).is_committed())
            .count();

        log::debug!(
            "Transferred {} slots from '{}' to '{}'",
            transferred,
            source.id(),
            self.id()
        );
        transferred
    }
}
