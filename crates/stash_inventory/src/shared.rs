//! Lock-guarded container handles for multi-threaded hosts
//!
//! Cross-container operations hold both locks for the whole mutation, acquired
//! in address order so two opposite transfers cannot deadlock. Change signals
//! fire after the locks are released, so handlers may lock either container.

use crate::container::Container;
use crate::error::InventoryResult;
use crate::transfer::{MoveOutcome, TransferOutcome};
use parking_lot::{Mutex, MutexGuard};
use stash_event::ChangeSignal;
use std::sync::Arc;

/// Shared, mutex-guarded container
#[derive(Debug, Clone)]
pub struct SharedContainer {
    inner: Arc<Mutex<Container>>,
    on_change: Arc<ChangeSignal>,
}

impl SharedContainer {
    /// Wrap a container
    pub fn new(container: Container) -> Self {
        let on_change = Arc::clone(container.on_change());
        Self {
            inner: Arc::new(Mutex::new(container)),
            on_change,
        }
    }

    /// Lock the container
    pub fn lock(&self) -> MutexGuard<'_, Container> {
        self.inner.lock()
    }

    /// Content-changed signal, reachable without locking
    pub fn on_change(&self) -> &Arc<ChangeSignal> {
        &self.on_change
    }

    /// Check if both handles point at the same container
    pub fn same_container(&self, other: &SharedContainer) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Lock `self` and `other` (distinct) in address order
    fn lock_pair<'a>(
        &'a self,
        other: &'a SharedContainer,
    ) -> (MutexGuard<'a, Container>, MutexGuard<'a, Container>) {
        if Arc::as_ptr(&self.inner) < Arc::as_ptr(&other.inner) {
            let first = self.inner.lock();
            let second = other.inner.lock();
            (first, second)
        } else {
            let second = other.inner.lock();
            let first = self.inner.lock();
            (first, second)
        }
    }

    /// Move slot `from` of this container onto slot `to` of `dest`
    pub fn move_slot(
        &self,
        from: usize,
        dest: &SharedContainer,
        to: usize,
    ) -> InventoryResult<MoveOutcome> {
        if self.same_container(dest) {
            let outcome = self.lock().move_slot_quiet(from, to)?;
            if outcome.is_committed() {
                self.on_change.emit();
            }
            return Ok(outcome);
        }

        let outcome = {
            let (mut source, mut dest) = self.lock_pair(dest);
            source.move_slot_to_quiet(from, &mut dest, to)?
        };
        if outcome.is_committed() {
            self.on_change.emit();
            dest.on_change.emit();
        }
        Ok(outcome)
    }

    /// Pull slot `source_slot` of `source` into this container.
    ///
    /// Transferring a container into itself is ignored. Like
    /// [`Container::transfer_slot_to_container`], fires no change signal.
    pub fn transfer_slot_to_container(
        &self,
        source: &SharedContainer,
        source_slot: usize,
    ) -> TransferOutcome {
        if self.same_container(source) {
            return TransferOutcome::Ignored;
        }
        let (mut receiver, mut source) = self.lock_pair(source);
        receiver.transfer_slot_to_container(&mut source, source_slot)
    }

    /// Pull every slot of `source` into this container
    pub fn transfer_all(&self, source: &SharedContainer) -> usize {
        if self.same_container(source) {
            return 0;
        }

        let transferred = {
            let (mut receiver, mut source) = self.lock_pair(source);
            receiver.transfer_all_quiet(&mut source)
        };
        source.on_change.emit();
        self.on_change.emit();
        transferred
    }
}

impl From<Container> for SharedContainer {
    fn from(container: Container) -> Self {
        Self::new(container)
    }
}
