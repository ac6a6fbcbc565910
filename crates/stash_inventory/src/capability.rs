//! Slot placement rules

use crate::equipment::EquipmentSlot;
use crate::item::ItemDefinition;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether an item may occupy a slot
pub type SlotRule = Arc<dyn Fn(usize, &ItemDefinition) -> bool + Send + Sync>;

/// What a container lets into its slots.
#[derive(Clone, Default)]
pub enum ContainerKind {
    /// Any item fits in any slot
    #[default]
    Unrestricted,
    /// Each placement is checked against a rule
    Restricted(SlotRule),
}

impl ContainerKind {
    /// Build a restricted kind from a closure
    pub fn restricted<F>(rule: F) -> Self
    where
        F: Fn(usize, &ItemDefinition) -> bool + Send + Sync + 'static,
    {
        Self::Restricted(Arc::new(rule))
    }

    /// Equipment layout: slot `i` accepts what `layout[i]` accepts.
    ///
    /// Indices past the end of the layout accept nothing.
    pub fn equipment(layout: Vec<EquipmentSlot>) -> Self {
        Self::restricted(move |slot, item| {
            layout.get(slot).is_some_and(|equipment| equipment.accepts(item))
        })
    }

    /// Check if this kind places no restrictions
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    /// Decide whether `item` may occupy `slot`.
    ///
    /// An unresolved item (`None`) is never allowed.
    pub fn item_allowed(&self, slot: usize, item: Option<&ItemDefinition>) -> bool {
        match (self, item) {
            (_, None) => false,
            (Self::Unrestricted, Some(_)) => true,
            (Self::Restricted(rule), Some(item)) => rule(slot, item),
        }
    }
}

impl fmt::Debug for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrestricted => write!(f, "Unrestricted"),
            Self::Restricted(_) => write!(f, "Restricted(..)"),
        }
    }
}
