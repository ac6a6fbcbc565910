//! Equipment slot rules

use crate::item::{ItemCategory, ItemDefinition};
use serde::{Deserialize, Serialize};

/// Equipment slot types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    /// Head armor (helmet, hat)
    Head,
    /// Chest armor
    Chest,
    /// Leg armor
    Legs,
    /// Foot armor (boots)
    Feet,
    /// Hand armor (gloves)
    Hands,
    /// Main hand weapon
    MainHand,
    /// Off hand (shield, second weapon)
    OffHand,
    /// Ring, amulet
    Accessory,
    /// Back slot (cape, backpack)
    Back,
}

impl EquipmentSlot {
    /// Standard humanoid layout, in slot index order
    pub fn all_standard() -> Vec<Self> {
        vec![
            Self::Head,
            Self::Chest,
            Self::Legs,
            Self::Feet,
            Self::Hands,
            Self::MainHand,
            Self::OffHand,
            Self::Accessory,
            Self::Accessory,
            Self::Back,
        ]
    }

    /// Check if this is a weapon slot
    pub fn is_weapon(&self) -> bool {
        matches!(self, Self::MainHand | Self::OffHand)
    }

    /// Check if this is an armor slot
    pub fn is_armor(&self) -> bool {
        self.armor_tag().is_some()
    }

    /// Tag an armor piece must carry to fit this slot
    pub fn armor_tag(&self) -> Option<&'static str> {
        match self {
            Self::Head => Some("head"),
            Self::Chest => Some("chest"),
            Self::Legs => Some("legs"),
            Self::Feet => Some("feet"),
            Self::Hands => Some("hands"),
            _ => None,
        }
    }

    /// Check if an item can be equipped here
    pub fn accepts(&self, item: &ItemDefinition) -> bool {
        match self {
            Self::MainHand => item.category == ItemCategory::Weapon,
            Self::OffHand => {
                item.category == ItemCategory::Weapon
                    || (item.category == ItemCategory::Armor && item.has_tag("shield"))
            }
            Self::Accessory => item.category == ItemCategory::Accessory && !item.has_tag("back"),
            Self::Back => item.category == ItemCategory::Accessory && item.has_tag("back"),
            armor => {
                item.category == ItemCategory::Armor
                    && armor.armor_tag().is_some_and(|tag| item.has_tag(tag))
            }
        }
    }
}
