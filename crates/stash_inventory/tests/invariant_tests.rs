//! Invariant tests for stash_inventory
//!
//! These tests verify the bookkeeping guarantees containers must keep across
//! moves, swaps, merges and transfers

use stash_inventory::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

fn catalog() -> Arc<dyn ItemCatalog> {
    Arc::new(
        ItemDatabase::new()
            .with_item(ItemDefinition::new("potion", "Potion").stackable())
            .with_item(ItemDefinition::new("wood", "Wood").stackable())
            .with_item(
                ItemDefinition::new("sword", "Sword")
                    .with_category(ItemCategory::Weapon),
            )
            .with_item(
                ItemDefinition::new("shield", "Shield")
                    .with_category(ItemCategory::Armor)
                    .with_tag("shield"),
            )
            .with_item(ItemDefinition::new("torch", "Torch")),
    )
}

fn container(id: &str, capacity: usize, items: &[ItemStack]) -> Container {
    Container::with_state(id, ContainerState::with_defaults(capacity, items), catalog())
}

fn counter(container: &Container) -> Arc<AtomicU32> {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();
    container.on_change().subscribe(move || {
        counter_clone.fetch_add(1, Ordering::SeqCst);
    });
    counter
}

/// Total count per item id across containers
fn totals(containers: &[&Container]) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for container in containers {
        for stack in container.slots().iter().filter(|s| !s.is_empty()) {
            *totals.entry(stack.item_id.clone()).or_insert(0) += u64::from(stack.count);
        }
    }
    totals
}

/// INVARIANT: moves, swaps and transfers never create or destroy items
#[test]
fn invariant_conservation_across_moves() {
    let mut bag = container(
        "bag",
        5,
        &[
            ItemStack::new("potion", 3),
            ItemStack::single("sword"),
            ItemStack::new("wood", 12),
        ],
    );
    let mut chest = container(
        "chest",
        4,
        &[
            ItemStack::new("potion", 2),
            ItemStack::single("shield"),
            ItemStack::single("torch"),
        ],
    );
    let mut gear = Container::equipment(
        "gear",
        vec![EquipmentSlot::MainHand, EquipmentSlot::OffHand],
        catalog(),
    );

    let before = totals(&[&bag, &chest, &gear]);

    // Every (from, to) pair in both directions, plus equipment round trips
    for from in 0..bag.capacity() {
        for to in 0..chest.capacity() {
            bag.move_slot_to(from, &mut chest, to).unwrap();
            chest.move_slot_to(to, &mut bag, from).unwrap();
        }
        for to in 0..bag.capacity() {
            bag.move_slot(from, to).unwrap();
        }
        for to in 0..gear.capacity() {
            bag.move_slot_to(from, &mut gear, to).unwrap();
        }
    }
    gear.move_slot(0, 1).unwrap();
    bag.swap_slots(1, 3).unwrap();
    bag.swap_slots_with(0, &mut chest, 1).unwrap();
    chest.transfer_all(&mut gear);
    chest.transfer_slot_to_container(&mut bag, 0);
    bag.transfer_all(&mut chest);

    assert_eq!(totals(&[&bag, &chest, &gear]), before);
}

/// INVARIANT: moving a slot onto itself changes nothing and fires nothing
#[test]
fn invariant_self_move_is_idempotent() {
    let mut bag = container(
        "bag",
        3,
        &[ItemStack::new("potion", 3), ItemStack::single("sword")],
    );
    let snapshot = bag.to_slot_map();
    let fired = counter(&bag);

    for slot in 0..bag.capacity() {
        let outcome = bag.move_slot(slot, slot).unwrap();
        assert!(!outcome.is_committed());
    }

    assert_eq!(bag.to_slot_map(), snapshot);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

/// INVARIANT: identical stackable items merge completely
#[test]
fn invariant_merge_correctness() {
    let mut bag = container("bag", 2, &[ItemStack::new("potion", 3)]);
    let mut chest = container("chest", 2, &[ItemStack::new("potion", 2)]);

    let outcome = bag.move_slot_to(0, &mut chest, 0).unwrap();

    assert_eq!(outcome, MoveOutcome::Merged);
    assert_eq!(chest.slot(0).unwrap(), &ItemStack::new("potion", 5));
    assert_eq!(bag.slot(0).unwrap(), &ItemStack::empty());
}

/// INVARIANT: different items trade places when both slots allow it
#[test]
fn invariant_swap_correctness() {
    let mut bag = container("bag", 2, &[ItemStack::single("sword")]);
    let mut chest = container("chest", 2, &[ItemStack::single("shield")]);

    let outcome = bag.move_slot_to(0, &mut chest, 0).unwrap();

    assert_eq!(outcome, MoveOutcome::Swapped);
    assert_eq!(bag.slot(0).unwrap(), &ItemStack::single("shield"));
    assert_eq!(chest.slot(0).unwrap(), &ItemStack::single("sword"));
}

/// INVARIANT: a refused placement leaves both slots untouched and silent
#[test]
fn invariant_capability_block() {
    let mut bag = container("bag", 2, &[ItemStack::single("torch")]);
    let mut gear = Container::equipment("gear", vec![EquipmentSlot::OffHand], catalog());
    gear.add_item(ItemStack::single("shield"));

    let bag_before = bag.to_slot_map();
    let gear_before = gear.to_slot_map();
    let bag_fired = counter(&bag);
    let gear_fired = counter(&gear);

    // Relocating into an empty slot that refuses the item
    let mut empty_gear = Container::equipment("hands", vec![EquipmentSlot::MainHand], catalog());
    assert_eq!(
        bag.move_slot_to(0, &mut empty_gear, 0).unwrap(),
        MoveOutcome::Ignored(MoveBlock::NotAllowed)
    );
    // Swapping with an occupied slot that refuses the item
    assert_eq!(
        bag.move_slot_to(0, &mut gear, 0).unwrap(),
        MoveOutcome::Ignored(MoveBlock::NotAllowed)
    );

    assert_eq!(bag.to_slot_map(), bag_before);
    assert_eq!(gear.to_slot_map(), gear_before);
    assert!(empty_gear.is_empty());
    assert_eq!(bag_fired.load(Ordering::SeqCst), 0);
    assert_eq!(gear_fired.load(Ordering::SeqCst), 0);
}

/// INVARIANT: transferring into a full container without a matching item is a no-op
#[test]
fn invariant_full_container_noop() {
    let mut source = container("source", 2, &[ItemStack::single("torch")]);
    let mut full = container(
        "full",
        2,
        &[ItemStack::single("sword"), ItemStack::single("shield")],
    );
    let full_before = full.to_slot_map();

    let outcome = full.transfer_slot_to_container(&mut source, 0);

    assert_eq!(outcome, TransferOutcome::Ignored);
    assert_eq!(source.slot(0).unwrap(), &ItemStack::single("torch"));
    assert_eq!(full.to_slot_map(), full_before);
}

/// INVARIANT: a full container still accepts more of an item it already holds
#[test]
fn invariant_full_container_merges_matching() {
    let mut source = container("source", 1, &[ItemStack::new("wood", 40)]);
    let mut full = container(
        "full",
        2,
        &[ItemStack::new("wood", 99), ItemStack::single("sword")],
    );

    let outcome = full.transfer_slot_to_container(&mut source, 0);

    assert_eq!(outcome, TransferOutcome::Merged { slot: 0 });
    assert_eq!(full.slot(0).unwrap().count, 139);
    assert!(source.is_empty());
}

/// INVARIANT: persisted slot maps restore the exact same state
#[test]
fn invariant_persistence_round_trip() {
    let bag = container(
        "bag",
        4,
        &[
            ItemStack::new("potion", 3),
            ItemStack::empty(),
            ItemStack::single("sword"),
        ],
    );

    let restored = ContainerState::from_slot_map(bag.to_slot_map()).unwrap();
    assert_eq!(&restored, bag.state());

    let json = serde_json::to_string(bag.state()).unwrap();
    let decoded: ContainerState = serde_json::from_str(&json).unwrap();
    assert_eq!(&decoded, bag.state());

    let reopened = Container::with_state("bag", decoded, catalog());
    for slot in 0..bag.capacity() {
        assert_eq!(reopened.slot(slot).unwrap(), bag.slot(slot).unwrap());
    }
}

/// INVARIANT: persisted maps with holes are rejected
#[test]
fn invariant_persistence_rejects_gaps() {
    let json = r#"{"0":{"item_id":"potion","count":1},"3":{"item_id":"","count":0}}"#;

    assert!(serde_json::from_str::<ContainerState>(json).is_err());
}

/// INVARIANT: removal is capped at what one slot holds
#[test]
fn invariant_remove_cap() {
    let mut bag = container("bag", 2, &[ItemStack::new("wood", 4)]);

    assert_eq!(bag.remove_item("wood", 100), 4);
    assert_eq!(bag.slot(0).unwrap(), &ItemStack::empty());

    let snapshot = bag.to_slot_map();
    assert_eq!(bag.remove_item("wood", 100), 0);
    assert_eq!(bag.to_slot_map(), snapshot);
}

/// INVARIANT: out-of-range slots are rejected, never ignored
#[test]
fn invariant_out_of_range_is_an_error() {
    let mut bag = container("bag", 2, &[ItemStack::new("wood", 4)]);
    let mut chest = container("chest", 2, &[]);

    let expected = InventoryError::OutOfRange { slot: 2, capacity: 2 };
    assert_eq!(bag.slot(2).unwrap_err(), expected);
    assert_eq!(bag.clear_slot(2).unwrap_err(), expected);
    assert_eq!(bag.add_count(2, 1).unwrap_err(), expected);
    assert_eq!(bag.move_slot(0, 2).unwrap_err(), expected);
    assert_eq!(bag.move_slot_to(0, &mut chest, 2).unwrap_err(), expected);
    assert_eq!(bag.count_item("wood"), 4);
}

/// INVARIANT: bulk transfers signal each container exactly once
#[test]
fn invariant_transfer_all_signals_once() {
    let mut chest = container(
        "chest",
        4,
        &[
            ItemStack::new("potion", 1),
            ItemStack::new("wood", 5),
            ItemStack::single("torch"),
        ],
    );
    let mut bag = container("bag", 4, &[]);
    let chest_fired = counter(&chest);
    let bag_fired = counter(&bag);

    assert_eq!(bag.transfer_all(&mut chest), 3);

    assert_eq!(chest_fired.load(Ordering::SeqCst), 1);
    assert_eq!(bag_fired.load(Ordering::SeqCst), 1);
}
