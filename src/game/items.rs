//! Item arena and searchable containers.
//!
//! The arena keeps every live item — on the ground or in the inventory —
//! in one dense `Vec`. Removal compacts the survivors toward index 0 and
//! renumbers inventory slots, so display order stays contiguous and stable.
//! Ids are handed out from a monotonic counter and never reused while the
//! store lives; a fresh store restarts the sequence at 1.

use super::state::ItemKind;

pub const ITEM_CAPACITY: usize = 20;
pub const LOOT_SLOTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

/// An item is either lying in the room or held in an inventory slot.
/// "Absent" is not a state — a removed item leaves the store entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Ground { x: i32, y: i32 },
    Inventory { slot: usize },
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub location: Location,
}

// ── Arena ─────────────────────────────────────────────────────

pub struct ItemStore {
    items: Vec<Item>,
    next_id: u32,
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    fn alloc_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an item on the ground. Returns `None` when all slots are
    /// live — the caller treats that as "no item created", never an error.
    pub fn spawn(&mut self, kind: ItemKind, x: i32, y: i32) -> Option<ItemId> {
        if self.len() >= ITEM_CAPACITY {
            return None;
        }
        let id = self.alloc_id();
        self.items.push(Item {
            id,
            kind,
            location: Location::Ground { x, y },
        });
        Some(id)
    }

    /// Spawn an item straight into the next free inventory slot.
    pub fn spawn_in_inventory(&mut self, kind: ItemKind) -> Option<ItemId> {
        if self.len() >= ITEM_CAPACITY {
            return None;
        }
        let slot = self.inventory_count();
        let id = self.alloc_id();
        self.items.push(Item {
            id,
            kind,
            location: Location::Inventory { slot },
        });
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn ground_item_at(&self, x: i32, y: i32) -> Option<&Item> {
        self.items
            .iter()
            .find(|i| i.location == Location::Ground { x, y })
    }

    pub fn iter_ground(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|i| matches!(i.location, Location::Ground { .. }))
    }

    pub fn inventory_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.location, Location::Inventory { .. }))
            .count()
    }

    /// Inventory items in display order (slot 0 first).
    pub fn inventory(&self) -> Vec<&Item> {
        let mut held: Vec<&Item> = self
            .items
            .iter()
            .filter(|i| matches!(i.location, Location::Inventory { .. }))
            .collect();
        held.sort_by_key(|i| match i.location {
            Location::Inventory { slot } => slot,
            Location::Ground { .. } => usize::MAX,
        });
        held
    }

    pub fn item_in_slot(&self, slot: usize) -> Option<&Item> {
        self.items
            .iter()
            .find(|i| i.location == Location::Inventory { slot })
    }

    /// Move a ground item into the next free inventory slot.
    pub fn move_to_inventory(&mut self, id: ItemId) {
        let slot = self.inventory_count();
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            if matches!(item.location, Location::Ground { .. }) {
                item.location = Location::Inventory { slot };
            }
        }
    }

    /// Put an inventory item back on the ground at the given position.
    pub fn drop_at(&mut self, id: ItemId, x: i32, y: i32) {
        let freed = match self.get(id).map(|i| i.location) {
            Some(Location::Inventory { slot }) => slot,
            _ => return,
        };
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.location = Location::Ground { x, y };
        }
        self.close_slot_gap(freed);
    }

    /// Remove an item from the world entirely, freeing its arena slot.
    pub fn remove(&mut self, id: ItemId) {
        let freed = match self.get(id).map(|i| i.location) {
            Some(Location::Inventory { slot }) => Some(slot),
            Some(Location::Ground { .. }) => None,
            None => return,
        };
        self.items.retain(|i| i.id != id);
        if let Some(slot) = freed {
            self.close_slot_gap(slot);
        }
    }

    fn close_slot_gap(&mut self, freed: usize) {
        for item in &mut self.items {
            if let Location::Inventory { slot } = &mut item.location {
                if *slot > freed {
                    *slot -= 1;
                }
            }
        }
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── Searchables ───────────────────────────────────────────────

/// A map position that yields one-time loot when interacted with.
/// `searched` flips false→true exactly once; afterwards the container is
/// permanently inert and never re-rolls its loot.
#[derive(Clone, Debug)]
pub struct Searchable {
    pub x: i32,
    pub y: i32,
    pub loot: [Option<ItemKind>; LOOT_SLOTS],
    pub searched: bool,
}

impl Searchable {
    pub fn new(x: i32, y: i32, loot: &[ItemKind]) -> Self {
        let mut slots = [None; LOOT_SLOTS];
        for (slot, &kind) in slots.iter_mut().zip(loot.iter()) {
            *slot = Some(kind);
        }
        Self {
            x,
            y,
            loot: slots,
            searched: false,
        }
    }

    pub fn loot_kinds(&self) -> Vec<ItemKind> {
        self.loot.iter().flatten().copied().collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut store = ItemStore::new();
        assert!(store.is_empty());
        let a = store.spawn(ItemKind::Knife, 1, 1).unwrap();
        let b = store.spawn(ItemKind::Tin, 2, 2).unwrap();
        assert_eq!(a, ItemId(1));
        assert_eq!(b, ItemId(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut store = ItemStore::new();
        let a = store.spawn(ItemKind::Knife, 1, 1).unwrap();
        store.remove(a);
        let b = store.spawn(ItemKind::Knife, 1, 1).unwrap();
        assert_ne!(a, b);
        assert_eq!(b, ItemId(2));
    }

    #[test]
    fn spawn_fails_at_capacity() {
        let mut store = ItemStore::new();
        for _ in 0..ITEM_CAPACITY {
            assert!(store.spawn(ItemKind::EmptyVial, 0, 0).is_some());
        }
        assert!(store.spawn(ItemKind::EmptyVial, 0, 0).is_none());
        assert!(store.spawn_in_inventory(ItemKind::EmptyVial).is_none());
        assert_eq!(store.len(), ITEM_CAPACITY);
    }

    #[test]
    fn removal_preserves_relative_order() {
        let mut store = ItemStore::new();
        let a = store.spawn(ItemKind::Knife, 1, 1).unwrap();
        let b = store.spawn(ItemKind::Tin, 2, 2).unwrap();
        let c = store.spawn(ItemKind::Magnet, 3, 3).unwrap();
        store.remove(b);
        let remaining: Vec<ItemId> = store.iter_ground().map(|i| i.id).collect();
        assert_eq!(remaining, vec![a, c]);
    }

    #[test]
    fn ground_and_inventory_are_mutually_exclusive() {
        let mut store = ItemStore::new();
        let id = store.spawn(ItemKind::Knife, 4, 4).unwrap();
        store.move_to_inventory(id);
        assert!(store.ground_item_at(4, 4).is_none());
        assert_eq!(
            store.get(id).unwrap().location,
            Location::Inventory { slot: 0 }
        );
    }

    #[test]
    fn inventory_slots_stay_contiguous_after_removal() {
        let mut store = ItemStore::new();
        let a = store.spawn_in_inventory(ItemKind::Knife).unwrap();
        let b = store.spawn_in_inventory(ItemKind::Tin).unwrap();
        let c = store.spawn_in_inventory(ItemKind::Magnet).unwrap();
        store.remove(b);
        assert_eq!(
            store.get(a).unwrap().location,
            Location::Inventory { slot: 0 }
        );
        assert_eq!(
            store.get(c).unwrap().location,
            Location::Inventory { slot: 1 }
        );
        assert_eq!(store.inventory_count(), 2);
        assert_eq!(store.item_in_slot(1).unwrap().id, c);
    }

    #[test]
    fn drop_frees_the_slot_and_lands_on_the_ground() {
        let mut store = ItemStore::new();
        let a = store.spawn_in_inventory(ItemKind::Knife).unwrap();
        let b = store.spawn_in_inventory(ItemKind::Tin).unwrap();
        store.drop_at(a, 5, 6);
        assert_eq!(store.ground_item_at(5, 6).unwrap().id, a);
        assert_eq!(
            store.get(b).unwrap().location,
            Location::Inventory { slot: 0 }
        );
    }

    #[test]
    fn inventory_display_order_follows_slots() {
        let mut store = ItemStore::new();
        store.spawn_in_inventory(ItemKind::Knife).unwrap();
        store.spawn_in_inventory(ItemKind::Tin).unwrap();
        store.spawn_in_inventory(ItemKind::Gypsum).unwrap();
        let kinds: Vec<ItemKind> = store.inventory().iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![ItemKind::Knife, ItemKind::Tin, ItemKind::Gypsum]);
    }

    #[test]
    fn searchable_holds_up_to_three_loot_kinds() {
        let s = Searchable::new(4, 7, &[ItemKind::Knife]);
        assert_eq!(s.loot_kinds(), vec![ItemKind::Knife]);
        assert!(!s.searched);

        let s = Searchable::new(
            7,
            8,
            &[
                ItemKind::DihydrogenMonoxide,
                ItemKind::DihydrogenMonoxide,
                ItemKind::DihydrogenMonoxide,
            ],
        );
        assert_eq!(s.loot_kinds().len(), 3);
    }
}
