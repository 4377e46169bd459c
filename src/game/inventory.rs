//! Inventory
//!
//! A fixed number of hotbar slots plus the selected index. A slot holds an
//! item kind only while its count is non-zero.

use serde::{Serialize, Deserialize};

use crate::config::StartingStack;
use crate::core::hash::StateHasher;
use crate::game::tile::ItemKind;

/// One hotbar slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    /// Item kind, `None` when the slot is empty
    pub item: Option<ItemKind>,
    /// Number of items; zero exactly when `item` is `None`
    pub count: u32,
}

impl InventorySlot {
    /// Slot with no item.
    pub const EMPTY: Self = Self { item: None, count: 0 };

    /// Is the slot empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// Does the slot hold `kind`?
    #[inline]
    pub fn holds(&self, kind: ItemKind) -> bool {
        self.item == Some(kind)
    }
}

/// Hotbar slots and selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
    selected: usize,
    max_stack: Option<u32>,
}

impl Inventory {
    /// Create `slot_count` empty slots. `max_stack` of `None` leaves stacks
    /// unbounded.
    pub fn new(slot_count: usize, max_stack: Option<u32>) -> Self {
        Self {
            slots: vec![InventorySlot::EMPTY; slot_count],
            selected: 0,
            max_stack,
        }
    }

    /// Create slots with starting stacks written into the first slots in
    /// order. Stacks beyond the slot count are ignored.
    pub fn with_starting_items(slot_count: usize, max_stack: Option<u32>, items: &[StartingStack]) -> Self {
        let mut inventory = Self::new(slot_count, max_stack);
        for (slot, stack) in inventory.slots.iter_mut().zip(items) {
            let count = match max_stack {
                Some(cap) => stack.count.min(cap),
                None => stack.count,
            };
            if count > 0 {
                *slot = InventorySlot { item: Some(stack.kind), count };
            }
        }
        inventory
    }

    /// All slots.
    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Selected slot index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Slot contents by index.
    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index)
    }

    /// Select a slot. Returns `false` and keeps the selection if `index` is
    /// out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.slots.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Move the selection by `delta` slots, wrapping at both ends.
    pub fn scroll(&mut self, delta: i32) {
        let len = self.slots.len() as i64;
        if len == 0 {
            return;
        }
        self.selected = (self.selected as i64 + delta as i64).rem_euclid(len) as usize;
    }

    /// Total count of `kind` across all slots.
    pub fn count_of(&self, kind: ItemKind) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.holds(kind))
            .map(|s| s.count)
            .sum()
    }

    /// Add items: first into slots already holding `kind`, then into the
    /// first empty slots.
    ///
    /// Returns how many could not be stored. Without a stack cap that is
    /// only non-zero when every slot holds some other kind.
    pub fn add(&mut self, kind: ItemKind, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }
        let cap = self.max_stack.unwrap_or(u32::MAX);
        let mut remaining = amount;

        for slot in self.slots.iter_mut().filter(|s| s.holds(kind)) {
            let room = cap.saturating_sub(slot.count);
            let moved = room.min(remaining);
            slot.count += moved;
            remaining -= moved;
            if remaining == 0 {
                return 0;
            }
        }

        for slot in self.slots.iter_mut().filter(|s| s.is_empty()) {
            let moved = cap.min(remaining);
            if moved == 0 {
                break;
            }
            *slot = InventorySlot { item: Some(kind), count: moved };
            remaining -= moved;
            if remaining == 0 {
                return 0;
            }
        }

        remaining
    }

    /// Remove `amount` of `kind` from slot `index`.
    ///
    /// Fails without touching anything if the slot does not hold `kind` or
    /// holds fewer than `amount`. Clears the slot when it reaches zero.
    pub fn consume(&mut self, index: usize, kind: ItemKind, amount: u32) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if !slot.holds(kind) || slot.count < amount {
            return false;
        }
        slot.count -= amount;
        if slot.count == 0 {
            slot.item = None;
        }
        true
    }

    /// Hash slots and selection for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.selected as u32);
        for slot in &self.slots {
            hasher.update_u8(slot.item.map_or(0, |k| k as u8));
            hasher.update_u32(slot.count);
        }
    }
}
