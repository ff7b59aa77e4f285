//! Fixed-slot form sections (learning points, schedule entries).
//!
//! The admin form exposes a fixed number of input slots; the store keeps
//! only the filled entries, in slot order.

/// Collects the filled slots in slot order. Blank slots are dropped, not
/// preserved as empty entries, so the persisted list length is the number
/// of filled slots.
pub fn collect_slots(slots: &[String]) -> Vec<String> {
    slots
        .iter()
        .map(|slot| slot.trim())
        .filter(|slot| !slot.is_empty())
        .map(str::to_string)
        .collect()
}

/// Spreads a stored list back into `slot_count` form slots, front-filled
/// in order with the tail left blank. Entries beyond the slot count are
/// dropped.
pub fn spread_slots(values: &[String], slot_count: usize) -> Vec<String> {
    let mut slots = vec![String::new(); slot_count];
    for (slot, value) in slots.iter_mut().zip(values) {
        *slot = value.clone();
    }
    slots
}
