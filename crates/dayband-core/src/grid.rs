//! The fixed 96-slot day grid.
//!
//! A day is divided into 96 slots of 15 minutes each. Slot order is
//! chronological and fixed; every dataset in this crate is indexed
//! against this grid.

use chrono::NaiveTime;

/// Number of slots in a day (24 hours at 15-minute resolution).
pub const SLOT_COUNT: usize = 96;

/// Minutes covered by one slot.
pub const SLOT_MINUTES: u32 = 15;

/// `HH:MM` label for a slot index. Indices wrap at [`SLOT_COUNT`].
pub fn slot_label(index: usize) -> String {
    let minutes = (index % SLOT_COUNT) as u32 * SLOT_MINUTES;
    let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN);
    time.format("%H:%M").to_string()
}

/// All 96 labels in chronological order.
pub fn slot_labels() -> Vec<String> {
    (0..SLOT_COUNT).map(slot_label).collect()
}

/// Slot indices at hour boundaries (every fourth slot), for axis ticks.
pub fn hour_ticks() -> Vec<usize> {
    (0..SLOT_COUNT).step_by(4).collect()
}
