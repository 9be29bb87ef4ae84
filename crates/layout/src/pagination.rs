//! Mapping of queue positions onto pages and slots.
//!
//! `entries_per_page` is validated to be at least one when the sheet is
//! configured; a zero is treated as one here so the functions stay total.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotPosition {
    pub page: usize,
    pub slot: usize,
}

pub fn slot_for(index: usize, entries_per_page: usize) -> SlotPosition {
    let per_page = entries_per_page.max(1);
    SlotPosition {
        page: index / per_page,
        slot: index % per_page,
    }
}

/// True when the entry at `index` starts a new page.
pub fn is_page_break(index: usize, entries_per_page: usize) -> bool {
    index > 0 && slot_for(index, entries_per_page).slot == 0
}

pub fn page_count(entries: usize, entries_per_page: usize) -> usize {
    entries.div_ceil(entries_per_page.max(1))
}
