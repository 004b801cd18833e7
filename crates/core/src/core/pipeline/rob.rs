//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer tracking every in-flight instruction from
//! issue through commit. It provides:
//! 1. **Allocation:** FIFO slot assignment as instructions issue.
//! 2. **Completion:** The writeback stage stores the result and flips the
//!    ready bit when the common data bus delivers it.
//! 3. **In-order commit:** Entries retire from the head in program order.
//! 4. **Age ordering:** Each entry carries a monotonically increasing
//!    sequence number so program-order comparisons survive wraparound.

use crate::isa::Instr;

use super::cdb::CdbPacket;

/// A single entry in the reorder buffer.
#[derive(Clone, Debug)]
pub struct RobEntry {
    /// The in-flight instruction.
    pub instr: Instr,
    /// Allocation sequence number (program order, never reused).
    pub seq: u64,
    /// Computed result, valid once `ready` is set.
    pub result: u32,
    /// Result available; the entry may commit when it reaches the head.
    pub ready: bool,
}

/// Reorder buffer — circular FIFO keyed by absolute slot index.
pub struct Rob {
    entries: Vec<Option<RobEntry>>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of occupied slots.
    count: usize,
    /// Next allocation sequence number.
    next_seq: u64,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);
        Self {
            entries,
            head: 0,
            tail: 0,
            count: 0,
            next_seq: 0,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Allocates a slot for an issuing instruction and returns its absolute
    /// slot index. Returns `None` if the ROB is full.
    pub fn allocate(&mut self, instr: Instr) -> Option<usize> {
        if self.is_full() {
            return None;
        }

        let index = self.tail;
        self.entries[index] = Some(RobEntry {
            instr,
            seq: self.next_seq,
            result: 0,
            ready: false,
        });
        self.next_seq += 1;
        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        Some(index)
    }

    /// Returns the slot index of the oldest entry.
    #[inline]
    pub fn head_index(&self) -> usize {
        self.head
    }

    /// Returns the entry at a slot, if occupied.
    pub fn get(&self, index: usize) -> Option<&RobEntry> {
        self.entries[index].as_ref()
    }

    /// Stores a broadcast result and marks the producing entry ready.
    pub fn update(&mut self, cdb_data: &CdbPacket) {
        if let Some(entry) = self.entries[cdb_data.rob_index].as_mut() {
            entry.result = cdb_data.result;
            entry.ready = true;
        }
    }

    /// Retires the head entry, freeing its slot. Returns `None` if the ROB
    /// is empty.
    pub fn pop(&mut self) -> Option<RobEntry> {
        if self.count == 0 {
            return None;
        }

        let entry = self.entries[self.head].take();
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        entry
    }

    /// Iterates over occupied entries from head to tail in program order,
    /// yielding the slot index and the entry.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RobEntry)> {
        let capacity = self.entries.len().max(1);
        (0..self.count).filter_map(move |offset| {
            let index = (self.head + offset) % capacity;
            self.entries[index].as_ref().map(|entry| (index, entry))
        })
    }
}
