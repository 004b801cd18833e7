//! Reservation Stations (RS).
//!
//! A fixed pool of slots holding operations that have issued but not yet
//! completed. Each slot tracks the operation, its reorder-buffer slot, and
//! the readiness of its two source operands. An operand is either a
//! captured value or a tag naming the reservation station that will
//! broadcast it on the common data bus.

use crate::isa::Instr;

use super::cdb::CdbPacket;

/// A source operand: a value captured at issue, or the reservation station
/// index of the in-flight producer that will broadcast it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// The operand value is available.
    Ready(u32),
    /// Waiting on a broadcast from the given reservation station.
    Waiting(usize),
}

impl Operand {
    /// Returns true if the operand value is available.
    #[inline]
    pub fn is_ready(self) -> bool {
        matches!(self, Operand::Ready(_))
    }

    /// Returns the captured value; 0 while still waiting.
    #[inline]
    pub fn value(self) -> u32 {
        match self {
            Operand::Ready(val) => val,
            Operand::Waiting(_) => 0,
        }
    }
}

/// An occupied reservation-station slot.
#[derive(Clone, Debug)]
pub struct RsEntry {
    /// The pending operation.
    pub instr: Instr,
    /// Reorder-buffer slot allocated to this operation.
    pub rob_index: usize,
    /// First source operand.
    pub rs1: Operand,
    /// Second source operand.
    pub rs2: Operand,
    /// The operation has been dispatched to a functional unit and must not
    /// be dispatched again.
    pub running: bool,
}

impl RsEntry {
    /// Returns true if both source operands are available.
    #[inline]
    pub fn operands_ready(&self) -> bool {
        self.rs1.is_ready() && self.rs2.is_ready()
    }

    /// Captures a common-data-bus broadcast into any operand waiting on the
    /// broadcasting reservation station.
    pub fn update_operands(&mut self, cdb_data: &CdbPacket) {
        if self.rs1 == Operand::Waiting(cdb_data.rs_index) {
            self.rs1 = Operand::Ready(cdb_data.result);
        }
        if self.rs2 == Operand::Waiting(cdb_data.rs_index) {
            self.rs2 = Operand::Ready(cdb_data.result);
        }
    }
}

/// Fixed pool of reservation stations, indexed by rs_index.
pub struct RsTable {
    entries: Vec<Option<RsEntry>>,
    count: usize,
}

impl RsTable {
    /// Creates a pool with the given number of slots.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);
        Self { entries, count: 0 }
    }

    /// Returns the number of slots in the pool.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Returns the entry at a slot, if occupied.
    pub fn get(&self, rs_index: usize) -> Option<&RsEntry> {
        self.entries[rs_index].as_ref()
    }

    /// Returns the entry at a slot mutably, if occupied.
    pub fn get_mut(&mut self, rs_index: usize) -> Option<&mut RsEntry> {
        self.entries[rs_index].as_mut()
    }

    /// Places an issuing operation into a free slot and returns its
    /// rs_index. Returns `None` if the pool is full.
    pub fn issue(
        &mut self,
        rob_index: usize,
        rs1: Operand,
        rs2: Operand,
        instr: Instr,
    ) -> Option<usize> {
        let free = self.entries.iter().position(|slot| slot.is_none())?;
        self.entries[free] = Some(RsEntry {
            instr,
            rob_index,
            rs1,
            rs2,
            running: false,
        });
        self.count += 1;
        Some(free)
    }

    /// Frees a slot after its result has been broadcast.
    pub fn release(&mut self, rs_index: usize) {
        if self.entries[rs_index].take().is_some() {
            self.count -= 1;
        }
    }

    /// Delivers a common-data-bus broadcast to every occupied slot.
    pub fn update_operands(&mut self, cdb_data: &CdbPacket) {
        for slot in self.entries.iter_mut().flatten() {
            slot.update_operands(cdb_data);
        }
    }
}
