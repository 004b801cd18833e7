//! Common Data Bus (CDB) and reservation-station tracker (RST).
//!
//! The CDB is a single-slot broadcast channel: at most one functional unit
//! publishes a result per cycle, and the writeback stage drains it before the
//! next execute can publish again. The RST is the reverse lookup from a
//! reorder-buffer slot to the reservation station producing its value,
//! populated at issue and cleared when the broadcast lands.

/// A result broadcast on the common data bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CdbPacket {
    /// The computed result value.
    pub result: u32,
    /// Reorder-buffer slot of the producing instruction.
    pub rob_index: usize,
    /// Reservation station that produced the result.
    pub rs_index: usize,
}

/// Single-slot common data bus.
#[derive(Default)]
pub struct Cdb {
    slot: Option<CdbPacket>,
}

impl Cdb {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no broadcast is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Latches a broadcast. Fails (returns false) if a broadcast is already
    /// pending.
    pub fn push(&mut self, packet: CdbPacket) -> bool {
        if self.slot.is_some() {
            return false;
        }
        self.slot = Some(packet);
        true
    }

    /// Peeks at the pending broadcast.
    pub fn data(&self) -> Option<&CdbPacket> {
        self.slot.as_ref()
    }

    /// Clears and returns the pending broadcast.
    pub fn pop(&mut self) -> Option<CdbPacket> {
        self.slot.take()
    }
}

/// Reservation-station tracker: reorder-buffer slot → producing rs_index.
pub struct RsTracker {
    map: Vec<Option<usize>>,
}

impl RsTracker {
    /// Creates a tracker sized to the reorder buffer.
    pub fn new(rob_capacity: usize) -> Self {
        Self {
            map: vec![None; rob_capacity],
        }
    }

    /// Records that `rs_index` is producing the value for `rob_index`.
    pub fn set(&mut self, rob_index: usize, rs_index: usize) {
        self.map[rob_index] = Some(rs_index);
    }

    /// Returns the reservation station producing `rob_index`, if any.
    pub fn get(&self, rob_index: usize) -> Option<usize> {
        self.map[rob_index]
    }

    /// Clears the mapping for a reorder-buffer slot.
    pub fn clear(&mut self, rob_index: usize) {
        self.map[rob_index] = None;
    }
}
