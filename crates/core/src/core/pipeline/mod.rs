//! Out-of-order pipeline structures.
//!
//! This module contains the bookkeeping structures the pipeline controller
//! coordinates each cycle:
//! 1. **RAT:** Register Alias Table mapping registers to in-flight producers.
//! 2. **ROB:** Reorder Buffer enforcing in-order commit.
//! 3. **RS:** Reservation Stations holding pending operations.
//! 4. **CDB/RST:** Common Data Bus broadcast channel and the reorder-slot →
//!    reservation-station tracker.
//! 5. **Issue queue:** FIFO of decoded instructions from the front-end.

/// Common data bus and reservation-station tracker.
pub mod cdb;

/// Issue queue between front-end and backend.
pub mod queue;

/// Register alias table.
pub mod rat;

/// Reorder buffer.
pub mod rob;

/// Reservation stations.
pub mod rs;

pub use self::cdb::{Cdb, CdbPacket, RsTracker};
pub use self::queue::IssueQueue;
pub use self::rat::Rat;
pub use self::rob::{Rob, RobEntry};
pub use self::rs::{Operand, RsEntry, RsTable};
