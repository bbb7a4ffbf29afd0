//! Order desk - a waiter's order-taking state machine
//!
//! Table selection (typed or QR-scanned), cart building against a fixed
//! menu catalog, and a two-stage order lifecycle: ACTIVE while the order
//! is open at the table, IN_PROGRESS once the bill has been sent to the
//! cashier. All state lives in one [`OrderDesk`] owned by the
//! event-handling thread; rendering and the camera integration are
//! external collaborators that only call the documented operations.

pub mod cart;
pub mod desk;
pub mod error;
pub mod ledger;
pub mod menu;
pub mod occupancy;
pub mod scan;
pub mod table;

// Re-exports
pub use cart::{Cart, CartLine};
pub use desk::OrderDesk;
pub use error::{DeskError, DeskResult};
pub use ledger::{Order, OrderLedger, OrderStatus};
pub use menu::{Menu, MenuItem};
pub use occupancy::{OccupancyError, OccupancyStore};
pub use scan::ScanSource;
pub use table::{TABLE_COUNT, TableId};
