//! Order ledger - submitted orders and their lifecycle
//!
//! Two states only: ACTIVE while the order is open at the table and
//! IN_PROGRESS once the bill has been sent to the cashier. Nothing in the
//! modeled workflow removes an IN_PROGRESS order; settlement happens
//! outside this system. A table is busy iff it carries an ACTIVE order -
//! any number of IN_PROGRESS orders may share a table.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cart::CartLine;
use crate::table::TableId;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Open at the table, not yet sent to the cashier
    #[default]
    Active,
    /// Sent to the cashier for settlement
    InProgress,
}

/// A submitted order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub table: TableId,
    /// Insertion order significant for display
    pub lines: Vec<CartLine>,
    /// Cached at submission: sum of `unit_price * quantity` over lines
    pub total: i64,
    pub status: OrderStatus,
    /// Unix milliseconds
    pub created_at: i64,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }
}

/// Snowflake-style order id: 41 bits of milliseconds past a fixed epoch
/// plus 12 random low bits. Time-ordered across submissions and still
/// within `Number.MAX_SAFE_INTEGER` for JSON consumers.
fn next_order_id() -> i64 {
    use rand::Rng;
    const EPOCH_MS: i64 = 1_704_067_200_000; // 2024-01-01 00:00:00 UTC
    let millis = (chrono::Utc::now().timestamp_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF;
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000);
    (millis << 12) | rand_bits
}

/// Submitted orders in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    /// The ACTIVE order currently occupying `table`, if any.
    ///
    /// This is the authoritative occupancy signal; the persisted hint
    /// store is never consulted.
    pub fn find_active_for_table(&self, table: &TableId) -> Option<&Order> {
        self.orders
            .iter()
            .find(|order| order.is_active() && &order.table == table)
    }

    /// Materialize submitted cart lines as a new ACTIVE order.
    ///
    /// The caller has already validated the table and non-empty cart;
    /// the total is computed and cached here, at submission time.
    pub(crate) fn submit(&mut self, table: TableId, lines: Vec<CartLine>) -> i64 {
        let total: i64 = lines.iter().map(|line| line.line_total()).sum();
        let order = Order {
            id: next_order_id(),
            table,
            lines,
            total,
            status: OrderStatus::Active,
            created_at: chrono::Utc::now().timestamp_millis(),
        };
        info!(
            order_id = order.id,
            table = %order.table,
            total,
            line_count = order.lines.len(),
            "Order submitted"
        );
        let id = order.id;
        self.orders.push(order);
        id
    }

    /// ACTIVE -> IN_PROGRESS. Unknown ids and already-billed orders are a
    /// no-op.
    pub fn request_bill(&mut self, order_id: i64) {
        match self.orders.iter_mut().find(|order| order.id == order_id) {
            Some(order) if order.is_active() => {
                order.status = OrderStatus::InProgress;
                info!(order_id, table = %order.table, "Bill sent to cashier");
            }
            Some(_) => debug!(order_id, "Bill already requested"),
            None => debug!(order_id, "Bill requested for unknown order"),
        }
    }

    /// Remove an order from the ledger, returning it for re-editing.
    ///
    /// No status check on purpose: the screen only offers reopen on
    /// ACTIVE orders, but the ledger itself permits any.
    pub(crate) fn remove(&mut self, order_id: i64) -> Option<Order> {
        let idx = self.orders.iter().position(|order| order.id == order_id)?;
        Some(self.orders.remove(idx))
    }

    pub fn active_orders(&self) -> Vec<&Order> {
        self.orders.iter().filter(|order| order.is_active()).collect()
    }

    pub fn in_progress_orders(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.status == OrderStatus::InProgress)
            .collect()
    }
}
