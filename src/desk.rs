//! OrderDesk - the single owning controller
//!
//! Owns the whole state tree: menu catalog, cart, order ledger and the
//! currently served table. Presentation reads the state and calls these
//! operations; it never mutates the tree directly. Every operation runs
//! to completion on the event-handling thread before the next one starts.

use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::error::{DeskError, DeskResult};
use crate::ledger::{Order, OrderLedger};
use crate::menu::Menu;
use crate::occupancy::OccupancyStore;
use crate::scan::{ScanIntake, ScanSource, scan_channel};
use crate::table::TableId;

pub struct OrderDesk {
    menu: Menu,
    cart: Cart,
    ledger: OrderLedger,
    current_table: Option<TableId>,
    scan_source: ScanSource,
    scan_intake: ScanIntake,
    /// Cold-start hint store; never authoritative for `is_busy`
    occupancy: Option<OccupancyStore>,
}

impl OrderDesk {
    pub fn new(menu: Menu) -> Self {
        let (scan_source, scan_intake) = scan_channel();
        Self {
            menu,
            cart: Cart::default(),
            ledger: OrderLedger::default(),
            current_table: None,
            scan_source,
            scan_intake,
            occupancy: None,
        }
    }

    /// Attach the persisted occupancy hint store (fixed-venue mode).
    pub fn with_occupancy(mut self, store: OccupancyStore) -> Self {
        self.occupancy = Some(store);
        self
    }

    /// Handle for the QR decode callback.
    pub fn scan_source(&self) -> ScanSource {
        self.scan_source.clone()
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn current_table(&self) -> Option<&TableId> {
        self.current_table.as_ref()
    }

    /// True iff an ACTIVE order occupies `table`. Ledger-derived only.
    pub fn is_busy(&self, table: &TableId) -> bool {
        self.ledger.find_active_for_table(table).is_some()
    }

    /// Start serving a table from manual entry.
    pub fn open_table(&mut self, raw: &str) -> DeskResult<()> {
        let table = TableId::parse(raw)?;
        self.open_validated(table)
    }

    fn open_validated(&mut self, table: TableId) -> DeskResult<()> {
        if let Some(existing) = self.ledger.find_active_for_table(&table) {
            debug!(table = %table, order_id = existing.id, "Open rejected, table busy");
            return Err(DeskError::TableBusy(table.to_string()));
        }
        if let Some(store) = self.occupancy.as_mut()
            && let Some(slot) = table.slot()
        {
            store.set_occupied(slot, true)?;
        }
        // Switching tables discards any stale selection
        self.cart.clear();
        info!(table = %table, "Serving table");
        self.current_table = Some(table);
        Ok(())
    }

    /// Drain pending QR decodes, one at a time, opening the table when
    /// the payload is a free in-range table number. Malformed, busy and
    /// out-of-range results are logged and dropped without side effects.
    pub fn process_scans(&mut self) {
        while let Some(raw) = self.scan_intake.try_next() {
            match TableId::from_scan(&raw) {
                Ok(table) => {
                    if let Err(err) = self.open_validated(table) {
                        warn!(raw = %raw, error = %err, "Scan ignored");
                    }
                }
                Err(err) => debug!(raw = %raw, error = %err, "Malformed scan ignored"),
            }
        }
    }

    /// Add one unit of a menu item to the cart. Unknown ids and
    /// unavailable items are ignored.
    pub fn add_item(&mut self, item_id: i64) {
        match self.menu.get(item_id) {
            Some(item) => self.cart.add_item(item),
            None => debug!(item_id, "Unknown menu item ignored"),
        }
    }

    /// Signed quantity delta on a cart line; see [`Cart::change_quantity`].
    pub fn change_quantity(&mut self, item_id: i64, delta: i64) {
        self.cart.change_quantity(item_id, delta);
    }

    pub fn cart_total(&self) -> i64 {
        self.cart.total()
    }

    /// Abandon the current table and selection without submitting.
    pub fn cancel_table(&mut self) {
        if let Some(table) = self.current_table.take() {
            debug!(table = %table, "Serving cancelled");
        }
        self.cart.clear();
    }

    /// Submit the cart as a new ACTIVE order at the served table.
    ///
    /// Nothing happens without a served table and a non-empty cart, or
    /// when the served table already carries an ACTIVE order (reachable
    /// by reopening a billed order after the table was reused). On
    /// success the cart and table selection are cleared and the new
    /// order id is returned.
    pub fn submit_order(&mut self) -> Option<i64> {
        if self.cart.is_empty() {
            debug!("Submit ignored, empty cart");
            return None;
        }
        match self.current_table.as_ref() {
            None => {
                debug!("Submit ignored, no table being served");
                return None;
            }
            Some(table) if self.ledger.find_active_for_table(table).is_some() => {
                debug!(table = %table, "Submit ignored, table already has an open order");
                return None;
            }
            Some(_) => {}
        }
        let table = self.current_table.take()?;
        let lines = self.cart.take_lines();
        Some(self.ledger.submit(table, lines))
    }

    /// Send the bill to the cashier; see [`OrderLedger::request_bill`].
    pub fn request_bill(&mut self, order_id: i64) {
        self.ledger.request_bill(order_id);
    }

    /// Pull a placed order back into the cart for more items.
    ///
    /// The order leaves the ledger, its lines become the live cart and
    /// its table becomes the served table again. Unknown ids are a no-op.
    pub fn reopen(&mut self, order_id: i64) {
        let Some(order) = self.ledger.remove(order_id) else {
            debug!(order_id, "Reopen ignored, unknown order");
            return;
        };
        info!(order_id, table = %order.table, "Order reopened for editing");
        self.cart.set_lines(order.lines);
        self.current_table = Some(order.table);
    }

    pub fn active_orders(&self) -> Vec<&Order> {
        self.ledger.active_orders()
    }

    pub fn in_progress_orders(&self) -> Vec<&Order> {
        self.ledger.in_progress_orders()
    }

    /// Cold-start hint from the persisted occupancy map. `false` when no
    /// store is attached.
    pub fn occupancy_hint(&self, slot: usize) -> bool {
        self.occupancy
            .as_ref()
            .is_some_and(|store| store.is_occupied(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuItem;

    fn sample_menu() -> Menu {
        Menu::new(vec![
            MenuItem {
                id: 1,
                name: "Osh".to_string(),
                unit_price: 15_000,
                available: true,
            },
            MenuItem {
                id: 2,
                name: "Kabob".to_string(),
                unit_price: 18_000,
                available: false,
            },
        ])
    }

    #[test]
    fn open_table_rejects_busy_table() {
        let mut desk = OrderDesk::new(sample_menu());
        desk.open_table("5").unwrap();
        desk.add_item(1);
        desk.submit_order().unwrap();

        assert!(matches!(desk.open_table("5"), Err(DeskError::TableBusy(_))));
        assert!(desk.open_table("6").is_ok());
    }

    #[test]
    fn submit_without_table_or_cart_changes_nothing() {
        let mut desk = OrderDesk::new(sample_menu());

        // empty cart
        desk.open_table("5").unwrap();
        assert_eq!(desk.submit_order(), None);
        assert!(desk.current_table().is_some());

        // no table
        desk.cancel_table();
        desk.add_item(1);
        assert_eq!(desk.submit_order(), None);
        assert_eq!(desk.cart().lines().len(), 1);
        assert!(desk.active_orders().is_empty());
    }

    #[test]
    fn submit_cannot_create_a_second_active_order_at_a_table() {
        let mut desk = OrderDesk::new(sample_menu());

        // bill the first order so table 5 frees up and gets reused
        desk.open_table("5").unwrap();
        desk.add_item(1);
        let billed = desk.submit_order().unwrap();
        desk.request_bill(billed);

        desk.open_table("5").unwrap();
        desk.add_item(1);
        desk.submit_order().unwrap();

        // reopening the billed order puts table 5 back in service even
        // though it already carries an open order
        desk.reopen(billed);
        assert_eq!(desk.current_table().unwrap().as_str(), "5");

        assert_eq!(desk.submit_order(), None);
        // the edit is kept, nothing was committed
        assert_eq!(desk.cart().lines().len(), 1);
        assert_eq!(desk.current_table().unwrap().as_str(), "5");
        let at_table: Vec<_> = desk
            .active_orders()
            .into_iter()
            .filter(|order| order.table.as_str() == "5")
            .collect();
        assert_eq!(at_table.len(), 1);
    }

    #[test]
    fn switching_tables_clears_the_cart() {
        let mut desk = OrderDesk::new(sample_menu());
        desk.open_table("5").unwrap();
        desk.add_item(1);

        desk.open_table("6").unwrap();
        assert!(desk.cart().is_empty());
    }

    #[test]
    fn unavailable_and_unknown_items_are_ignored() {
        let mut desk = OrderDesk::new(sample_menu());
        desk.open_table("5").unwrap();
        desk.add_item(2);
        desk.add_item(99);
        assert!(desk.cart().is_empty());
    }

    #[test]
    fn scans_open_only_free_in_range_tables() {
        let mut desk = OrderDesk::new(sample_menu());
        let source = desk.scan_source();

        source.push("0");
        source.push("31");
        source.push("abc");
        desk.process_scans();
        assert!(desk.current_table().is_none());

        source.push("07");
        desk.process_scans();
        assert_eq!(desk.current_table().unwrap().as_str(), "7");
    }

    #[test]
    fn scan_for_busy_table_is_dropped() {
        let mut desk = OrderDesk::new(sample_menu());
        desk.open_table("7").unwrap();
        desk.add_item(1);
        desk.submit_order().unwrap();

        desk.scan_source().push("7");
        desk.process_scans();
        assert!(desk.current_table().is_none());
    }

    #[test]
    fn occupancy_hint_is_false_without_a_store() {
        let desk = OrderDesk::new(sample_menu());
        assert!(!desk.occupancy_hint(0));
    }
}
