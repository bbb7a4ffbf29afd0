//! Menu catalog
//!
//! Static, read-only input injected once at startup. The desk never
//! mutates it; availability is decided by whoever builds the catalog.

use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    /// Unit price in the smallest currency unit
    pub unit_price: i64,
    /// Unavailable items are silently ignored by the cart
    pub available: bool,
}

/// Read-only catalog; catalog order is preserved for display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn get(&self, id: i64) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}
