//! Stock service: the single owner of the in-memory inventory.
//!
//! ```text
//! open:    load snapshot (absent or corrupt -> empty inventory)
//! command: handle -> apply -> save snapshot
//! close:   final save if memory diverged from disk
//! ```
//!
//! A failed save never rolls back the applied change. The service stays
//! "dirty" until a later save succeeds.

use chrono::Utc;
use thiserror::Error;

use stockkeeper_core::{Aggregate, DomainError, ProductName};
use stockkeeper_events::Event;
use stockkeeper_inventory::{Inventory, InventoryCommand, InventoryEvent, Listing, StockAlert};

use crate::snapshot::{SnapshotError, SnapshotStore};

/// Outcome of an applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub events: Vec<InventoryEvent>,
    pub product: ProductName,
    /// Units on hand after the command.
    pub on_hand: u64,
    /// Set only for sales that leave the product low or sold out.
    pub alert: Option<StockAlert>,
}

impl Receipt {
    /// `true` when the command created the product.
    pub fn is_new_item(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, InventoryEvent::ItemAdded(_)))
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The command was rejected; nothing changed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The command was applied in memory but the snapshot write failed.
    #[error("change applied but not saved: {source}")]
    Persist {
        receipt: Receipt,
        #[source]
        source: SnapshotError,
    },
}

#[derive(Debug)]
pub struct StockService<S> {
    store: S,
    inventory: Inventory,
    dirty: bool,
}

impl<S> StockService<S>
where
    S: SnapshotStore,
{
    /// Load the inventory from `store`. Never fails: a missing snapshot starts
    /// fresh, a corrupt or unreadable one is logged and replaced by an empty
    /// inventory.
    pub fn open(store: S) -> Self {
        let location = store.location();
        tracing::info!(path = %location, "loading stock snapshot");

        let inventory = match store.load() {
            Ok(Some(inventory)) => {
                tracing::info!(path = %location, items = inventory.len(), "stock snapshot loaded");
                inventory
            }
            Ok(None) => {
                tracing::info!(path = %location, "no stock snapshot found; starting fresh");
                Inventory::empty()
            }
            Err(err) => {
                tracing::warn!(path = %location, error = %err, "failed to load stock snapshot; starting fresh");
                Inventory::empty()
            }
        };

        Self {
            store,
            inventory,
            dirty: false,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn listing(&self) -> Listing<'_> {
        self.inventory.listing()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `true` while the in-memory inventory differs from the last snapshot written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Add units of a product, creating it if needed.
    pub fn restock(&mut self, product: &str, quantity: &str) -> Result<Receipt, ServiceError> {
        let command = InventoryCommand::restock(product, quantity, Utc::now())?;
        self.execute(&command)
    }

    /// Remove units of a tracked product, all or nothing.
    pub fn sell(&mut self, product: &str, quantity: &str) -> Result<Receipt, ServiceError> {
        let command = InventoryCommand::sell(product, quantity, Utc::now())?;
        self.execute(&command)
    }

    pub fn execute(&mut self, command: &InventoryCommand) -> Result<Receipt, ServiceError> {
        let events = match self.inventory.execute(command) {
            Ok(events) => events,
            Err(err) => {
                tracing::info!(product = %command.product(), error = %err, "stock command rejected");
                return Err(err.into());
            }
        };

        let product = command.product().clone();
        let on_hand = self.inventory.quantity(&product).unwrap_or_default();
        let alert = match command {
            InventoryCommand::Sell(_) => StockAlert::after_sale(on_hand),
            InventoryCommand::Restock(_) => None,
        };

        for event in &events {
            tracing::info!(
                event_type = event.event_type(),
                product = %event.product(),
                quantity = event.quantity().get(),
                on_hand,
                "stock updated"
            );
        }
        match alert {
            Some(StockAlert::Low { remaining }) => {
                tracing::warn!(product = %product, remaining, "low stock");
            }
            Some(StockAlert::OutOfStock) => {
                tracing::warn!(product = %product, "out of stock");
            }
            None => {}
        }

        let receipt = Receipt {
            events,
            product,
            on_hand,
            alert,
        };

        self.dirty = true;
        match self.save() {
            Ok(()) => Ok(receipt),
            Err(source) => Err(ServiceError::Persist { receipt, source }),
        }
    }

    /// Overwrite the snapshot with the current inventory.
    pub fn save(&mut self) -> Result<(), SnapshotError> {
        match self.store.save(&self.inventory) {
            Ok(()) => {
                self.dirty = false;
                tracing::debug!(path = %self.store.location(), items = self.inventory.len(), "stock snapshot saved");
                Ok(())
            }
            Err(err) => {
                tracing::error!(path = %self.store.location(), error = %err, "failed to save stock snapshot");
                Err(err)
            }
        }
    }

    /// Shut the service down, writing a final snapshot if one is pending.
    pub fn close(mut self) -> Result<(), SnapshotError> {
        if self.dirty {
            self.save()?;
        }
        tracing::info!(path = %self.store.location(), "stock service closed");
        Ok(())
    }
}
