//! User-facing text for the shell.

use std::io::{self, Write};

use stockkeeper_core::{DomainError, ProductName};
use stockkeeper_infra::{Receipt, ServiceError};
use stockkeeper_inventory::{InventoryEvent, StockAlert};

const RULE_WIDTH: usize = 40;

/// Print the current stock, one product per line, in insertion order.
pub fn stock<'a, W, I>(out: &mut W, listing: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a ProductName, u64)>,
{
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "      Current Stock Availability")?;
    writeln!(out, "{rule}")?;

    let mut empty = true;
    for (product, units) in listing {
        empty = false;
        writeln!(out, "{product}: {units} units")?;
    }
    if empty {
        writeln!(out, "--- Inventory is currently empty. ---")?;
    }

    writeln!(out, "{rule}")
}

pub fn menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Available Actions ---")?;
    writeln!(out, "1: Restock (add stock)")?;
    writeln!(out, "2: Record Sale (subtract stock)")?;
    writeln!(out, "3: Exit system")
}

/// Print what a successful (or applied-but-unsaved) command did.
pub fn receipt<W: Write>(out: &mut W, receipt: &Receipt) -> io::Result<()> {
    for event in &receipt.events {
        match event {
            InventoryEvent::ItemAdded(e) => writeln!(
                out,
                "NEW ITEM ADDED: {} added with initial stock of {} units.",
                e.product, e.quantity
            )?,
            InventoryEvent::Restocked(e) => writeln!(
                out,
                "RESTOCK SUCCESS: Added {} units of {}.",
                e.quantity, e.product
            )?,
            InventoryEvent::Sold(e) => writeln!(
                out,
                "SALE SUCCESS: Sold {} units of {}.",
                e.quantity, e.product
            )?,
        }
    }

    match receipt.alert {
        Some(StockAlert::Low { remaining }) => writeln!(
            out,
            "LOW STOCK ALERT! {} is now at {} units.",
            receipt.product, remaining
        ),
        Some(StockAlert::OutOfStock) => writeln!(
            out,
            "OUT OF STOCK ALERT! {} is now completely sold out.",
            receipt.product
        ),
        None => Ok(()),
    }
}

pub fn saved<W: Write>(out: &mut W, location: &str) -> io::Result<()> {
    writeln!(out, "Stock successfully saved to {location}.")
}

pub fn error<W: Write>(out: &mut W, err: &ServiceError) -> io::Result<()> {
    match err {
        ServiceError::Domain(DomainError::InvalidQuantity(_)) => {
            writeln!(out, "Quantity must be a positive number.")
        }
        ServiceError::Domain(DomainError::NotTracked(product)) => {
            writeln!(out, "ERROR: Product '{product}' is not tracked in the inventory.")
        }
        ServiceError::Domain(DomainError::InsufficientStock {
            product,
            requested,
            available,
        }) => writeln!(
            out,
            "ERROR: Cannot sell {requested} units of {product}. Only {available} available."
        ),
        ServiceError::Domain(other) => writeln!(out, "ERROR: {other}"),
        ServiceError::Persist { receipt: r, source } => {
            receipt(out, r)?;
            writeln!(
                out,
                "ERROR: could not save stock ({source}). The change is kept in memory and will be saved with the next successful write."
            )
        }
    }
}
