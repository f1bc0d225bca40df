use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use stockkeeper_core::{Aggregate, DomainError, DomainResult, ProductName, Quantity};
use stockkeeper_events::Event;

/// Aggregate root: the whole supermarket inventory.
///
/// Maps normalized product names to units on hand, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: IndexMap<ProductName, u64>,
    version: u64,
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Units on hand for a product, `None` if it is not tracked.
    pub fn quantity(&self, product: &ProductName) -> Option<u64> {
        self.items.get(product).copied()
    }

    pub fn contains(&self, product: &ProductName) -> bool {
        self.items.contains_key(product)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lazy listing of `(product, quantity)` pairs in insertion order.
    ///
    /// The listing borrows the inventory; clone it or call `listing()` again
    /// to walk the entries a second time.
    pub fn listing(&self) -> Listing<'_> {
        Listing {
            inner: self.items.iter(),
        }
    }
}

impl FromIterator<(ProductName, u64)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (ProductName, u64)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            version: 0,
        }
    }
}

/// Snapshot form: a flat JSON object of `name -> units`.
impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

/// Keys are normalized on the way in; of two keys that normalize to the same
/// name the later one wins.
impl<'de> Deserialize<'de> for Inventory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = IndexMap::<ProductName, u64>::deserialize(deserializer)?;
        Ok(Self { items, version: 0 })
    }
}

/// Iterator returned by [`Inventory::listing`].
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    inner: indexmap::map::Iter<'a, ProductName, u64>,
}

impl<'a> Iterator for Listing<'a> {
    type Item = (&'a ProductName, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, units)| (name, *units))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Listing<'_> {}

/// Command: Restock (add units, creating the product if needed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restock {
    pub product: ProductName,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Sell (remove units, all or nothing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sell {
    pub product: ProductName,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    Restock(Restock),
    Sell(Sell),
}

impl InventoryCommand {
    /// Build a restock command from raw user input.
    ///
    /// Only the quantity can be rejected; any product name is normalized.
    pub fn restock(product: &str, quantity: &str, occurred_at: DateTime<Utc>) -> DomainResult<Self> {
        let quantity = Quantity::parse(quantity)?;
        let product = ProductName::new(product);
        Ok(Self::Restock(Restock {
            product,
            quantity,
            occurred_at,
        }))
    }

    /// Build a sell command from raw user input.
    pub fn sell(product: &str, quantity: &str, occurred_at: DateTime<Utc>) -> DomainResult<Self> {
        let quantity = Quantity::parse(quantity)?;
        let product = ProductName::new(product);
        Ok(Self::Sell(Sell {
            product,
            quantity,
            occurred_at,
        }))
    }

    pub fn product(&self) -> &ProductName {
        match self {
            InventoryCommand::Restock(cmd) => &cmd.product,
            InventoryCommand::Sell(cmd) => &cmd.product,
        }
    }
}

/// Event: ItemAdded (first restock of a product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub product: ProductName,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: Restocked (units added to a tracked product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restocked {
    pub product: ProductName,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: Sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sold {
    pub product: ProductName,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemAdded(ItemAdded),
    Restocked(Restocked),
    Sold(Sold),
}

impl InventoryEvent {
    pub fn product(&self) -> &ProductName {
        match self {
            InventoryEvent::ItemAdded(e) => &e.product,
            InventoryEvent::Restocked(e) => &e.product,
            InventoryEvent::Sold(e) => &e.product,
        }
    }

    pub fn quantity(&self) -> Quantity {
        match self {
            InventoryEvent::ItemAdded(e) => e.quantity,
            InventoryEvent::Restocked(e) => e.quantity,
            InventoryEvent::Sold(e) => e.quantity,
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemAdded(_) => "inventory.item.added",
            InventoryEvent::Restocked(_) => "inventory.item.restocked",
            InventoryEvent::Sold(_) => "inventory.item.sold",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemAdded(e) => e.occurred_at,
            InventoryEvent::Restocked(e) => e.occurred_at,
            InventoryEvent::Sold(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Inventory {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ItemAdded(e) => {
                self.items.insert(e.product.clone(), e.quantity.get());
            }
            InventoryEvent::Restocked(e) => {
                let units = self.items.entry(e.product.clone()).or_insert(0);
                *units = units.saturating_add(e.quantity.get());
            }
            InventoryEvent::Sold(e) => {
                if let Some(units) = self.items.get_mut(&e.product) {
                    *units = units.saturating_sub(e.quantity.get());
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::Restock(cmd) => self.handle_restock(cmd),
            InventoryCommand::Sell(cmd) => self.handle_sell(cmd),
        }
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Inventory {
    fn handle_restock(&self, cmd: &Restock) -> Result<Vec<InventoryEvent>, DomainError> {
        let Some(on_hand) = self.quantity(&cmd.product) else {
            return Ok(vec![InventoryEvent::ItemAdded(ItemAdded {
                product: cmd.product.clone(),
                quantity: cmd.quantity,
                occurred_at: cmd.occurred_at,
            })]);
        };

        if on_hand.checked_add(cmd.quantity.get()).is_none() {
            return Err(DomainError::invariant(format!(
                "restocking {} units of {} would overflow the stock counter",
                cmd.quantity, cmd.product
            )));
        }

        Ok(vec![InventoryEvent::Restocked(Restocked {
            product: cmd.product.clone(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_sell(&self, cmd: &Sell) -> Result<Vec<InventoryEvent>, DomainError> {
        let on_hand = self
            .quantity(&cmd.product)
            .ok_or_else(|| DomainError::not_tracked(cmd.product.as_str()))?;

        if cmd.quantity.get() > on_hand {
            return Err(DomainError::insufficient_stock(
                cmd.product.as_str(),
                cmd.quantity.get(),
                on_hand,
            ));
        }

        Ok(vec![InventoryEvent::Sold(Sold {
            product: cmd.product.clone(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }
}
