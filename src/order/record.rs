use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::storage::OrderStorage;
use crate::cow::CowBox;
use crate::error::RecordError;
use crate::probe::Probe;
use crate::types::*;

// ─── Handle ─────────────────────────────────────────────────────────────────

/// A sample order with value semantics.
///
/// The handle is one pointer wide. Cloning shares the storage block; the
/// first setter called on a shared handle forks it, so other handles never
/// observe the write.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order {
    pub(super) inner: CowBox<OrderStorage>,
}

impl Order {
    /// Start building an order with the required fields; everything else
    /// defaults to empty/false/`None`.
    pub fn builder(id: impl Into<SmolStr>, customer: impl Into<SmolStr>) -> OrderBuilder {
        OrderBuilder::new(id.into(), customer.into())
    }

    /// Wrap a fully populated storage block.
    #[inline]
    pub fn from_storage(storage: OrderStorage) -> Self {
        Self {
            inner: CowBox::new(storage),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    #[inline]
    pub fn storage(&self) -> &OrderStorage {
        self.inner.get()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Identity & equality
    // ════════════════════════════════════════════════════════════════════════

    /// `true` iff both handles reference the same storage block. O(1).
    #[inline]
    pub fn is_identical(&self, other: &Order) -> bool {
        self.inner.is_identical(&other.inner)
    }

    /// `true` iff a setter on this handle would write in place.
    #[inline]
    pub fn is_unique(&self) -> bool {
        self.inner.is_unique()
    }

    #[inline]
    pub fn ref_count(&self) -> usize {
        self.inner.ref_count()
    }

    /// `==` reporting each step to `probe`.
    #[inline]
    pub fn eq_with(&self, other: &Order, probe: &dyn Probe) -> bool {
        self.inner.eq_with(&other.inner, probe)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Typed getters (borrow straight from the storage block)
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn id(&self) -> &str {
        &self.storage().id
    }

    #[inline]
    pub fn status(&self) -> OrderStatus {
        self.storage().status
    }

    #[inline]
    pub fn customer(&self) -> &str {
        &self.storage().customer
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.storage().total
    }

    #[inline]
    pub fn placed_at(&self) -> Option<u64> {
        self.storage().placed_at
    }

    #[inline]
    pub fn is_priority(&self) -> bool {
        self.storage().is_priority
    }

    #[inline]
    pub fn weight(&self) -> Measurement {
        self.storage().weight
    }

    #[inline]
    pub fn line_items(&self) -> &[LineItem] {
        &self.storage().line_items
    }

    #[inline]
    pub fn tags(&self) -> &FastMap<SmolStr, SmolStr> {
        &self.storage().tags
    }

    #[inline]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.storage().tags.get(key).map(SmolStr::as_str)
    }

    #[inline]
    pub fn notes(&self) -> Option<&str> {
        self.storage().notes.as_deref()
    }
}

impl PartialEq for Order {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl std::fmt::Debug for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Order")
            .field("id", &self.id())
            .field("status", &self.status())
            .field("customer", &self.customer())
            .finish_non_exhaustive()
    }
}

// ─── Builder ────────────────────────────────────────────────────────────────

pub struct OrderBuilder {
    storage: OrderStorage,
}

impl OrderBuilder {
    fn new(id: SmolStr, customer: SmolStr) -> Self {
        Self {
            storage: OrderStorage {
                id,
                status: OrderStatus::Placed,
                customer,
                total: Money::usd(0),
                placed_at: None,
                is_priority: false,
                weight: Measurement::grams(0.0),
                line_items: Vec::new(),
                tags: FastMap::default(),
                notes: None,
            },
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.storage.status = status;
        self
    }

    pub fn total(mut self, total: Money) -> Self {
        self.storage.total = total;
        self
    }

    pub fn placed_at(mut self, unix_secs: u64) -> Self {
        self.storage.placed_at = Some(unix_secs);
        self
    }

    pub fn priority(mut self, is_priority: bool) -> Self {
        self.storage.is_priority = is_priority;
        self
    }

    pub fn weight(mut self, weight: Measurement) -> Self {
        self.storage.weight = weight;
        self
    }

    pub fn line_item(mut self, item: LineItem) -> Self {
        self.storage.line_items.push(item);
        self
    }

    pub fn tag(mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.storage.tags.insert(key.into(), value.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<SmolStr>) -> Self {
        self.storage.notes = Some(notes.into());
        self
    }

    /// Allocates the single storage block for the new order.
    pub fn build(self) -> Order {
        Order::from_storage(self.storage)
    }
}
