use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::str::FromStr;

use crate::error::RecordError;

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;

// ─── OrderStatus ────────────────────────────────────────────────────────────

/// Lifecycle state of an order. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Placed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RecordError::UnknownStatus(s.to_string()))
    }
}

// ─── Money ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Jpy];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }
}

impl FromStr for Currency {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| RecordError::UnknownCurrency(s.to_string()))
    }
}

/// An amount in minor units (cents) of a currency.
///
/// Ordering compares the currency first, then the amount; amounts in
/// different currencies are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    pub currency: Currency,
    pub minor: i64,
}

impl Money {
    pub fn new(minor: i64, currency: Currency) -> Self {
        Self { currency, minor }
    }

    pub fn usd(minor: i64) -> Self {
        Self::new(minor, Currency::Usd)
    }
}

// ─── Measurement ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassUnit {
    Grams,
    Kilograms,
    Pounds,
}

impl MassUnit {
    pub const ALL: [MassUnit; 3] = [MassUnit::Grams, MassUnit::Kilograms, MassUnit::Pounds];

    pub fn symbol(self) -> &'static str {
        match self {
            MassUnit::Grams => "g",
            MassUnit::Kilograms => "kg",
            MassUnit::Pounds => "lb",
        }
    }

    fn grams_per_unit(self) -> f64 {
        match self {
            MassUnit::Grams => 1.0,
            MassUnit::Kilograms => 1_000.0,
            MassUnit::Pounds => 453.592_37,
        }
    }
}

impl FromStr for MassUnit {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MassUnit::ALL
            .into_iter()
            .find(|u| u.symbol() == s)
            .ok_or_else(|| RecordError::UnknownUnit(s.to_string()))
    }
}

/// A shipping weight. Ordering goes through grams so `1 kg` sorts after
/// `900 g`.
///
/// Equality is per unit and bitwise-total on the value (`f64::total_cmp`):
/// NaN equals NaN, and `-0.0` differs from `0.0`. `1 kg` and `1000 g` are not
/// equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: MassUnit,
}

impl Measurement {
    pub fn new(value: f64, unit: MassUnit) -> Self {
        Self { value, unit }
    }

    pub fn grams(value: f64) -> Self {
        Self::new(value, MassUnit::Grams)
    }

    pub fn kilograms(value: f64) -> Self {
        Self::new(value, MassUnit::Kilograms)
    }

    #[inline]
    pub fn in_grams(&self) -> f64 {
        self.value * self.unit.grams_per_unit()
    }

    pub fn cmp_mass(&self, other: &Self) -> Ordering {
        self.in_grams().total_cmp(&other.in_grams())
    }
}

impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.value.total_cmp(&other.value) == Ordering::Equal
    }
}

impl Eq for Measurement {}

// ─── LineItem ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: SmolStr,
    pub name: SmolStr,
    pub quantity: u32,
    /// Price per unit in the order's currency minor units.
    pub unit_price: i64,
}

impl LineItem {
    pub fn new(sku: impl Into<SmolStr>, name: impl Into<SmolStr>, quantity: u32, unit_price: i64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn subtotal(&self) -> i64 {
        self.unit_price * self.quantity as i64
    }
}

// ─── OrderField ─────────────────────────────────────────────────────────────

/// Named field of an order. [`OrderField::ALL`] is the declared order used by
/// field-wise equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    Id,
    Status,
    Customer,
    Total,
    PlacedAt,
    IsPriority,
    Weight,
    LineItems,
    Tags,
    Notes,
}

pub const FIELD_COUNT: usize = 10;

impl OrderField {
    pub const ALL: [OrderField; FIELD_COUNT] = [
        OrderField::Id,
        OrderField::Status,
        OrderField::Customer,
        OrderField::Total,
        OrderField::PlacedAt,
        OrderField::IsPriority,
        OrderField::Weight,
        OrderField::LineItems,
        OrderField::Tags,
        OrderField::Notes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::Status => "status",
            OrderField::Customer => "customer",
            OrderField::Total => "total",
            OrderField::PlacedAt => "placed_at",
            OrderField::IsPriority => "is_priority",
            OrderField::Weight => "weight",
            OrderField::LineItems => "line_items",
            OrderField::Tags => "tags",
            OrderField::Notes => "notes",
        }
    }

    /// Whether the text filter looks at this field directly. Drives
    /// [`Order::search_text`](crate::Order::search_text).
    pub fn is_searchable(self) -> bool {
        matches!(self, OrderField::Id | OrderField::Customer | OrderField::Notes)
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderField {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| RecordError::FieldNotFound(s.to_string()))
    }
}

// ─── SortOrder ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}
