use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::cow::FieldwiseEq;
use crate::probe::Probe;
use crate::types::*;

/// The field data behind an [`Order`](super::Order) handle.
///
/// Never written while more than one handle references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStorage {
    pub id: SmolStr,
    pub status: OrderStatus,
    pub customer: SmolStr,
    pub total: Money,
    #[serde(default)]
    pub placed_at: Option<u64>,
    #[serde(default)]
    pub is_priority: bool,
    pub weight: Measurement,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub tags: FastMap<SmolStr, SmolStr>,
    #[serde(default)]
    pub notes: Option<SmolStr>,
}

impl FieldwiseEq for OrderStorage {
    /// Compares in [`OrderField::ALL`] order and stops at the first mismatch.
    fn fieldwise_eq(&self, other: &Self, probe: &dyn Probe) -> bool {
        macro_rules! field {
            ($tag:expr, $lhs:expr, $rhs:expr) => {
                probe.field_compared($tag.name());
                if $lhs != $rhs {
                    return false;
                }
            };
        }

        field!(OrderField::Id, self.id, other.id);
        field!(OrderField::Status, self.status, other.status);
        field!(OrderField::Customer, self.customer, other.customer);
        field!(OrderField::Total, self.total, other.total);
        field!(OrderField::PlacedAt, self.placed_at, other.placed_at);
        field!(OrderField::IsPriority, self.is_priority, other.is_priority);
        field!(OrderField::Weight, self.weight, other.weight);
        field!(OrderField::LineItems, self.line_items, other.line_items);
        field!(OrderField::Tags, self.tags, other.tags);
        field!(OrderField::Notes, self.notes, other.notes);
        true
    }
}
