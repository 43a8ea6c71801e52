use smol_str::SmolStr;
use std::cmp::Ordering;

use super::record::Order;
use crate::error::RecordError;
use crate::types::*;
use crate::value::{FieldValue, Number};

impl Order {
    // ════════════════════════════════════════════════════════════════════════
    // Dynamic read access
    // ════════════════════════════════════════════════════════════════════════

    /// Read a field as a [`FieldValue`]. Allocates for the nested fields.
    pub fn get_field(&self, field: OrderField) -> FieldValue {
        let s = self.storage();
        match field {
            OrderField::Id => FieldValue::Str(s.id.clone()),
            OrderField::Status => FieldValue::from(s.status.as_str()),
            OrderField::Customer => FieldValue::Str(s.customer.clone()),
            OrderField::Total => {
                let mut map = FastMap::default();
                map.insert(SmolStr::new_static("minor"), FieldValue::from(s.total.minor));
                map.insert(
                    SmolStr::new_static("currency"),
                    FieldValue::from(s.total.currency.code()),
                );
                FieldValue::Object(map)
            }
            OrderField::PlacedAt => FieldValue::from(s.placed_at),
            OrderField::IsPriority => FieldValue::Bool(s.is_priority),
            OrderField::Weight => {
                let mut map = FastMap::default();
                map.insert(SmolStr::new_static("value"), FieldValue::from(s.weight.value));
                map.insert(SmolStr::new_static("unit"), FieldValue::from(s.weight.unit.symbol()));
                FieldValue::Object(map)
            }
            OrderField::LineItems => FieldValue::Array(
                s.line_items
                    .iter()
                    .map(|item| {
                        let mut map = FastMap::default();
                        map.insert(SmolStr::new_static("sku"), FieldValue::Str(item.sku.clone()));
                        map.insert(SmolStr::new_static("name"), FieldValue::Str(item.name.clone()));
                        map.insert(
                            SmolStr::new_static("quantity"),
                            FieldValue::Number(Number::U64(item.quantity as u64)),
                        );
                        map.insert(
                            SmolStr::new_static("unit_price"),
                            FieldValue::from(item.unit_price),
                        );
                        FieldValue::Object(map)
                    })
                    .collect(),
            ),
            OrderField::Tags => FieldValue::Object(
                s.tags
                    .iter()
                    .map(|(k, v)| (k.clone(), FieldValue::Str(v.clone())))
                    .collect(),
            ),
            OrderField::Notes => FieldValue::from(s.notes.clone()),
        }
    }

    /// [`get_field`](Order::get_field) by field name.
    pub fn get_field_by_name(&self, name: &str) -> Result<FieldValue, RecordError> {
        Ok(self.get_field(name.parse::<OrderField>()?))
    }

    /// Text of a string-valued field; `None` for other fields and unset notes.
    pub fn text_of(&self, field: OrderField) -> Option<&str> {
        let s = self.storage();
        match field {
            OrderField::Id => Some(s.id.as_str()),
            OrderField::Customer => Some(s.customer.as_str()),
            OrderField::Notes => s.notes.as_deref(),
            _ => None,
        }
    }

    /// Text of every [searchable](OrderField::is_searchable) field, in
    /// declared order.
    pub fn search_text(&self) -> impl Iterator<Item = &str> {
        OrderField::ALL
            .into_iter()
            .filter(|field| field.is_searchable())
            .filter_map(move |field| self.text_of(field))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Ordering
    // ════════════════════════════════════════════════════════════════════════

    /// Ascending order of `self` and `other` on a single field.
    ///
    /// Nested fields order by element count.
    pub fn cmp_field(&self, other: &Order, field: OrderField) -> Ordering {
        if self.is_identical(other) {
            return Ordering::Equal;
        }
        let (a, b) = (self.storage(), other.storage());
        match field {
            OrderField::Id => a.id.cmp(&b.id),
            OrderField::Status => a.status.cmp(&b.status),
            OrderField::Customer => a.customer.cmp(&b.customer),
            OrderField::Total => a.total.cmp(&b.total),
            OrderField::PlacedAt => a.placed_at.cmp(&b.placed_at),
            OrderField::IsPriority => a.is_priority.cmp(&b.is_priority),
            OrderField::Weight => a.weight.cmp_mass(&b.weight),
            OrderField::LineItems => a.line_items.len().cmp(&b.line_items.len()),
            OrderField::Tags => a.tags.len().cmp(&b.tags.len()),
            OrderField::Notes => a.notes.cmp(&b.notes),
        }
    }
}
