use smol_str::SmolStr;

use super::record::Order;
use super::storage::OrderStorage;
use crate::error::RecordError;
use crate::types::*;
use crate::value::FieldValue;

impl Order {
    // ════════════════════════════════════════════════════════════════════════
    // Internal: the single write path
    // ════════════════════════════════════════════════════════════════════════

    /// Exclusive access to the storage block, forked first if shared.
    #[inline]
    fn storage_mut(&mut self) -> &mut OrderStorage {
        self.inner.make_mut()
    }

    /// Apply several edits with at most one fork.
    pub fn modify<R>(&mut self, edit: impl FnOnce(&mut OrderStorage) -> R) -> R {
        edit(self.storage_mut())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Typed setters
    // ════════════════════════════════════════════════════════════════════════

    pub fn set_id(&mut self, id: impl Into<SmolStr>) {
        self.storage_mut().id = id.into();
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.storage_mut().status = status;
    }

    pub fn set_customer(&mut self, customer: impl Into<SmolStr>) {
        self.storage_mut().customer = customer.into();
    }

    pub fn set_total(&mut self, total: Money) {
        self.storage_mut().total = total;
    }

    pub fn set_placed_at(&mut self, unix_secs: Option<u64>) {
        self.storage_mut().placed_at = unix_secs;
    }

    pub fn set_priority(&mut self, is_priority: bool) {
        self.storage_mut().is_priority = is_priority;
    }

    pub fn set_weight(&mut self, weight: Measurement) {
        self.storage_mut().weight = weight;
    }

    pub fn set_notes(&mut self, notes: Option<SmolStr>) {
        self.storage_mut().notes = notes;
    }

    pub fn line_items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.storage_mut().line_items
    }

    pub fn push_line_item(&mut self, item: LineItem) {
        self.storage_mut().line_items.push(item);
    }

    pub fn tags_mut(&mut self) -> &mut FastMap<SmolStr, SmolStr> {
        &mut self.storage_mut().tags
    }

    /// Insert or replace a tag, returning the previous value.
    pub fn set_tag(&mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Option<SmolStr> {
        self.storage_mut().tags.insert(key.into(), value.into())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Dynamic setter
    // ════════════════════════════════════════════════════════════════════════

    /// Set a field from a [`FieldValue`]. Accepts the shapes
    /// [`get_field`](Order::get_field) produces; `Total` and `Weight` also take a
    /// bare number, keeping the current currency/unit.
    ///
    /// The value is validated before the storage is touched, so a failed call
    /// never forks.
    pub fn set_field(&mut self, field: OrderField, value: FieldValue) -> Result<(), RecordError> {
        match field {
            OrderField::Id => {
                let id = expect_str(field, value)?;
                self.set_id(id);
            }
            OrderField::Status => {
                let status = expect_str(field, value)?.parse::<OrderStatus>()?;
                self.set_status(status);
            }
            OrderField::Customer => {
                let customer = expect_str(field, value)?;
                self.set_customer(customer);
            }
            OrderField::Total => {
                let total = match &value {
                    FieldValue::Number(n) => Money::new(
                        n.as_i64().ok_or_else(|| mismatch(field, "integer", &value))?,
                        self.total().currency,
                    ),
                    FieldValue::Object(_) => {
                        let minor = value
                            .get("minor")
                            .and_then(FieldValue::as_i64)
                            .ok_or_else(|| mismatch(field, "integer minor", &value))?;
                        let currency = value
                            .get("currency")
                            .and_then(FieldValue::as_str)
                            .ok_or_else(|| mismatch(field, "currency string", &value))?
                            .parse::<Currency>()?;
                        Money::new(minor, currency)
                    }
                    _ => return Err(mismatch(field, "number or object", &value)),
                };
                self.set_total(total);
            }
            OrderField::PlacedAt => {
                let placed_at = match &value {
                    FieldValue::Null => None,
                    FieldValue::Number(n) => {
                        Some(n.as_u64().ok_or_else(|| mismatch(field, "unsigned integer", &value))?)
                    }
                    _ => return Err(mismatch(field, "number or null", &value)),
                };
                self.set_placed_at(placed_at);
            }
            OrderField::IsPriority => {
                let flag = value.as_bool().ok_or_else(|| mismatch(field, "bool", &value))?;
                self.set_priority(flag);
            }
            OrderField::Weight => {
                let weight = match &value {
                    FieldValue::Number(n) => Measurement::new(n.as_f64(), self.weight().unit),
                    FieldValue::Object(_) => {
                        let amount = value
                            .get("value")
                            .and_then(FieldValue::as_f64)
                            .ok_or_else(|| mismatch(field, "numeric value", &value))?;
                        let unit = value
                            .get("unit")
                            .and_then(FieldValue::as_str)
                            .ok_or_else(|| mismatch(field, "unit string", &value))?
                            .parse::<MassUnit>()?;
                        Measurement::new(amount, unit)
                    }
                    _ => return Err(mismatch(field, "number or object", &value)),
                };
                self.set_weight(weight);
            }
            OrderField::LineItems => {
                let items = value
                    .as_array()
                    .ok_or_else(|| mismatch(field, "array", &value))?
                    .iter()
                    .map(line_item_from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                *self.line_items_mut() = items;
            }
            OrderField::Tags => {
                let map = value.as_object().ok_or_else(|| mismatch(field, "object", &value))?;
                let mut tags = FastMap::default();
                for (k, v) in map {
                    let v = v.as_str().ok_or_else(|| mismatch(field, "string values", v))?;
                    tags.insert(k.clone(), SmolStr::new(v));
                }
                *self.tags_mut() = tags;
            }
            OrderField::Notes => {
                let notes = match value {
                    FieldValue::Null => None,
                    FieldValue::Str(s) => Some(s),
                    other => return Err(mismatch(field, "string or null", &other)),
                };
                self.set_notes(notes);
            }
        }
        Ok(())
    }

    /// [`set_field`](Order::set_field) by field name.
    pub fn set_field_by_name(&mut self, name: &str, value: FieldValue) -> Result<(), RecordError> {
        self.set_field(name.parse::<OrderField>()?, value)
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

#[inline]
fn mismatch(field: OrderField, expected: &'static str, actual: &FieldValue) -> RecordError {
    RecordError::TypeMismatch {
        field: field.name(),
        expected,
        actual: actual.kind(),
    }
}

fn expect_str(field: OrderField, value: FieldValue) -> Result<SmolStr, RecordError> {
    match value {
        FieldValue::Str(s) => Ok(s),
        other => Err(mismatch(field, "string", &other)),
    }
}

fn line_item_from_value(value: &FieldValue) -> Result<LineItem, RecordError> {
    let field = OrderField::LineItems;
    let str_of = |key: &'static str| {
        value
            .get(key)
            .and_then(FieldValue::as_str)
            .map(SmolStr::new)
            .ok_or_else(|| mismatch(field, key, value))
    };
    let quantity = value
        .get("quantity")
        .and_then(FieldValue::as_u64)
        .and_then(|q| u32::try_from(q).ok())
        .ok_or_else(|| mismatch(field, "quantity", value))?;
    let unit_price = value
        .get("unit_price")
        .and_then(FieldValue::as_i64)
        .ok_or_else(|| mismatch(field, "unit_price", value))?;

    Ok(LineItem {
        sku: str_of("sku")?,
        name: str_of("name")?,
        quantity,
        unit_price,
    })
}
