use smol_str::SmolStr;

use crate::types::FastMap;

// ─── Number ─────────────────────────────────────────────────────────────────

/// 2^63 and 2^64 are exact as `f64`; `i64::MAX as f64` rounds up to 2^63.
const I64_END: f64 = 9_223_372_036_854_775_808.0;
const U64_END: f64 = 18_446_744_073_709_551_616.0;

/// A numeric field value, kept in the width it was produced with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

/// `f` as an integer in `[lo, hi)`, or `None` if it has a fractional part or
/// falls outside. NaN fails every comparison and is rejected too.
fn whole_in(f: f64, lo: f64, hi: f64) -> Option<f64> {
    (f.fract() == 0.0 && f >= lo && f < hi).then_some(f)
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::I64(i) => i as f64,
            Number::U64(u) => u as f64,
            Number::F64(f) => f,
        }
    }

    /// Exact conversion; floats must be whole and in range.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::I64(i) => Some(i),
            Number::U64(u) => i64::try_from(u).ok(),
            Number::F64(f) => whole_in(f, -I64_END, I64_END).map(|f| f as i64),
        }
    }

    /// Exact conversion; negatives and fractional floats are rejected.
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Number::I64(i) => u64::try_from(i).ok(),
            Number::U64(u) => Some(u),
            Number::F64(f) => whole_in(f, 0.0, U64_END).map(|f| f as u64),
        }
    }
}

// ─── FieldValue ─────────────────────────────────────────────────────────────

/// Dynamically typed view of a single order field.
///
/// Produced by [`Order::get_field`](crate::Order::get_field) and accepted by
/// [`Order::set_field`](crate::Order::set_field). Composite fields (`total`,
/// `weight`, line items, tags) come out as objects keyed by their member names.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Str(SmolStr),
    Array(Vec<FieldValue>),
    Object(FastMap<SmolStr, FieldValue>),
}

impl FieldValue {
    /// Short kind name, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Number(_) => "number",
            FieldValue::Str(_) => "string",
            FieldValue::Array(_) => "array",
            FieldValue::Object(_) => "object",
        }
    }

    fn number(&self) -> Option<Number> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.number()?.as_i64()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.number()?.as_u64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.number().map(Number::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            FieldValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&FastMap<SmolStr, FieldValue>> {
        match self {
            FieldValue::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Member of an object value.
    pub fn get(&self, member: &str) -> Option<&FieldValue> {
        self.as_object()?.get(member)
    }
}

// ─── Conversions used by get_field ──────────────────────────────────────────

macro_rules! number_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for FieldValue {
            fn from(n: $ty) -> Self {
                FieldValue::Number(Number::$variant(n))
            }
        })*
    };
}

number_from!(i64 => I64, u64 => U64, f64 => F64);

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(SmolStr::new(s))
    }
}

impl From<SmolStr> for FieldValue {
    fn from(s: SmolStr) -> Self {
        FieldValue::Str(s)
    }
}

/// `None` becomes [`FieldValue::Null`].
impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
