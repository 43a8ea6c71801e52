//! Copy-on-write order records and a memoized, filtered and sorted view over
//! them.
//!
//! [`Order`] is a one-pointer handle to shared field storage: clones are
//! cheap, writes fork shared storage, and equality answers from storage
//! identity before comparing fields. [`OrderView`] keeps the last projection
//! of an order collection and recomputes it only when its inputs change by
//! value.

pub mod cow;
pub mod error;
pub mod order;
pub mod probe;
pub mod types;
pub mod value;
pub mod view;

pub use cow::{CowBox, FieldwiseEq};
pub use error::RecordError;
pub use order::{Order, OrderBuilder, OrderStorage};
pub use probe::{CounterSnapshot, Counters, NoProbe, Probe};
pub use types::{
    Currency, FastMap, LineItem, MassUnit, Measurement, Money, OrderField, OrderStatus, SortOrder,
};
pub use value::{FieldValue, Number};
pub use view::{Lookup, MemoCache, OrderView, SortKey, ViewConfig, ViewParams};
