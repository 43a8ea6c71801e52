use arrayvec::ArrayVec;
use smol_str::SmolStr;

use crate::error::RecordError;
use crate::types::{OrderField, SortOrder};

/// Maximum number of sort keys a [`ViewParams`] holds.
pub const MAX_SORT_KEYS: usize = 8;

// ─── SortKey ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: OrderField,
    pub order: SortOrder,
}

impl SortKey {
    pub fn new(field: OrderField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn asc(field: OrderField) -> Self {
        Self::new(field, SortOrder::Ascending)
    }

    pub fn desc(field: OrderField) -> Self {
        Self::new(field, SortOrder::Descending)
    }
}

// ─── ViewParams ─────────────────────────────────────────────────────────────

/// Inputs of an order view besides the source collection: the filter text and
/// the ordered sort keys. Compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewParams {
    query: SmolStr,
    sort: ArrayVec<SortKey, MAX_SORT_KEYS>,
}

impl ViewParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<SmolStr>) -> Self {
        Self {
            query: query.into(),
            sort: ArrayVec::new(),
        }
    }

    /// Builder form of [`push_sort`](Self::push_sort).
    pub fn sorted_by(mut self, field: OrderField, order: SortOrder) -> Result<Self, RecordError> {
        self.push_sort(SortKey::new(field, order))?;
        Ok(self)
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<SmolStr>) {
        self.query = query.into();
    }

    #[inline]
    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort
    }

    /// Append a lower-priority sort key.
    pub fn push_sort(&mut self, key: SortKey) -> Result<(), RecordError> {
        self.sort
            .try_push(key)
            .map_err(|_| RecordError::TooManySortKeys {
                limit: MAX_SORT_KEYS,
            })
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
    }
}

// ─── ViewConfig ─────────────────────────────────────────────────────────────

/// Configuration for [`OrderView::with_config`](super::OrderView::with_config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Match the filter text with exact case.
    ///
    /// Default: `false` (both sides are lowercased).
    pub case_sensitive: bool,
    /// Also retain an order when one of its line items' `name` or `sku`
    /// matches.
    ///
    /// Default: `true`.
    pub search_line_items: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            search_line_items: true,
        }
    }
}
