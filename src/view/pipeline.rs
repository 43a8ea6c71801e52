use std::cmp::Ordering;

use super::params::{SortKey, ViewConfig, ViewParams};
use crate::order::Order;
use crate::probe::Probe;

// ─── Filter ─────────────────────────────────────────────────────────────────

/// Compiled filter text.
///
/// Case-insensitive matching of an ASCII query folds case byte by byte and
/// never allocates. A non-ASCII query lowercases each haystack, one `String`
/// per field checked.
pub struct Matcher {
    needle: String,
    fold: CaseFold,
    search_line_items: bool,
}

#[derive(Clone, Copy)]
enum CaseFold {
    None,
    Ascii,
    Unicode,
}

impl Matcher {
    pub fn new(query: &str, config: &ViewConfig) -> Self {
        let (needle, fold) = if config.case_sensitive {
            (query.to_owned(), CaseFold::None)
        } else if query.is_ascii() {
            (query.to_ascii_lowercase(), CaseFold::Ascii)
        } else {
            (query.to_lowercase(), CaseFold::Unicode)
        };
        Self {
            needle,
            fold,
            search_line_items: config.search_line_items,
        }
    }

    #[inline]
    pub fn matches_everything(&self) -> bool {
        self.needle.is_empty()
    }

    fn contains(&self, haystack: &str) -> bool {
        match self.fold {
            CaseFold::None => haystack.contains(self.needle.as_str()),
            CaseFold::Ascii => contains_ascii_folded(haystack.as_bytes(), self.needle.as_bytes()),
            CaseFold::Unicode => haystack.to_lowercase().contains(self.needle.as_str()),
        }
    }

    /// An order matches through its own searchable fields or through any of
    /// its line items. Either way it matches once.
    pub fn matches(&self, order: &Order) -> bool {
        if self.matches_everything() {
            return true;
        }
        if order.search_text().any(|text| self.contains(text)) {
            return true;
        }
        self.search_line_items
            && order
                .line_items()
                .iter()
                .any(|item| self.contains(&item.name) || self.contains(&item.sku))
    }
}

/// `needle` must already be ASCII lowercase and non-empty.
fn contains_ascii_folded(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

// ─── Sort ───────────────────────────────────────────────────────────────────

/// Multi-key comparison: the first non-equal key decides.
pub fn compare(a: &Order, b: &Order, keys: &[SortKey]) -> Ordering {
    keys.iter().fold(Ordering::Equal, |acc, key| {
        acc.then_with(|| key.order.apply(a.cmp_field(b, key.field)))
    })
}

/// `sort(filter(source))`. The sort is stable, so records that tie on every
/// key keep their source order.
pub fn project(source: &[Order], params: &ViewParams, config: &ViewConfig, probe: &dyn Probe) -> Vec<Order> {
    let matcher = Matcher::new(params.query(), config);

    probe.filtered(source.len());
    let mut output: Vec<Order> = source
        .iter()
        .filter(|order| matcher.matches(order))
        .cloned()
        .collect();

    let keys = params.sort_keys();
    probe.sorted(output.len());
    if !keys.is_empty() {
        output.sort_by(|a, b| compare(a, b, keys));
    }
    output
}
