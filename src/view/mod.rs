pub mod memo;
pub mod order_view;
pub mod params;
pub mod pipeline;

pub use memo::{Lookup, MemoCache};
pub use order_view::OrderView;
pub use params::{MAX_SORT_KEYS, SortKey, ViewConfig, ViewParams};

#[cfg(test)]
mod tests;
