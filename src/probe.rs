//! Injectable instrumentation hooks.
//!
//! Equality and the order view report what they do to a [`Probe`]. The
//! default [`NoProbe`] compiles away; [`Counters`] tallies events for tests
//! and benchmarks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Probe {
    /// The field called `field` of two distinct storage blocks was compared.
    #[inline]
    fn field_compared(&self, _field: &'static str) {}
    /// Equality was answered by storage identity alone.
    #[inline]
    fn identity_hit(&self) {}
    /// A memoized view returned its cached output.
    #[inline]
    fn cache_hit(&self) {}
    /// A memoized view recomputed its output.
    #[inline]
    fn recomputed(&self) {}
    /// The filter stage ran over `input_len` records.
    #[inline]
    fn filtered(&self, _input_len: usize) {}
    /// The sort stage ran over `len` records.
    #[inline]
    fn sorted(&self, _len: usize) {}
}

/// Probe that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl Probe for NoProbe {}

impl<P: Probe + ?Sized> Probe for &P {
    fn field_compared(&self, field: &'static str) {
        (**self).field_compared(field)
    }
    fn identity_hit(&self) {
        (**self).identity_hit()
    }
    fn cache_hit(&self) {
        (**self).cache_hit()
    }
    fn recomputed(&self) {
        (**self).recomputed()
    }
    fn filtered(&self, input_len: usize) {
        (**self).filtered(input_len)
    }
    fn sorted(&self, len: usize) {
        (**self).sorted(len)
    }
}

impl<P: Probe + ?Sized> Probe for Arc<P> {
    fn field_compared(&self, field: &'static str) {
        (**self).field_compared(field)
    }
    fn identity_hit(&self) {
        (**self).identity_hit()
    }
    fn cache_hit(&self) {
        (**self).cache_hit()
    }
    fn recomputed(&self) {
        (**self).recomputed()
    }
    fn filtered(&self, input_len: usize) {
        (**self).filtered(input_len)
    }
    fn sorted(&self, len: usize) {
        (**self).sorted(len)
    }
}

// ─── Counters ───────────────────────────────────────────────────────────────

/// Atomic event tallies. Share it with `Arc<Counters>` and read it back with
/// [`Counters::snapshot`].
#[derive(Debug, Default)]
pub struct Counters {
    field_compares: AtomicU64,
    identity_hits: AtomicU64,
    cache_hits: AtomicU64,
    recomputes: AtomicU64,
    filter_runs: AtomicU64,
    sort_runs: AtomicU64,
}

/// Point-in-time copy of [`Counters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub field_compares: u64,
    pub identity_hits: u64,
    pub cache_hits: u64,
    pub recomputes: u64,
    pub filter_runs: u64,
    pub sort_runs: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            field_compares: self.field_compares.load(Ordering::Relaxed),
            identity_hits: self.identity_hits.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            recomputes: self.recomputes.load(Ordering::Relaxed),
            filter_runs: self.filter_runs.load(Ordering::Relaxed),
            sort_runs: self.sort_runs.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.field_compares,
            &self.identity_hits,
            &self.cache_hits,
            &self.recomputes,
            &self.filter_runs,
            &self.sort_runs,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Probe for Counters {
    fn field_compared(&self, _field: &'static str) {
        self.field_compares.fetch_add(1, Ordering::Relaxed);
    }
    fn identity_hit(&self) {
        self.identity_hits.fetch_add(1, Ordering::Relaxed);
    }
    fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }
    fn recomputed(&self) {
        self.recomputes.fetch_add(1, Ordering::Relaxed);
    }
    fn filtered(&self, _input_len: usize) {
        self.filter_runs.fetch_add(1, Ordering::Relaxed);
    }
    fn sorted(&self, _len: usize) {
        self.sort_runs.fetch_add(1, Ordering::Relaxed);
    }
}
