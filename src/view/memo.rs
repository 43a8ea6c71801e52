//! Single-entry memo cache keyed by value.

/// Outcome of a cache evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The cached value was kept; nothing was computed.
    Hit,
    /// The value was recomputed and stored with its new key.
    Miss,
}

/// Remembers the last key and the value computed from it.
///
/// The value is absent until the first evaluation. Key and value are only
/// ever replaced together, so a present value always belongs to the stored
/// key. There is no dirty flag: every evaluation compares keys.
#[derive(Debug, Clone)]
pub struct MemoCache<K, V> {
    key: K,
    value: Option<V>,
}

impl<K, V> MemoCache<K, V> {
    /// An unprimed cache holding `key` as its pending input.
    pub fn new(key: K) -> Self {
        Self { key, value: None }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    #[inline]
    pub fn is_primed(&self) -> bool {
        self.value.is_some()
    }

    /// Drop the value, keeping the key; the next evaluation recomputes.
    pub fn invalidate(&mut self) {
        self.value = None;
    }

    /// Keep the cached value if `same(cached_key, &key)`, otherwise compute
    /// from `key` and store both.
    pub fn evaluate(
        &mut self,
        key: K,
        same: impl FnOnce(&K, &K) -> bool,
        compute: impl FnOnce(&K) -> V,
    ) -> Lookup {
        if self.value.is_some() && same(&self.key, &key) {
            return Lookup::Hit;
        }
        let value = compute(&key);
        *self = Self {
            key,
            value: Some(value),
        };
        Lookup::Miss
    }

    /// Like [`evaluate`](Self::evaluate) but compares against a borrowed
    /// query, so an owned key is only built on a miss.
    pub fn evaluate_with<Q: ?Sized>(
        &mut self,
        query: &Q,
        same: impl FnOnce(&K, &Q) -> bool,
        compute: impl FnOnce(&Q) -> (K, V),
    ) -> Lookup {
        if self.value.is_some() && same(&self.key, query) {
            return Lookup::Hit;
        }
        let (key, value) = compute(query);
        *self = Self {
            key,
            value: Some(value),
        };
        Lookup::Miss
    }

    /// Compute from the stored key if no value is cached yet.
    pub fn refresh(&mut self, compute: impl FnOnce(&K) -> V) -> Lookup {
        if self.value.is_some() {
            return Lookup::Hit;
        }
        self.value = Some(compute(&self.key));
        Lookup::Miss
    }
}
