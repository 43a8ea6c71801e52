//! Copy-on-write storage handle.
//!
//! A [`CowBox`] is a single `Arc` to a storage block. Cloning a box shares the
//! block; the first write through a shared box forks it. Because a block is
//! never written while shared, two boxes pointing at the same block always
//! hold equal values, which is what makes [`CowBox::eq_with`] able to answer
//! from the pointer alone.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::probe::Probe;

/// Field-by-field comparison of two storage blocks.
///
/// Implementations compare in a fixed declared order and stop at the first
/// mismatch. Each comparison is reported to `probe` by field name.
pub trait FieldwiseEq {
    fn fieldwise_eq(&self, other: &Self, probe: &dyn Probe) -> bool;
}

pub struct CowBox<S> {
    storage: Arc<S>,
}

impl<S> CowBox<S> {
    /// Allocates a new storage block.
    #[inline]
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    #[inline]
    pub fn get(&self) -> &S {
        &self.storage
    }

    /// `true` iff both boxes point at the same storage block.
    #[inline]
    pub fn is_identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    /// `true` iff no other box shares this block, so a write would not fork.
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.storage) == 1 && Arc::weak_count(&self.storage) == 0
    }

    /// Number of boxes sharing this block.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.storage)
    }
}

impl<S: Clone> CowBox<S> {
    /// Mutable access to the storage, forking it first if it is shared.
    ///
    /// Every write must go through here.
    #[inline]
    pub fn make_mut(&mut self) -> &mut S {
        if !self.is_unique() {
            tracing::trace!(
                shared_with = Arc::strong_count(&self.storage) - 1,
                "forking shared storage block"
            );
        }
        Arc::make_mut(&mut self.storage)
    }
}

impl<S: FieldwiseEq> CowBox<S> {
    /// Identity fast path, then field-wise comparison.
    pub fn eq_with(&self, other: &Self, probe: &dyn Probe) -> bool {
        if self.is_identical(other) {
            probe.identity_hit();
            return true;
        }
        self.storage.fieldwise_eq(&other.storage, probe)
    }
}

impl<S> Clone for CowBox<S> {
    /// O(1): shares the storage block.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S> Deref for CowBox<S> {
    type Target = S;

    #[inline]
    fn deref(&self) -> &S {
        &self.storage
    }
}

impl<S: FieldwiseEq> PartialEq for CowBox<S> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &crate::probe::NoProbe)
    }
}

impl<S: fmt::Debug> fmt::Debug for CowBox<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.storage.fmt(f)
    }
}

impl<S: Serialize> Serialize for CowBox<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.storage.serialize(serializer)
    }
}

impl<'de, S: Deserialize<'de>> Deserialize<'de> for CowBox<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        S::deserialize(deserializer).map(CowBox::new)
    }
}
