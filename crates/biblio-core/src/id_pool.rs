//! Reuse of freed identifiers.
//!
//! When a book is removed its id becomes eligible for the next registration.
//! This is a policy applied by callers on top of the store: a plain insert
//! with [`NEW_ID`](crate::NEW_ID) still gets a fresh, never-reused id, and an
//! insert with an explicit id is always honoured.

use std::collections::BTreeSet;

/// Ordered set of freed ids; the smallest one is handed out first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdReusePool {
  freed: BTreeSet<i64>,
}

impl IdReusePool {
  pub fn new() -> Self { Self::default() }

  /// Mark `id` as free. Non-positive ids are ignored.
  pub fn release(&mut self, id: i64) -> bool { id > 0 && self.freed.insert(id) }

  pub fn contains(&self, id: i64) -> bool { self.freed.contains(&id) }

  pub fn len(&self) -> usize { self.freed.len() }

  pub fn is_empty(&self) -> bool { self.freed.is_empty() }

  /// Freed ids in ascending order.
  pub fn iter(&self) -> impl Iterator<Item = i64> + '_ { self.freed.iter().copied() }

  /// Choose the id for the next record and remove it from the pool.
  ///
  /// Picks the smallest freed id that is not in `in_use`; freed ids that were
  /// taken again by an explicit insert are dropped on the way. With nothing
  /// reusable, returns `max(in_use) + 1`, or `1` for an empty table.
  ///
  /// Returns `None` when nothing is reusable and `max(in_use)` is already
  /// `i64::MAX`.
  pub fn next_id(&mut self, in_use: impl IntoIterator<Item = i64>) -> Option<i64> {
    let in_use: BTreeSet<i64> = in_use.into_iter().collect();
    while let Some(id) = self.freed.pop_first() {
      if !in_use.contains(&id) {
        return Some(id);
      }
    }
    match in_use.last() {
      Some(max) => max.checked_add(1),
      None => Some(1),
    }
  }
}

impl FromIterator<i64> for IdReusePool {
  fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
    let mut pool = Self::new();
    for id in iter {
      pool.release(id);
    }
    pool
  }
}
