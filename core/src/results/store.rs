// relay/src/results/store.rs

use crate::core::Value;
use crate::error::RelayResult;
use crate::results::slot::{merge, Slot};
use std::collections::BTreeMap;
use tracing::{event, Level};

/// Values waiting to be consumed, keyed by the index of the task that will
/// receive them.
///
/// Each key is read at most once: `take` removes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
  slots: BTreeMap<usize, Slot>,
}

impl ResultStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Merges `value` into the slot at `key`.
  ///
  /// A rejected merge aborts the run that caused it, so the slot is not
  /// restored: after an error nothing is pending at `key`.
  pub fn deposit(&mut self, key: usize, value: Value) -> RelayResult<()> {
    let pending = self.slots.remove(&key);
    let had_pending = pending.is_some();
    let slot = match merge(key, pending, value) {
      Ok(slot) => slot,
      Err(e) => {
        event!(Level::ERROR, key, error = %e, "Results slot rejected incoming value.");
        return Err(e);
      }
    };
    event!(Level::TRACE, key, slot_kind = slot.kind(), merged = had_pending, "Value deposited.");
    self.slots.insert(key, slot);
    Ok(())
  }

  /// Deposits several values in iteration order. Stops at the first failure;
  /// values already deposited stay.
  pub fn deposit_all<I>(&mut self, values: I) -> RelayResult<()>
  where
    I: IntoIterator<Item = (usize, Value)>,
  {
    for (key, value) in values {
      self.deposit(key, value)?;
    }
    Ok(())
  }

  /// Removes and returns the value pending at `key`.
  pub fn take(&mut self, key: usize) -> Option<Value> {
    self.slots.remove(&key).map(Slot::into_value)
  }

  pub fn peek(&self, key: usize) -> Option<&Slot> {
    self.slots.get(&key)
  }

  pub fn pending_keys(&self) -> impl Iterator<Item = usize> + '_ {
    self.slots.keys().copied()
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  pub fn clear(&mut self) {
    self.slots.clear();
  }
}
