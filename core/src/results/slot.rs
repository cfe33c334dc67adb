// relay/src/results/slot.rs

//! The value pending at one results-store key, and the rules for folding a
//! newly routed value into it.
//!
//! | pending           | incoming      | becomes                          |
//! |-------------------|---------------|----------------------------------|
//! | nothing           | array         | `List` of its elements           |
//! | nothing           | object        | `Mapping`                        |
//! | nothing           | anything else | `Scalar`                         |
//! | `Scalar`/`Mapping`| not an object | `List` of old value + incoming   |
//! | `Mapping`         | object        | `Mapping`, incoming keys win     |
//! | `Scalar`          | object        | error                            |
//! | `List`            | anything      | `List` with incoming appended    |
//!
//! Arrays are spliced into a list one level deep instead of nested.

use crate::core::Value;
use crate::error::{RelayError, RelayResult};
use serde_json::Map;

#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
  Scalar(Value),
  List(Vec<Value>),
  Mapping(Map<String, Value>),
}

impl Slot {
  /// Classifies a value arriving at an empty key.
  pub fn new(value: Value) -> Self {
    match value {
      Value::Array(items) => Slot::List(items),
      Value::Object(map) => Slot::Mapping(map),
      other => Slot::Scalar(other),
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Slot::Scalar(_) => "scalar",
      Slot::List(_) => "list",
      Slot::Mapping(_) => "mapping",
    }
  }

  pub fn is_list(&self) -> bool {
    matches!(self, Slot::List(_))
  }

  pub fn into_value(self) -> Value {
    match self {
      Slot::Scalar(value) => value,
      Slot::List(items) => Value::Array(items),
      Slot::Mapping(map) => Value::Object(map),
    }
  }
}

fn value_kind(value: &Value) -> &'static str {
  match value {
    Value::Array(_) => "list",
    Value::Object(_) => "mapping",
    _ => "scalar",
  }
}

fn push_flat(items: &mut Vec<Value>, incoming: Value) {
  match incoming {
    Value::Array(more) => items.extend(more),
    other => items.push(other),
  }
}

/// Folds `incoming` into whatever is pending at `key`.
///
/// `key` is only used to describe a failure.
pub fn merge(key: usize, pending: Option<Slot>, incoming: Value) -> RelayResult<Slot> {
  match (pending, incoming) {
    (None, incoming) => Ok(Slot::new(incoming)),
    (Some(Slot::List(mut items)), incoming) => {
      push_flat(&mut items, incoming);
      Ok(Slot::List(items))
    }
    (Some(Slot::Mapping(mut map)), Value::Object(update)) => {
      map.extend(update);
      Ok(Slot::Mapping(map))
    }
    (Some(Slot::Scalar(existing)), incoming @ Value::Object(_)) => Err(RelayError::IncompatibleMerge {
      key,
      existing: value_kind(&existing),
      incoming: value_kind(&incoming),
    }),
    (Some(existing), incoming) => {
      let mut items = vec![existing.into_value()];
      push_flat(&mut items, incoming);
      Ok(Slot::List(items))
    }
  }
}
