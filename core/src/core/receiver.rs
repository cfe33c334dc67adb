// relay/src/core/receiver.rs

//! Defines `Receiver`, the routing target of a task's output, and how raw
//! (possibly negative) receiver indices resolve against a pipeline's task list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a task's output goes after the task has run.
///
/// Indices are positions in the enclosing pipeline. Negative values count from
/// the end of the task list, so `-1` addresses the last task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Receiver {
  /// A single destination.
  One(isize),
  /// Fan-out: every destination gets its own copy of the output.
  Many(Vec<isize>),
}

/// Outcome of resolving one raw receiver index for a given sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
  /// A valid destination strictly after the sender.
  Forward(usize),
  /// Resolved to the sender itself or an earlier task.
  NotForward(isize),
  /// Resolved past the last task; nobody would ever consume it.
  OutOfRange(isize),
}

impl Receiver {
  /// The raw indices in declaration order, with a bare index treated as a
  /// one-element list.
  pub fn indices(&self) -> &[isize] {
    match self {
      Receiver::One(index) => std::slice::from_ref(index),
      Receiver::Many(indices) => indices,
    }
  }

  pub fn is_fan_out(&self) -> bool {
    matches!(self, Receiver::Many(_))
  }
}

/// Resolves `raw` for the task at `sender` in a pipeline of `len` tasks.
pub fn resolve(raw: isize, sender: usize, len: usize) -> Resolution {
  let effective = if raw >= 0 { raw } else { len as isize + raw };
  if effective <= sender as isize {
    Resolution::NotForward(effective)
  } else if effective as usize >= len {
    Resolution::OutOfRange(effective)
  } else {
    Resolution::Forward(effective as usize)
  }
}

impl From<isize> for Receiver {
  fn from(index: isize) -> Self {
    Receiver::One(index)
  }
}

impl From<Vec<isize>> for Receiver {
  fn from(indices: Vec<isize>) -> Self {
    Receiver::Many(indices)
  }
}

impl<const N: usize> From<[isize; N]> for Receiver {
  fn from(indices: [isize; N]) -> Self {
    Receiver::Many(indices.to_vec())
  }
}

impl fmt::Display for Receiver {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Receiver::One(index) => write!(f, "{}", index),
      Receiver::Many(indices) => write!(f, "{:?}", indices),
    }
  }
}
